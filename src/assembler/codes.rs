//! Bit codes for the three fields of a C-instruction.
//!
//! ```text
//! 1 1 1 a c1 c2 c3 c4 c5 c6 d1 d2 d3 j1 j2 j3
//!       `------ comp ------' `-dest-' `-jump-'
//! ```
//!
//! The `a` bit picks the memory operand M over the A register.

/// Every computation the ALU supports, as `a c1..c6`.
pub const COMP_CODES: [(&str, u16); 28] = [
    ("0",   0b0101010),
    ("1",   0b0111111),
    ("-1",  0b0111010),
    ("D",   0b0001100),
    ("A",   0b0110000),
    ("!D",  0b0001101),
    ("!A",  0b0110001),
    ("-D",  0b0001111),
    ("-A",  0b0110011),
    ("D+1", 0b0011111),
    ("A+1", 0b0110111),
    ("D-1", 0b0001110),
    ("A-1", 0b0110010),
    ("D+A", 0b0000010),
    ("D-A", 0b0010011),
    ("A-D", 0b0000111),
    ("D&A", 0b0000000),
    ("D|A", 0b0010101),
    ("M",   0b1110000),
    ("!M",  0b1110001),
    ("-M",  0b1110011),
    ("M+1", 0b1110111),
    ("M-1", 0b1110010),
    ("D+M", 0b1000010),
    ("D-M", 0b1010011),
    ("M-D", 0b1000111),
    ("D&M", 0b1000000),
    ("D|M", 0b1010101),
];

/// Destinations, `None` meaning the result is discarded.
pub const DEST_CODES: [(Option<&str>, u16); 8] = [
    (None,        0b000),
    (Some("M"),   0b001),
    (Some("D"),   0b010),
    (Some("MD"),  0b011),
    (Some("A"),   0b100),
    (Some("AM"),  0b101),
    (Some("AD"),  0b110),
    (Some("AMD"), 0b111),
];

/// Jump conditions, `None` meaning no jump.
pub const JUMP_CODES: [(Option<&str>, u16); 8] = [
    (None,        0b000),
    (Some("JGT"), 0b001),
    (Some("JEQ"), 0b010),
    (Some("JGE"), 0b011),
    (Some("JLT"), 0b100),
    (Some("JNE"), 0b101),
    (Some("JLE"), 0b110),
    (Some("JMP"), 0b111),
];

pub fn comp(mnemonic: &str) -> Option<u16> {
    COMP_CODES.iter().find(|(m, _)| *m == mnemonic).map(|&(_, code)| code)
}

pub fn dest(mnemonic: Option<&str>) -> Option<u16> {
    DEST_CODES.iter().find(|(m, _)| *m == mnemonic).map(|&(_, code)| code)
}

pub fn jump(mnemonic: Option<&str>) -> Option<u16> {
    JUMP_CODES.iter().find(|(m, _)| *m == mnemonic).map(|&(_, code)| code)
}

pub fn comp_mnemonic(code: u16) -> Option<&'static str> {
    COMP_CODES.iter().find(|(_, c)| *c == code).map(|&(m, _)| m)
}

pub fn dest_mnemonic(code: u16) -> Option<Option<&'static str>> {
    DEST_CODES.iter().find(|(_, c)| *c == code).map(|&(m, _)| m)
}

pub fn jump_mnemonic(code: u16) -> Option<Option<&'static str>> {
    JUMP_CODES.iter().find(|(_, c)| *c == code).map(|&(m, _)| m)
}
