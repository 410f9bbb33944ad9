//! Types describing a Hack assembly program at each stage of assembly.
//!
//! Execution begins with the first instruction in the file.
//! Comments start with a double slash (//) and run to the end of the line.
//! Whitespace is insignificant anywhere in a line.
//!
//! Supported lines:
//!
//! ```nasm
//! @21          // A-instruction: load a literal into A
//! @sum         // A-instruction: load a variable's address into A
//! @LOOP        // A-instruction: load a label's ROM address into A
//! (LOOP)       // label definition, occupies no ROM word
//! D=M+1        // C-instruction: dest=comp
//! D;JGT        // C-instruction: comp;jump
//! AM=M-1;JNE   // C-instruction: dest=comp;jump
//! ```
//!
//! Labels must be uppercase. A name that is not yet defined and is entirely
//! uppercase is assumed to be a label defined further down the file, while
//! any other unknown name is allocated as a variable starting at RAM 16.

use std::fmt;

/// Highest address an A-instruction can load; the top bit selects a C-instruction.
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// Number of words the instruction ROM can hold.
pub const ROM_SIZE: usize = MAX_ADDRESS as usize + 1;

/// A single classified source line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    /// `@symbol`, where the symbol is a literal or a name.
    Address(String),
    /// `dest=comp;jump`, dest and jump optional.
    Compute {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
    /// `(symbol)`. `terminated` is false when the closing paren is missing.
    Label { symbol: String, terminated: bool },
    Blank,
}

/// A classified line along with where it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line {
    /// 1-based line number in the source.
    pub number: usize,
    /// The line with comments and whitespace stripped.
    pub text: String,
    pub instruction: Instruction,
}

/// One ROM word's worth of pass 1 output.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
    pub line: usize,
    pub source: String,
    pub kind: EntryKind,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EntryKind {
    /// An A-instruction with its final address.
    Address(u16),
    /// A C-instruction, carried through verbatim.
    Compute {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
    /// A reference to a label that had not been defined yet when it was seen.
    Deferred(String),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            EntryKind::Address(address) => write!(f, "@{}", address),
            EntryKind::Deferred(name) => write!(f, "@{} (unresolved)", name),
            EntryKind::Compute { .. } => write!(f, "{}", self.source),
        }
    }
}

/// A 16-bit machine word.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Word(pub u16);

impl Word {
    /// Builds a C-instruction from its three field codes.
    pub fn compute(comp: u16, dest: u16, jump: u16) -> Word {
        Word((0b111 << 13) | ((comp & 0x7F) << 6) | ((dest & 0x7) << 3) | (jump & 0x7))
    }
}

/// Words render as sixteen binary digits, most significant bit first.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_display() {
        assert_eq!(Word(0).to_string(), "0000000000000000");
        assert_eq!(Word(2).to_string(), "0000000000000010");
        assert_eq!(Word(16384).to_string(), "0100000000000000");
        assert_eq!(Word(MAX_ADDRESS).to_string(), "0111111111111111");
        assert_eq!(Word(u16::MAX).to_string().len(), 16);
    }

    #[test]
    fn test_word_compute() {
        // D=A
        assert_eq!(Word::compute(0b0110000, 0b010, 0b000).to_string(), "1110110000010000");
        // 0;JMP
        assert_eq!(Word::compute(0b0101010, 0b000, 0b111).to_string(), "1110101010000111");
        // AMD=M-1;JNE
        assert_eq!(Word::compute(0b1110010, 0b111, 0b101).to_string(), "1111110010111101");
    }

    #[test]
    fn test_entry_display() {
        let e = Entry { line: 1, source: "@i".to_string(), kind: EntryKind::Address(16) };
        assert_eq!(e.to_string(), "@16");

        let e = Entry { line: 1, source: "@END".to_string(), kind: EntryKind::Deferred("END".to_string()) };
        assert_eq!(e.to_string(), "@END (unresolved)");

        let e = Entry {
            line: 2,
            source: "D=D+A".to_string(),
            kind: EntryKind::Compute {
                dest: Some("D".to_string()),
                comp: "D+A".to_string(),
                jump: None,
            },
        };
        assert_eq!(e.to_string(), "D=D+A");
    }
}
