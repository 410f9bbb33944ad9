//! This lexer classifies Hack assembly one line at a time.
use std::io::BufRead;

use super::ast::{Instruction, Line};
use super::error::Error;

/// Hack only supports a single instruction per line, so every source line
/// maps to exactly one classified `Line`. Lines are pulled from the reader
/// as the returned iterator is consumed.
pub fn tokenize<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Line, Error>> {
    reader.lines().enumerate().map(|(index, line)| {
        let number = index + 1;
        match line {
            Ok(raw) => Ok(tokenize_line(&raw, number)),
            Err(source) => Err(Error::Io { line: number, source }),
        }
    })
}

pub fn tokenize_line(raw: &str, number: usize) -> Line {
    let text = sanitize(raw);
    let instruction = classify(&text);
    Line { number, text, instruction }
}

/// Drops everything from the first `//` onward, then every whitespace character.
pub fn sanitize(raw: &str) -> String {
    let code = match raw.find("//") {
        Some(index) => &raw[..index],
        None => raw,
    };
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Classifies a sanitized line by its first character.
pub fn classify(text: &str) -> Instruction {
    match text.chars().next() {
        None => Instruction::Blank,
        Some('@') => Instruction::Address(text[1..].to_string()),
        Some('(') => {
            let rest = &text[1..];
            match rest.find(')') {
                Some(end) => Instruction::Label {
                    symbol: rest[..end].to_string(),
                    terminated: true,
                },
                None => Instruction::Label {
                    symbol: rest.to_string(),
                    terminated: false,
                },
            }
        }
        Some(_) => split_compute(text),
    }
}

fn split_compute(text: &str) -> Instruction {
    let (head, jump) = match text.find(';') {
        Some(index) => (&text[..index], Some(text[index + 1..].to_string())),
        None => (text, None),
    };
    let (dest, comp) = match head.find('=') {
        Some(index) => (Some(head[..index].to_string()), &head[index + 1..]),
        None => (None, head),
    };
    Instruction::Compute {
        dest,
        comp: comp.to_string(),
        jump,
    }
}
