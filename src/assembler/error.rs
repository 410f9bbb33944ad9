//! Fatal assembly errors.
//!
//! Every variant halts the run. All of them carry the 1-based source line
//! that triggered them so the command line can point the user at it.
use std::fmt;
use thiserror::Error;

/// Which of the three C-instruction fields a mnemonic belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Field {
    Dest,
    Comp,
    Jump,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Dest => write!(f, "destination"),
            Field::Comp => write!(f, "computation"),
            Field::Jump => write!(f, "jump"),
        }
    }
}

/// Why a label definition was rejected.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LabelFault {
    Grammar,
    Lowercase,
    Unterminated,
}

impl fmt::Display for LabelFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LabelFault::Grammar => write!(f, "not a valid symbol name"),
            LabelFault::Lowercase => write!(f, "labels must be entirely uppercase"),
            LabelFault::Unterminated => write!(f, "missing closing `)`"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: invalid symbol name `{name}`")]
    InvalidSymbol { line: usize, name: String },

    #[error("line {line}: invalid label name `{name}`: {fault}")]
    InvalidLabel {
        line: usize,
        name: String,
        fault: LabelFault,
    },

    #[error("line {line}: label `{name}` is referenced but never defined")]
    UnresolvedLabel { line: usize, name: String },

    #[error("line {line}: numeric literal `{literal}` is not an address in 0..=32767")]
    MalformedLiteral { line: usize, literal: String },

    #[error("line {line}: no data memory left for variable `{name}`")]
    OutOfMemory { line: usize, name: String },

    #[error("line {line}: program exceeds {limit} ROM words")]
    ProgramTooLarge { line: usize, limit: usize },

    #[error("line {line}: failed to read source")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unknown {field} mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        line: usize,
        field: Field,
        mnemonic: String,
    },
}

impl Error {
    /// The source line the error was raised on.
    pub fn line(&self) -> usize {
        use Error::*;
        match self {
            InvalidSymbol { line, .. }
            | InvalidLabel { line, .. }
            | UnresolvedLabel { line, .. }
            | MalformedLiteral { line, .. }
            | OutOfMemory { line, .. }
            | ProgramTooLarge { line, .. }
            | Io { line, .. }
            | UnknownMnemonic { line, .. } => *line,
        }
    }

    /// Encoder lookup misses are reported separately from user input errors.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::UnknownMnemonic { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::InvalidSymbol { line: 3, name: "2cool".to_string() };
        assert_eq!(e.to_string(), "line 3: invalid symbol name `2cool`");

        let e = Error::InvalidLabel {
            line: 7,
            name: "loop".to_string(),
            fault: LabelFault::Lowercase,
        };
        assert_eq!(
            e.to_string(),
            "line 7: invalid label name `loop`: labels must be entirely uppercase"
        );

        let e = Error::UnknownMnemonic {
            line: 1,
            field: Field::Jump,
            mnemonic: "JXX".to_string(),
        };
        assert_eq!(e.to_string(), "line 1: unknown jump mnemonic `JXX`");
    }

    #[test]
    fn test_classification() {
        let e = Error::UnknownMnemonic {
            line: 12,
            field: Field::Comp,
            mnemonic: "Q".to_string(),
        };
        assert!(e.is_internal());
        assert_eq!(e.line(), 12);

        let e = Error::UnresolvedLabel { line: 4, name: "END".to_string() };
        assert!(!e.is_internal());
        assert_eq!(e.line(), 4);

        let e = Error::MalformedLiteral { line: 9, literal: "40000".to_string() };
        assert!(!e.is_internal());
        assert_eq!(e.line(), 9);
    }
}
