//! The Assembler module is in charge of taking a
//! Hack assembly file and producing its machine words.
//!
//! It does this with a line classifier, a symbol table,
//! and a two-pass driver that resolves labels and variables
//! before encoding.

pub mod ast;
pub mod codes;
pub mod driver;
pub mod error;
pub mod lexer;
pub mod symbols;

pub use driver::{assemble, Options, Program};
pub use error::Error;
