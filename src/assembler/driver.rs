//! The driver runs the two assembly passes over a stream of classified lines.
//!
//! Pass 1 builds the symbol table and an in-memory list of entries, one per
//! ROM word. Labels referenced before their definition are left as deferred
//! entries and patched once the whole file has been read. Pass 2 encodes
//! each entry into a 16-bit word.
use std::io::BufRead;

use super::ast::*;
use super::codes;
use super::error::{Error, Field, LabelFault};
use super::lexer;
use super::symbols::{is_label_name, SymbolTable};

#[derive(Copy, Clone, Default, Debug)]
pub struct Options {
    /// Treat uppercase names that never get a label definition as variables
    /// instead of failing with an unresolved label.
    pub late_variables: bool,
}

/// Reads and assembles a whole source.
pub fn assemble<R: BufRead>(reader: R, options: Options) -> Result<Program, Error> {
    Assembler::new(options).run(lexer::tokenize(reader))
}

pub struct Assembler {
    symbols: SymbolTable,
    entries: Vec<Entry>,
    options: Options,
    source_lines: usize,
}

impl Assembler {
    pub fn new(options: Options) -> Self {
        Assembler {
            symbols: SymbolTable::new(),
            entries: Vec::with_capacity(256),
            options,
            source_lines: 0,
        }
    }

    /// Runs pass 1, consuming itself and returning the resolved program.
    /// Stops at the first error.
    pub fn run<I>(mut self, lines: I) -> Result<Program, Error>
    where
        I: IntoIterator<Item = Result<Line, Error>>,
    {
        for line in lines {
            let line = line?;
            self.source_lines = line.number;
            self.line(line)?;
        }
        self.resolve_deferred()?;

        Ok(Program {
            entries: self.entries,
            symbols: self.symbols,
            source_lines: self.source_lines,
        })
    }

    fn line(&mut self, line: Line) -> Result<(), Error> {
        let Line { number, text, instruction } = line;
        match instruction {
            Instruction::Blank => Ok(()),
            Instruction::Label { symbol, terminated } => self.label(number, symbol, terminated),
            Instruction::Address(symbol) => {
                let kind = self.address(number, &symbol)?;
                self.push(number, text, kind)
            }
            Instruction::Compute { dest, comp, jump } => {
                self.push(number, text, EntryKind::Compute { dest, comp, jump })
            }
        }
    }

    fn push(&mut self, line: usize, source: String, kind: EntryKind) -> Result<(), Error> {
        if self.entries.len() >= ROM_SIZE {
            return Err(Error::ProgramTooLarge { line, limit: ROM_SIZE });
        }
        self.entries.push(Entry { line, source, kind });
        Ok(())
    }

    fn address(&mut self, line: usize, symbol: &str) -> Result<EntryKind, Error> {
        let unsigned = symbol.trim_start_matches(|c: char| c == '+' || c == '-');
        if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
            // Only a bare, in-range decimal is an address. Signs are never valid.
            return match symbol.parse::<u16>() {
                Ok(address) if address <= MAX_ADDRESS && unsigned.len() == symbol.len() => {
                    Ok(EntryKind::Address(address))
                }
                _ => Err(Error::MalformedLiteral {
                    line,
                    literal: symbol.to_string(),
                }),
            };
        }

        if !self.symbols.validate(symbol) {
            return Err(Error::InvalidSymbol {
                line,
                name: symbol.to_string(),
            });
        }

        if let Some(address) = self.symbols.resolve(symbol) {
            return Ok(EntryKind::Address(address));
        }

        // Not seen yet. Uppercase names are assumed to be labels further down.
        if is_label_name(symbol) {
            trace!("line {}: deferring `{}` until all labels are known", line, symbol);
            return Ok(EntryKind::Deferred(symbol.to_string()));
        }

        match self.symbols.allocate_variable(symbol) {
            Some(address) => {
                debug!("line {}: variable `{}` allocated at RAM {}", line, symbol, address);
                Ok(EntryKind::Address(address))
            }
            None => Err(Error::OutOfMemory {
                line,
                name: symbol.to_string(),
            }),
        }
    }

    fn label(&mut self, line: usize, symbol: String, terminated: bool) -> Result<(), Error> {
        let fault = if !terminated {
            Some(LabelFault::Unterminated)
        } else if !self.symbols.validate(&symbol) {
            Some(LabelFault::Grammar)
        } else if !is_label_name(&symbol) {
            Some(LabelFault::Lowercase)
        } else {
            None
        };
        if let Some(fault) = fault {
            return Err(Error::InvalidLabel { line, name: symbol, fault });
        }

        // A label points at the next instruction, which must still be loadable by `@`.
        let address = self.entries.len();
        if address > MAX_ADDRESS as usize {
            return Err(Error::ProgramTooLarge { line, limit: ROM_SIZE });
        }
        let address = address as u16;

        if self.symbols.bind(&symbol, address) {
            debug!("line {}: label `{}` bound to ROM {}", line, symbol, address);
        } else {
            warn!(
                "line {}: `{}` is already defined, keeping address {}",
                line,
                symbol,
                self.symbols.resolve(&symbol).unwrap_or_default()
            );
        }
        Ok(())
    }

    /// Patches every deferred entry now that every label in the file is bound.
    fn resolve_deferred(&mut self) -> Result<(), Error> {
        let late_variables = self.options.late_variables;
        let symbols = &mut self.symbols;

        for entry in self.entries.iter_mut() {
            let name = match &entry.kind {
                EntryKind::Deferred(name) => name.clone(),
                _ => continue,
            };

            let address = match symbols.resolve(&name) {
                Some(address) => address,
                None if late_variables => match symbols.allocate_variable(&name) {
                    Some(address) => {
                        debug!("line {}: undefined `{}` allocated at RAM {}", entry.line, name, address);
                        address
                    }
                    None => return Err(Error::OutOfMemory { line: entry.line, name }),
                },
                None => return Err(Error::UnresolvedLabel { line: entry.line, name }),
            };
            entry.kind = EntryKind::Address(address);
        }
        Ok(())
    }
}

/// A fully resolved program, ready to be encoded.
pub struct Program {
    entries: Vec<Entry>,
    symbols: SymbolTable,
    source_lines: usize,
}

impl Program {
    /// One entry per ROM word, indexed by ROM address.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Number of lines read from the source, blank lines included.
    pub fn source_lines(&self) -> usize {
        self.source_lines
    }

    /// Pass 2, one word per entry in ROM order.
    pub fn words(&self) -> impl Iterator<Item = Result<Word, Error>> + '_ {
        self.entries.iter().map(encode)
    }

    pub fn assemble(&self) -> Result<Vec<Word>, Error> {
        self.words().collect()
    }
}

/// Encodes a single resolved entry.
pub fn encode(entry: &Entry) -> Result<Word, Error> {
    match &entry.kind {
        EntryKind::Address(address) => Ok(Word(*address)),
        EntryKind::Compute { dest, comp, jump } => {
            let unknown = |field, mnemonic: &str| Error::UnknownMnemonic {
                line: entry.line,
                field,
                mnemonic: mnemonic.to_string(),
            };
            let c = codes::comp(comp).ok_or_else(|| unknown(Field::Comp, comp))?;
            let d = codes::dest(dest.as_deref())
                .ok_or_else(|| unknown(Field::Dest, dest.as_deref().unwrap_or_default()))?;
            let j = codes::jump(jump.as_deref())
                .ok_or_else(|| unknown(Field::Jump, jump.as_deref().unwrap_or_default()))?;
            Ok(Word::compute(c, d, j))
        }
        EntryKind::Deferred(name) => Err(Error::UnresolvedLabel {
            line: entry.line,
            name: name.clone(),
        }),
    }
}
