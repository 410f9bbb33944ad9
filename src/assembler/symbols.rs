//! The symbol table maps names to RAM or ROM addresses.
use std::collections::HashMap;

use regex::Regex;

use super::ast::MAX_ADDRESS;

/// A symbol starts with a letter or one of `_ $ . :`, and may contain digits after that.
const SYMBOL_PATTERN: &str = r"^[A-Za-z_$.:][A-Za-z0-9_$.:]*$";

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u16 = 16;

const PREDEFINED: [(&str, u16); 23] = [
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
];

pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    pattern: Regex,
    next_variable: u16,
}

impl SymbolTable {
    /// Creates a table holding only the predefined symbols.
    pub fn new() -> Self {
        let symbols = PREDEFINED
            .iter()
            .map(|&(name, address)| (name.to_string(), address))
            .collect();
        SymbolTable {
            symbols,
            pattern: Regex::new(SYMBOL_PATTERN).expect("symbol pattern is a valid regex"),
            next_variable: VARIABLE_BASE,
        }
    }

    pub fn validate(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Binds `name` unless it is already bound. Returns whether the binding was made.
    pub fn bind(&mut self, name: &str, address: u16) -> bool {
        if self.contains(name) {
            return false;
        }
        self.symbols.insert(name.to_string(), address);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    /// Binds `name` to the next free variable address.
    /// Returns None once data memory below the I/O map is exhausted.
    pub fn allocate_variable(&mut self, name: &str) -> Option<u16> {
        let address = self.next_variable;
        if address > MAX_ADDRESS {
            return None;
        }
        self.bind(name, address);
        self.next_variable += 1;
        Some(address)
    }

    /// User-defined symbols in address order, for listings.
    pub fn user_symbols(&self) -> Vec<(&str, u16)> {
        let mut out: Vec<(&str, u16)> = self
            .symbols
            .iter()
            .filter(|(name, _)| !is_predefined(name))
            .map(|(name, address)| (name.as_str(), *address))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        out
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

fn is_predefined(name: &str) -> bool {
    PREDEFINED.iter().any(|&(p, _)| p == name)
}

/// Unknown names that read the same upper-cased are taken to be labels.
pub fn is_label_name(name: &str) -> bool {
    name.to_uppercase() == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined() {
        let table = SymbolTable::new();
        for i in 0..16 {
            assert_eq!(table.resolve(&format!("R{}", i)), Some(i));
        }
        assert_eq!(table.resolve("SCREEN"), Some(16384));
        assert_eq!(table.resolve("KBD"), Some(24576));
        assert_eq!(table.resolve("SP"), Some(0));
        assert_eq!(table.resolve("LCL"), Some(1));
        assert_eq!(table.resolve("ARG"), Some(2));
        assert_eq!(table.resolve("THIS"), Some(3));
        assert_eq!(table.resolve("THAT"), Some(4));

        // Case-sensitive.
        assert_eq!(table.resolve("r0"), None);
        assert_eq!(table.resolve("screen"), None);
        assert!(table.user_symbols().is_empty());
    }

    #[test]
    fn test_validate() {
        let table = SymbolTable::new();
        assert!(table.validate("i"));
        assert!(table.validate("LOOP"));
        assert!(table.validate("_tmp"));
        assert!(table.validate("$ret"));
        assert!(table.validate(".local"));
        assert!(table.validate(":x"));
        assert!(table.validate("Main.loop$1"));
        assert!(table.validate("R15"));

        assert!(!table.validate(""));
        assert!(!table.validate("2cool"));
        assert!(!table.validate("9"));
        assert!(!table.validate("a-b"));
        assert!(!table.validate("a+1"));
        assert!(!table.validate("é"));
        assert!(!table.validate("-1"));
    }

    #[test]
    fn test_bind_first_wins() {
        let mut table = SymbolTable::new();
        assert!(table.bind("LOOP", 4));
        assert!(!table.bind("LOOP", 10));
        assert_eq!(table.resolve("LOOP"), Some(4));

        assert!(!table.bind("SP", 99));
        assert_eq!(table.resolve("SP"), Some(0));
    }

    #[test]
    fn test_allocate_variable() {
        let mut table = SymbolTable::new();
        assert_eq!(table.allocate_variable("i"), Some(16));
        assert_eq!(table.allocate_variable("sum"), Some(17));
        assert_eq!(table.allocate_variable("n"), Some(18));
        assert_eq!(table.resolve("i"), Some(16));
        assert_eq!(table.resolve("sum"), Some(17));
        assert_eq!(
            table.user_symbols(),
            vec![("i", 16), ("sum", 17), ("n", 18)]
        );
    }

    #[test]
    fn test_allocate_exhausted() {
        let mut table = SymbolTable::new();
        for i in VARIABLE_BASE..=MAX_ADDRESS {
            assert_eq!(table.allocate_variable(&format!("v{}", i)), Some(i));
        }
        assert_eq!(table.allocate_variable("overflow"), None);
        assert!(!table.contains("overflow"));
    }

    #[test]
    fn test_is_label_name() {
        assert!(is_label_name("LOOP"));
        assert!(is_label_name("END_2"));
        assert!(is_label_name("_"));
        assert!(!is_label_name("loop"));
        assert!(!is_label_name("Loop"));
        assert!(!is_label_name("i"));
    }
}
