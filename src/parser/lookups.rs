use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::ast::{is_unary_symbol, unary_key};

/// Canonical operator precedence levels, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Precedence {
    Assignment,
    LogicalOr,
    LogicalAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
}

impl Precedence {
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<Precedence> for u8 {
    fn from(precedence: Precedence) -> Self {
        precedence.level()
    }
}

/// Maps operator symbols to binding strength (the higher, the tighter).
///
/// Unary overloads are stored under their [`unary_key`]. A table is an
/// immutable value once built; callers targeting another language derive
/// their own table with [`with`](PrecedenceTable::with) instead of changing
/// [`DEFAULT_PRECEDENCE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceTable {
    levels: HashMap<String, u8>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        PrecedenceTable::default()
    }

    /// Level of `symbol`. Word operators are matched case-insensitively.
    pub fn get(&self, symbol: &str) -> Option<u8> {
        match self.levels.get(symbol) {
            Some(level) => Some(*level),
            None if symbol.chars().any(|c| c.is_ascii_uppercase()) => {
                self.levels.get(&symbol.to_ascii_lowercase()).copied()
            }
            None => None,
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Copy of this table with `symbol` set to `level`.
    pub fn with(mut self, symbol: &str, level: impl Into<u8>) -> Self {
        self.insert(symbol, level);
        self
    }

    pub fn insert(&mut self, symbol: &str, level: impl Into<u8>) -> Option<u8> {
        self.levels.insert(symbol.to_string(), level.into())
    }

    pub fn remove(&mut self, symbol: &str) -> Option<u8> {
        self.levels.remove(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level of an operator as it occurs on the parser stack. Unary
    /// operators missing from the table bind like [`Precedence::Unary`].
    pub fn operator_level(&self, symbol: &str) -> Option<u8> {
        self.get(symbol).or_else(|| {
            if is_unary_symbol(symbol) {
                Some(Precedence::Unary.level())
            } else {
                None
            }
        })
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for PrecedenceTable {
    fn from_iter<T: IntoIterator<Item = (S, u8)>>(iter: T) -> Self {
        PrecedenceTable {
            levels: iter
                .into_iter()
                .map(|(symbol, level)| (symbol.into(), level))
                .collect(),
        }
    }
}

fn create_default_table() -> PrecedenceTable {
    let mut table = PrecedenceTable::new();

    // Assignment
    table.insert("<-", Precedence::Assignment);
    table.insert(":=", Precedence::Assignment);

    // Logical
    table.insert("or", Precedence::LogicalOr);
    table.insert("||", Precedence::LogicalOr);
    table.insert("and", Precedence::LogicalAnd);
    table.insert("&&", Precedence::LogicalAnd);

    // Bitwise
    table.insert("|", Precedence::BitOr);
    table.insert("^", Precedence::BitXor);
    table.insert("xor", Precedence::BitXor);
    table.insert("&", Precedence::BitAnd);

    // Comparison
    for symbol in ["=", "==", "<>", "!="] {
        table.insert(symbol, Precedence::Equality);
    }
    for symbol in ["<", ">", "<=", ">="] {
        table.insert(symbol, Precedence::Relational);
    }

    for symbol in ["shl", "<<", "shr", ">>", ">>>"] {
        table.insert(symbol, Precedence::Shift);
    }

    // Additive and multiplicative
    table.insert("+", Precedence::Additive);
    table.insert("-", Precedence::Additive);
    for symbol in ["*", "/", "div", "mod", "%"] {
        table.insert(symbol, Precedence::Multiplicative);
    }

    // Prefix
    table.insert("not", Precedence::Unary);
    table.insert("!", Precedence::Unary);
    for symbol in ["+", "-", "*", "&"] {
        table.insert(&unary_key(symbol), Precedence::Unary);
    }

    // Index and member access
    table.insert("[]", Precedence::Postfix);
    table.insert(".", Precedence::Postfix);

    table
}

lazy_static! {
    /// The canonical table, built on first use and never modified afterwards.
    pub static ref DEFAULT_PRECEDENCE: PrecedenceTable = create_default_table();
}
