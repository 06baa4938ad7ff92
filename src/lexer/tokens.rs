use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Words that lex as something other than a plain identifier.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::Operator);
        map.insert("or", TokenKind::Operator);
        map.insert("not", TokenKind::Operator);
        map.insert("xor", TokenKind::Operator);
        map.insert("div", TokenKind::Operator);
        map.insert("mod", TokenKind::Operator);
        map.insert("shl", TokenKind::Operator);
        map.insert("shr", TokenKind::Operator);
        map.insert("true", TokenKind::Boolean);
        map.insert("false", TokenKind::Boolean);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Number,
    /// String or character literal, quotes included
    String,
    Boolean,

    Operator,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Comma,
    Colon,

    /// Any other single character
    Symbol,
}

impl TokenKind {
    /// Classifies a bare token text the way the tokenizer would.
    pub fn classify(text: &str) -> TokenKind {
        if let Some(kind) = RESERVED_LOOKUP.get(text) {
            return *kind;
        }

        match text {
            "(" => return TokenKind::OpenParen,
            ")" => return TokenKind::CloseParen,
            "[" => return TokenKind::OpenBracket,
            "]" => return TokenKind::CloseBracket,
            "{" => return TokenKind::OpenCurly,
            "}" => return TokenKind::CloseCurly,
            "," => return TokenKind::Comma,
            ":" => return TokenKind::Colon,
            _ => {}
        }

        let mut chars = text.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => TokenKind::Number,
            Some('"') | Some('\'') => TokenKind::String,
            Some(c) if c.is_alphabetic() || c == '_' => TokenKind::Identifier,
            _ if OPERATOR_SYMBOLS.contains(&text) => TokenKind::Operator,
            _ => TokenKind::Symbol,
        }
    }

    /// True for tokens that form an operand leaf on their own.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::Boolean
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Non-word operator symbols the tokenizer produces.
pub const OPERATOR_SYMBOLS: &[&str] = &[
    "<-", ":=", "==", "!=", "<>", "<=", ">=", "<<", ">>>", ">>", "&&", "||", "+", "-", "*", "/",
    "%", "<", ">", "=", "!", "&", "|", "^", ".",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Token {
    /// Builds a token from bare text, e.g. one produced by an external splitter.
    pub fn from_text(value: &str) -> Self {
        Token {
            kind: TokenKind::classify(value),
            value: value.to_string(),
            span: Span::default(),
        }
    }

    pub fn is(&self, value: &str) -> bool {
        self.value == value
    }
}
