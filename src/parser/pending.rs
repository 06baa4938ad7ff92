//! Entries of the parser's pending stack.
//!
//! These never leave the parser: a finished tree only ever contains
//! [`ExpressionNode`](crate::ast::ast::ExpressionNode)s.

use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Paren,
    Square,
    Curly,
}

impl BracketKind {
    pub fn from_opener(token: &str) -> Option<BracketKind> {
        match token {
            "(" => Some(BracketKind::Paren),
            "[" => Some(BracketKind::Square),
            "{" => Some(BracketKind::Curly),
            _ => None,
        }
    }

    pub fn from_closer(token: &str) -> Option<BracketKind> {
        match token {
            ")" => Some(BracketKind::Paren),
            "]" => Some(BracketKind::Square),
            "}" => Some(BracketKind::Curly),
            _ => None,
        }
    }

    pub fn opener(&self) -> &'static str {
        match self {
            BracketKind::Paren => "(",
            BracketKind::Square => "[",
            BracketKind::Curly => "{",
        }
    }

    pub fn closer(&self) -> &'static str {
        match self {
            BracketKind::Paren => ")",
            BracketKind::Square => "]",
            BracketKind::Curly => "}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    /// Operator waiting for its operands; unary overloads carry the marker.
    Operator { symbol: String, position: Position },
    /// An open bracket.
    Bracket {
        kind: BracketKind,
        /// Separators seen so far
        separators: usize,
        /// Operand stack height when the bracket was opened
        base: usize,
        position: Position,
    },
    Call { name: String, position: Position },
    ArrayInit { position: Position },
    RecordInit { type_name: String, position: Position },
    /// `name:` inside a record initializer, waiting for its value.
    Component {
        name: String,
        base: usize,
        position: Position,
    },
}

impl Pending {
    /// Operand stack height below which reductions must not reach.
    pub fn floor(&self) -> Option<usize> {
        match self {
            Pending::Bracket { base, .. } | Pending::Component { base, .. } => Some(*base),
            _ => None,
        }
    }
}
