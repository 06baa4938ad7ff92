use std::fmt::Display;

use thiserror::Error;

use crate::{Position, Span};

/// The single error type surfaced by the tokenizer and the parser.
///
/// Carries the offending token's index and, when the token came out of
/// [`tokenize`](crate::lexer::lexer::tokenize), its byte span in the source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (at token {position})")]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    position: Position,
    span: Option<Span>,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        SyntaxError {
            kind,
            position,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn get_kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_span(&self) -> Option<Span> {
        self.span
    }

    /// Human-readable description without position information.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            SyntaxErrorKind::AdjacentOperands { .. } => "AdjacentOperands",
            SyntaxErrorKind::UnclosedBracket { .. } => "UnclosedBracket",
            SyntaxErrorKind::UnmatchedBracket { .. } => "UnmatchedBracket",
            SyntaxErrorKind::MismatchedBracket { .. } => "MismatchedBracket",
            SyntaxErrorKind::StarvedOperator { .. } => "StarvedOperator",
            SyntaxErrorKind::MisplacedSeparator { .. } => "MisplacedSeparator",
            SyntaxErrorKind::MissingListItem { .. } => "MissingListItem",
            SyntaxErrorKind::EmptyGroup => "EmptyGroup",
            SyntaxErrorKind::InvalidRecordItem { .. } => "InvalidRecordItem",
            SyntaxErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            SyntaxErrorKind::UnterminatedString { .. } => "UnterminatedString",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.kind {
            SyntaxErrorKind::AdjacentOperands { token } => ErrorTip::Suggestion(format!(
                "`{}` follows another operand, is an operator or comma missing?",
                token
            )),
            SyntaxErrorKind::UnclosedBracket { bracket } => ErrorTip::Suggestion(format!(
                "Add the missing closing bracket for `{}`",
                bracket
            )),
            SyntaxErrorKind::UnmatchedBracket { bracket } => ErrorTip::Suggestion(format!(
                "Remove `{}` or add the matching opening bracket",
                bracket
            )),
            SyntaxErrorKind::MismatchedBracket { expected, found } => ErrorTip::Suggestion(
                format!("Expected `{}` but found `{}`", expected, found),
            ),
            SyntaxErrorKind::StarvedOperator {
                operator,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` needs {} operand(s), found {}",
                operator, expected, received
            )),
            SyntaxErrorKind::MisplacedSeparator { .. } => ErrorTip::Suggestion(String::from(
                "A comma is only allowed inside an argument list, index list or initializer",
            )),
            SyntaxErrorKind::MissingListItem { .. } => ErrorTip::Suggestion(String::from(
                "Remove the superfluous comma or supply the missing item",
            )),
            SyntaxErrorKind::EmptyGroup => ErrorTip::None,
            SyntaxErrorKind::InvalidRecordItem { type_name } => ErrorTip::Suggestion(format!(
                "Items of a `{}` initializer must have the form `name: value`",
                type_name
            )),
            SyntaxErrorKind::UnexpectedToken { .. } => ErrorTip::None,
            SyntaxErrorKind::UnterminatedString { .. } => {
                ErrorTip::Suggestion(String::from("Close the literal with a matching quote"))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("two operands in direct sequence: {token:?}")]
    AdjacentOperands { token: String },
    #[error("there are more opening {bracket:?} than closing brackets")]
    UnclosedBracket { bracket: String },
    #[error("{bracket:?} without preceding opening bracket")]
    UnmatchedBracket { bracket: String },
    #[error("mismatched brackets: expected {expected:?}, found {found:?}")]
    MismatchedBracket { expected: String, found: String },
    #[error("too few operands for operator {operator:?}: expected {expected}, received {received}")]
    StarvedOperator {
        operator: String,
        expected: usize,
        received: usize,
    },
    #[error("misplaced {token:?} or missing '(' or '[' or '{{'")]
    MisplacedSeparator { token: String },
    #[error("lost arguments / items / indices for {owner:?}")]
    MissingListItem { owner: String },
    #[error("empty parentheses")]
    EmptyGroup,
    #[error("record initializer {type_name:?} contains an item without component name")]
    InvalidRecordItem { type_name: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unterminated literal starting with {quote:?}")]
    UnterminatedString { quote: String },
}

/// Refused registrations in a [`TypeMap`](crate::type_checker::registry::TypeMap).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("standard type {0:?} cannot be redefined")]
    StandardType(String),
    #[error("anonymous type {0:?} is only registered on demand")]
    AnonymousType(String),
    #[error("type {0:?} is already registered")]
    DuplicateType(String),
    #[error("variable {0:?} is already declared")]
    DuplicateVariable(String),
}
