use std::fmt::Display;

use crate::{parser::lookups::DEFAULT_PRECEDENCE, serializer::serializer::render, Position};

/// Suffix distinguishing the unary overload of `+`, `-`, `*` and `&`
/// (sign, dereference, address-of) from the binary operator.
pub const UNARY_MARKER: char = '1';

/// Symbol of the index operator `a[i, j]`.
pub const INDEX_OPERATOR: &str = "[]";

/// Symbol of the member access operator `a.b`.
pub const MEMBER_OPERATOR: &str = ".";

/// Operators that may be used as unary prefix in sign position.
pub const OVERLOADED_OPERATORS: [&str; 4] = ["+", "-", "*", "&"];

/// Operators that only exist as unary prefix.
pub const PREFIX_OPERATORS: [&str; 2] = ["not", "!"];

/// Returns the internal symbol for the unary overload of `symbol`.
pub fn unary_key(symbol: &str) -> String {
    format!("{}{}", symbol, UNARY_MARKER)
}

/// Number of operands the operator `symbol` takes; `None` for the index
/// operator, whose operand count depends on the number of indices.
pub fn arity_of(symbol: &str) -> Option<usize> {
    if symbol == INDEX_OPERATOR {
        None
    } else if is_unary_symbol(symbol) {
        Some(1)
    } else {
        Some(2)
    }
}

pub fn is_unary_symbol(symbol: &str) -> bool {
    PREFIX_OPERATORS
        .iter()
        .any(|op| op.eq_ignore_ascii_case(symbol))
        || symbol
            .strip_suffix(UNARY_MARKER)
            .is_some_and(|base| OVERLOADED_OPERATORS.contains(&base))
}

/// Symbol as written in source, i.e. `-1` becomes `-`.
pub fn written_symbol(symbol: &str) -> &str {
    symbol
        .strip_suffix(UNARY_MARKER)
        .filter(|base| OVERLOADED_OPERATORS.contains(base))
        .unwrap_or(symbol)
}

/// Kind of a finished syntax tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    Variable,
    Operator,
    FunctionCall,
    ArrayInitializer,
    RecordInitializer,
    Component,
}

/// Node of an expression syntax tree.
///
/// | Kind | `text` | `children` |
/// |---|---|---|
/// | Literal | the literal | none |
/// | Variable | variable name | none |
/// | Operator | operator symbol | one or two operands, array + indices for `[]` |
/// | FunctionCall | function name | arguments |
/// | ArrayInitializer | `{}` | elements |
/// | RecordInitializer | type name | components |
/// | Component | component name | the value |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionNode {
    pub kind: NodeKind,
    pub text: String,
    pub children: Vec<ExpressionNode>,
    /// Index of the token this node started at
    pub position: Position,
}

impl ExpressionNode {
    pub fn new(
        kind: NodeKind,
        text: impl Into<String>,
        children: Vec<ExpressionNode>,
        position: Position,
    ) -> Self {
        ExpressionNode {
            kind,
            text: text.into(),
            children,
            position,
        }
    }

    pub fn literal(text: impl Into<String>, position: Position) -> Self {
        Self::new(NodeKind::Literal, text, vec![], position)
    }

    pub fn variable(name: impl Into<String>, position: Position) -> Self {
        Self::new(NodeKind::Variable, name, vec![], position)
    }

    pub fn binary(
        symbol: impl Into<String>,
        left: ExpressionNode,
        right: ExpressionNode,
        position: Position,
    ) -> Self {
        Self::new(NodeKind::Operator, symbol, vec![left, right], position)
    }

    /// Builds a unary operator node; `symbol` is the plain symbol (`-`, `not`),
    /// overloaded symbols get the unary marker appended.
    pub fn unary(symbol: &str, operand: ExpressionNode, position: Position) -> Self {
        let text = if OVERLOADED_OPERATORS.contains(&symbol) {
            unary_key(symbol)
        } else {
            symbol.to_string()
        };
        Self::new(NodeKind::Operator, text, vec![operand], position)
    }

    pub fn index(array: ExpressionNode, indices: Vec<ExpressionNode>, position: Position) -> Self {
        let mut children = Vec::with_capacity(indices.len() + 1);
        children.push(array);
        children.extend(indices);
        Self::new(NodeKind::Operator, INDEX_OPERATOR, children, position)
    }

    pub fn function_call(
        name: impl Into<String>,
        arguments: Vec<ExpressionNode>,
        position: Position,
    ) -> Self {
        Self::new(NodeKind::FunctionCall, name, arguments, position)
    }

    pub fn array_initializer(elements: Vec<ExpressionNode>, position: Position) -> Self {
        Self::new(NodeKind::ArrayInitializer, "{}", elements, position)
    }

    pub fn record_initializer(
        type_name: impl Into<String>,
        components: Vec<ExpressionNode>,
        position: Position,
    ) -> Self {
        Self::new(NodeKind::RecordInitializer, type_name, components, position)
    }

    pub fn component(name: impl Into<String>, value: ExpressionNode, position: Position) -> Self {
        Self::new(NodeKind::Component, name, vec![value], position)
    }

    pub fn is_operator(&self) -> bool {
        self.kind == NodeKind::Operator
    }

    pub fn is_unary(&self) -> bool {
        self.is_operator() && is_unary_symbol(&self.text)
    }

    /// Operator symbol as written, i.e. without the unary marker.
    pub fn operator_symbol(&self) -> &str {
        if self.is_unary() {
            written_symbol(&self.text)
        } else {
            &self.text
        }
    }
}

impl Display for ExpressionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(self, &DEFAULT_PRECEDENCE))
    }
}
