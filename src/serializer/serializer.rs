//! Turns expression trees back into text or tokens.
//!
//! Parentheses are only emitted where the supplied precedence table
//! requires them, so the same tree can be written for languages with
//! differing operator orders.

use crate::{
    ast::ast::{ExpressionNode, NodeKind, INDEX_OPERATOR, MEMBER_OPERATOR},
    parser::lookups::PrecedenceTable,
};

/// Binding context a node is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPrecedence {
    /// Top level or a list item: never parenthesized
    Root,
    Level(u8),
    /// Parent level not known: composed operands are always parenthesized
    Unknown,
}

/// Where an operand sits relative to its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    /// Operand of a unary operator
    Single,
    /// Array of an index or record of a member access
    Postfix,
}

trait Emitter {
    fn token(&mut self, text: &str);
    fn space(&mut self);
}

struct TextEmitter {
    text: String,
}

impl Emitter for TextEmitter {
    fn token(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn space(&mut self) {
        self.text.push(' ');
    }
}

struct TokenEmitter<'a> {
    tokens: &'a mut Vec<String>,
}

impl Emitter for TokenEmitter<'_> {
    fn token(&mut self, text: &str) {
        self.tokens.push(text.to_string());
    }

    fn space(&mut self) {}
}

pub fn render(node: &ExpressionNode, table: &PrecedenceTable) -> String {
    render_with_parent(node, table, ParentPrecedence::Root)
}

/// Renders `node` as the operand of an operator of precedence `parent`.
pub fn render_with_parent(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    parent: ParentPrecedence,
) -> String {
    let mut out = TextEmitter {
        text: String::new(),
    };
    write_node(node, table, parent, Side::Single, &mut out);
    out.text
}

pub fn render_tokens(node: &ExpressionNode, table: &PrecedenceTable) -> Vec<String> {
    let mut tokens = vec![];
    append_tokens(node, table, &mut tokens, ParentPrecedence::Root);
    tokens
}

/// Appends the tokens of `node` to `tokens`, parenthesized as needed below
/// an operator of precedence `parent`.
pub fn append_tokens(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    tokens: &mut Vec<String>,
    parent: ParentPrecedence,
) {
    let mut out = TokenEmitter { tokens };
    write_node(node, table, parent, Side::Single, &mut out);
}

fn needs_parens(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    parent: ParentPrecedence,
    side: Side,
) -> bool {
    if !node.is_operator() {
        return false;
    }

    let parent_level = match parent {
        ParentPrecedence::Root => return false,
        ParentPrecedence::Unknown => return true,
        ParentPrecedence::Level(level) => level,
    };

    let Some(level) = table.operator_level(&node.text) else {
        return true;
    };

    match side {
        // One level below member access or index needs no parentheses
        Side::Postfix => level < parent_level && level + 1 != parent_level,
        Side::Left | Side::Single => level < parent_level,
        Side::Right => level <= parent_level,
    }
}

fn write_node<E: Emitter>(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    parent: ParentPrecedence,
    side: Side,
    out: &mut E,
) {
    match node.kind {
        NodeKind::Literal | NodeKind::Variable => out.token(&node.text),
        NodeKind::Operator => write_operator(node, table, parent, side, out),
        NodeKind::FunctionCall => {
            out.token(&node.text);
            out.token("(");
            write_list(&node.children, table, out);
            out.token(")");
        }
        NodeKind::ArrayInitializer => {
            out.token("{");
            write_list(&node.children, table, out);
            out.token("}");
        }
        NodeKind::RecordInitializer => {
            out.token(&node.text);
            out.token("{");
            write_list(&node.children, table, out);
            out.token("}");
        }
        NodeKind::Component => {
            out.token(&node.text);
            out.token(":");
            out.space();
            write_list(&node.children, table, out);
        }
    }
}

fn write_list<E: Emitter>(items: &[ExpressionNode], table: &PrecedenceTable, out: &mut E) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.token(",");
            out.space();
        }
        write_node(item, table, ParentPrecedence::Root, Side::Single, out);
    }
}

fn write_operator<E: Emitter>(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    parent: ParentPrecedence,
    side: Side,
    out: &mut E,
) {
    let parens = needs_parens(node, table, parent, side);
    let inner = inner_precedence(node, table);

    if parens {
        out.token("(");
    }

    match node.children.as_slice() {
        [array, indices @ ..] if node.text == INDEX_OPERATOR => {
            write_node(array, table, inner, Side::Postfix, out);
            out.token("[");
            write_list(indices, table, out);
            out.token("]");
        }
        [operand] => {
            let symbol = node.operator_symbol();
            out.token(symbol);
            // `- -a` must not read as `--a`
            if is_word(symbol)
                || leading_char(operand, table, inner, Side::Single) == symbol.chars().next()
            {
                out.space();
            }
            write_node(operand, table, inner, Side::Single, out);
        }
        [left, right] if node.text == MEMBER_OPERATOR => {
            write_node(left, table, inner, Side::Postfix, out);
            out.token(MEMBER_OPERATOR);
            write_node(right, table, inner, Side::Right, out);
        }
        [left, right] => {
            write_node(left, table, inner, Side::Left, out);
            out.space();
            out.token(&node.text);
            out.space();
            write_node(right, table, inner, Side::Right, out);
        }
        operands => {
            for (i, operand) in operands.iter().enumerate() {
                if i > 0 {
                    out.space();
                    out.token(&node.text);
                    out.space();
                }
                write_node(operand, table, inner, Side::Left, out);
            }
        }
    }

    if parens {
        out.token(")");
    }
}

fn inner_precedence(node: &ExpressionNode, table: &PrecedenceTable) -> ParentPrecedence {
    match table.operator_level(&node.text) {
        Some(level) => ParentPrecedence::Level(level),
        None => ParentPrecedence::Unknown,
    }
}

/// First character `node` is written with in the given context.
fn leading_char(
    node: &ExpressionNode,
    table: &PrecedenceTable,
    parent: ParentPrecedence,
    side: Side,
) -> Option<char> {
    if needs_parens(node, table, parent, side) {
        return Some('(');
    }

    match node.kind {
        NodeKind::Operator => match node.children.as_slice() {
            [_] => node.operator_symbol().chars().next(),
            [first, ..] => {
                let first_side = if node.text == INDEX_OPERATOR || node.text == MEMBER_OPERATOR {
                    Side::Postfix
                } else {
                    Side::Left
                };
                leading_char(first, table, inner_precedence(node, table), first_side)
            }
            [] => None,
        },
        NodeKind::ArrayInitializer => Some('{'),
        _ => node.text.chars().next(),
    }
}

fn is_word(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.chars().all(|c| c.is_alphabetic())
}
