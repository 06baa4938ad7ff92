//! Operator-precedence parser building expression trees from tokens.
//!
//! The parser is a shunting-yard variant: completed subtrees wait on an
//! operand stack while operators, open brackets and call/initializer
//! headers wait on a pending stack until their operands are complete.
//!
//! - `+ - * &` right after an operator, an opening bracket or a comma are
//!   read as unary overloads (sign, dereference, address-of)
//! - `[` turns the preceding operand into the first child of an index node
//! - `name(` opens a function call, `name{` a record initializer and a bare
//!   `{` an array initializer
//! - two operands in sequence at top level start a new expression

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    ast::ast::{
        arity_of, unary_key, written_symbol, ExpressionNode, NodeKind, INDEX_OPERATOR,
        OVERLOADED_OPERATORS, PREFIX_OPERATORS,
    },
    errors::errors::{SyntaxError, SyntaxErrorKind},
    lexer::{
        lexer::tokenize,
        stream::TokenStream,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{Precedence, PrecedenceTable, DEFAULT_PRECEDENCE},
    pending::{BracketKind, Pending},
};

/// Settings shared by all parse calls of a client.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig<'a> {
    pub precedence: &'a PrecedenceTable,
    /// Fail on tokens that fit nowhere instead of skipping them
    pub strict: bool,
}

impl Default for ParserConfig<'_> {
    fn default() -> Self {
        ParserConfig {
            precedence: &DEFAULT_PRECEDENCE,
            strict: false,
        }
    }
}

impl<'a> ParserConfig<'a> {
    pub fn new(precedence: &'a PrecedenceTable) -> Self {
        ParserConfig {
            precedence,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Parses `tokens` with the canonical precedence table.
///
/// Parsing stops in front of the first top-level token contained in
/// `stop_tokens`. Without stop tokens it stops at the first token that fits
/// nowhere once an expression has been read. Identifiers in `known_names`
/// are always variables, even if followed by `(` or `{`.
///
/// Returns the parsed roots, normally exactly one.
pub fn parse(
    tokens: &mut TokenStream,
    stop_tokens: Option<&[&str]>,
    known_names: Option<&HashSet<String>>,
) -> Result<Vec<ExpressionNode>, SyntaxError> {
    parse_with(tokens, stop_tokens, known_names, &ParserConfig::default())
}

pub fn parse_with(
    tokens: &mut TokenStream,
    stop_tokens: Option<&[&str]>,
    known_names: Option<&HashSet<String>>,
    config: &ParserConfig,
) -> Result<Vec<ExpressionNode>, SyntaxError> {
    Parser::new(tokens, config, stop_tokens, known_names).parse()
}

/// Parses a `separator`-delimited list of expressions up to `delimiter`,
/// which is left in the stream.
pub fn parse_list(
    tokens: &mut TokenStream,
    separator: &str,
    delimiter: &str,
    known_names: Option<&HashSet<String>>,
) -> Result<Vec<ExpressionNode>, SyntaxError> {
    let stop_tokens = [separator, delimiter];
    let mut expressions = vec![];

    while tokens.peek().is_some_and(|token| !token.is(delimiter)) {
        let position = tokens.position();
        let items = parse(tokens, Some(&stop_tokens[..]), known_names)?;

        if items.is_empty() {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingListItem {
                    owner: delimiter.to_string(),
                },
                position,
            );
            return Err(match tokens.token_at(position) {
                Some(token) if token.span != Span::default() => error.with_span(token.span),
                _ => error,
            });
        }
        expressions.extend(items);

        if tokens.peek().is_some_and(|token| token.is(separator)) {
            tokens.advance();
        }
    }

    Ok(expressions)
}

/// Tokenizes and parses `source` as a whole.
pub fn parse_text(source: &str) -> Result<Vec<ExpressionNode>, SyntaxError> {
    let mut tokens = TokenStream::new(tokenize(source)?);
    parse(&mut tokens, None, None)
}

pub struct Parser<'a> {
    tokens: &'a mut TokenStream,
    config: &'a ParserConfig<'a>,
    stop_tokens: Option<&'a [&'a str]>,
    known_names: Option<&'a HashSet<String>>,
    pending: Vec<Pending>,
    output: Vec<ExpressionNode>,
    /// Operand stack height at which the current top-level expression starts
    root_base: usize,
    /// True wherever an operand is expected
    sign_position: bool,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: &'a mut TokenStream,
        config: &'a ParserConfig<'a>,
        stop_tokens: Option<&'a [&'a str]>,
        known_names: Option<&'a HashSet<String>>,
    ) -> Self {
        Parser {
            tokens,
            config,
            stop_tokens,
            known_names,
            pending: vec![],
            output: vec![],
            root_base: 0,
            sign_position: true,
            nesting: 0,
        }
    }

    pub fn parse(mut self) -> Result<Vec<ExpressionNode>, SyntaxError> {
        while let Some(token) = self.tokens.peek().cloned() {
            let position = self.tokens.position();

            if self.nesting == 0 && self.is_stop_token(&token) {
                debug!("stop token `{}` at {}", token.value, position);
                break;
            }

            if !self.dispatch(&token, position)? {
                break;
            }
        }

        self.finish()
    }

    /// Handles one token. Returns false if parsing must halt in front of it.
    fn dispatch(&mut self, token: &Token, position: Position) -> Result<bool, SyntaxError> {
        let value = token.value.as_str();

        if let Some(kind) = BracketKind::from_opener(value) {
            match kind {
                BracketKind::Square => self.open_index(position)?,
                BracketKind::Paren => {
                    self.begin_operand(token, position)?;
                    self.open_bracket(kind, position);
                }
                BracketKind::Curly => {
                    self.begin_operand(token, position)?;
                    self.pending.push(Pending::ArrayInit { position });
                    self.open_bracket(kind, position);
                }
            }
            self.tokens.advance();
        } else if let Some(kind) = BracketKind::from_closer(value) {
            self.close_bracket(token, kind, position)?;
            self.tokens.advance();
        } else if token.kind == TokenKind::Comma || value == "," {
            self.separate(token, position)?;
            self.tokens.advance();
        } else if self.is_operator(token) {
            self.operator(token, position)?;
            self.tokens.advance();
        } else if token.kind == TokenKind::Identifier {
            self.identifier(token, position)?;
        } else if token.kind.is_literal() {
            self.begin_operand(token, position)?;
            self.push_operand(ExpressionNode::literal(value, position));
            self.tokens.advance();
        } else {
            return self.unexpected(token, position);
        }

        Ok(true)
    }

    fn identifier(&mut self, token: &Token, position: Position) -> Result<(), SyntaxError> {
        let name = token.value.clone();
        let known = self.known_names.is_some_and(|names| names.contains(&name));
        let next = self.tokens.peek_nth(1).map(|next| next.value.clone());

        match next.as_deref() {
            Some(":") if self.sign_position && self.in_record_body() => {
                self.tokens.advance();
                self.tokens.advance();
                self.pending.push(Pending::Component {
                    name,
                    base: self.output.len(),
                    position,
                });
            }
            Some("(") if !known => {
                self.begin_operand(token, position)?;
                self.tokens.advance();
                self.tokens.advance();
                self.pending.push(Pending::Call { name, position });
                self.open_bracket(BracketKind::Paren, Position(position.0 + 1));
            }
            Some("{") if !known => {
                self.begin_operand(token, position)?;
                self.tokens.advance();
                self.tokens.advance();
                self.pending.push(Pending::RecordInit {
                    type_name: name,
                    position,
                });
                self.open_bracket(BracketKind::Curly, Position(position.0 + 1));
            }
            _ => {
                self.begin_operand(token, position)?;
                self.push_operand(ExpressionNode::variable(name, position));
                self.tokens.advance();
            }
        }

        Ok(())
    }

    fn operator(&mut self, token: &Token, position: Position) -> Result<(), SyntaxError> {
        let symbol = normalize_operator(&token.value);

        if is_prefix_operator(&symbol) {
            self.begin_operand(token, position)?;
            self.pending.push(Pending::Operator { symbol, position });
            return Ok(());
        }

        if self.sign_position {
            if OVERLOADED_OPERATORS.contains(&symbol.as_str()) {
                // Unary operators bind to what follows, nothing to reduce yet
                self.pending.push(Pending::Operator {
                    symbol: unary_key(&symbol),
                    position,
                });
                return Ok(());
            }

            return Err(self.error(
                SyntaxErrorKind::StarvedOperator {
                    operator: symbol,
                    expected: 2,
                    received: 0,
                },
                position,
            ));
        }

        let level = self.level_of(&symbol);
        self.reduce_operators(Some(level))?;
        self.pending.push(Pending::Operator { symbol, position });
        self.sign_position = true;

        Ok(())
    }

    fn open_index(&mut self, position: Position) -> Result<(), SyntaxError> {
        if self.sign_position {
            return Err(self.error(
                SyntaxErrorKind::StarvedOperator {
                    operator: INDEX_OPERATOR.to_string(),
                    expected: 2,
                    received: 0,
                },
                position,
            ));
        }

        self.reduce_operators(Some(self.level_of(INDEX_OPERATOR)))?;
        self.pending.push(Pending::Operator {
            symbol: INDEX_OPERATOR.to_string(),
            position,
        });
        self.open_bracket(BracketKind::Square, position);

        Ok(())
    }

    fn open_bracket(&mut self, kind: BracketKind, position: Position) {
        self.pending.push(Pending::Bracket {
            kind,
            separators: 0,
            base: self.output.len(),
            position,
        });
        self.nesting += 1;
        self.sign_position = true;
    }

    fn separate(&mut self, token: &Token, position: Position) -> Result<(), SyntaxError> {
        if self.nesting == 0 {
            return Err(self.error(
                SyntaxErrorKind::MisplacedSeparator {
                    token: token.value.clone(),
                },
                position,
            ));
        }

        self.reduce_to_bracket()?;

        let (separators, base) = match self.pending.last() {
            Some(Pending::Bracket {
                separators, base, ..
            }) => (*separators, *base),
            _ => {
                return Err(self.error(
                    SyntaxErrorKind::MisplacedSeparator {
                        token: token.value.clone(),
                    },
                    position,
                ))
            }
        };

        if self.output.len().saturating_sub(base) != separators + 1 {
            return Err(self.error(
                SyntaxErrorKind::MissingListItem {
                    owner: self.owner_name(),
                },
                position,
            ));
        }

        if let Some(Pending::Bracket { separators, .. }) = self.pending.last_mut() {
            *separators += 1;
        }
        self.sign_position = true;

        Ok(())
    }

    fn close_bracket(
        &mut self,
        token: &Token,
        kind: BracketKind,
        position: Position,
    ) -> Result<(), SyntaxError> {
        let unmatched = SyntaxErrorKind::UnmatchedBracket {
            bracket: token.value.clone(),
        };
        if self.nesting == 0 {
            return Err(self.error(unmatched, position));
        }

        self.reduce_to_bracket()?;
        let owner = self.owner_name();

        let (open_kind, separators, base, open_position) = match self.pending.pop() {
            Some(Pending::Bracket {
                kind,
                separators,
                base,
                position,
            }) => (kind, separators, base, position),
            other => {
                self.pending.extend(other);
                return Err(self.error(unmatched, position));
            }
        };

        if open_kind != kind {
            return Err(self.error(
                SyntaxErrorKind::MismatchedBracket {
                    expected: open_kind.closer().to_string(),
                    found: token.value.clone(),
                },
                position,
            ));
        }
        self.nesting -= 1;

        let mut items = self.output.split_off(base.min(self.output.len()));
        let complete = items.len() == separators + 1 || (items.is_empty() && separators == 0);
        if !complete {
            return Err(self.error(SyntaxErrorKind::MissingListItem { owner }, position));
        }

        let node = match (kind, self.pending.pop()) {
            (BracketKind::Paren, Some(Pending::Call { name, position })) => {
                ExpressionNode::function_call(name, items, position)
            }
            (BracketKind::Curly, Some(Pending::ArrayInit { position })) => {
                ExpressionNode::array_initializer(items, position)
            }
            (BracketKind::Curly, Some(Pending::RecordInit { type_name, position })) => {
                if let Some(item) = items.iter().find(|item| item.kind != NodeKind::Component) {
                    return Err(self.error(
                        SyntaxErrorKind::InvalidRecordItem { type_name },
                        item.position,
                    ));
                }
                ExpressionNode::record_initializer(type_name, items, position)
            }
            (BracketKind::Square, Some(Pending::Operator { symbol, .. }))
                if symbol == INDEX_OPERATOR =>
            {
                if items.is_empty() {
                    return Err(self.error(
                        SyntaxErrorKind::MissingListItem { owner: symbol },
                        open_position,
                    ));
                }
                let array = match self.output.pop() {
                    Some(array) => array,
                    None => {
                        return Err(self.error(
                            SyntaxErrorKind::StarvedOperator {
                                operator: symbol,
                                expected: 2,
                                received: 1,
                            },
                            open_position,
                        ))
                    }
                };
                let array_position = array.position;
                ExpressionNode::index(array, items, array_position)
            }
            (_, other) => {
                self.pending.extend(other);
                match items.len() {
                    0 => return Err(self.error(SyntaxErrorKind::EmptyGroup, open_position)),
                    1 => items.remove(0),
                    _ => {
                        return Err(self.error(
                            SyntaxErrorKind::MisplacedSeparator {
                                token: ",".to_string(),
                            },
                            open_position,
                        ))
                    }
                }
            }
        };

        debug!(
            "closed `{}{}` into {:?} `{}`",
            kind.opener(),
            kind.closer(),
            node.kind,
            node.text
        );
        self.push_operand(node);

        Ok(())
    }

    fn unexpected(&mut self, token: &Token, position: Position) -> Result<bool, SyntaxError> {
        if self.stop_tokens.is_none() && self.nesting == 0 && !self.output.is_empty() {
            debug!("halting in front of `{}` at {}", token.value, position);
            return Ok(false);
        }

        if self.config.strict {
            return Err(self.error(
                SyntaxErrorKind::UnexpectedToken {
                    token: token.value.clone(),
                },
                position,
            ));
        }

        warn!("skipping unexpected token `{}` at {}", token.value, position);
        self.tokens.advance();
        Ok(true)
    }

    fn finish(mut self) -> Result<Vec<ExpressionNode>, SyntaxError> {
        let unclosed = self.pending.iter().rev().find_map(|pending| match pending {
            Pending::Bracket { kind, position, .. } => Some((*kind, *position)),
            _ => None,
        });
        if let Some((kind, position)) = unclosed {
            return Err(self.error(
                SyntaxErrorKind::UnclosedBracket {
                    bracket: kind.opener().to_string(),
                },
                position,
            ));
        }

        self.reduce_operators(None)?;
        Ok(self.output)
    }

    /// Called before anything that starts an operand.
    fn begin_operand(&mut self, token: &Token, position: Position) -> Result<(), SyntaxError> {
        if self.sign_position {
            return Ok(());
        }

        if self.nesting > 0 {
            return Err(self.error(
                SyntaxErrorKind::AdjacentOperands {
                    token: token.value.clone(),
                },
                position,
            ));
        }

        debug!("`{}` at {} starts a new expression", token.value, position);
        self.reduce_operators(None)?;
        self.root_base = self.output.len();
        self.sign_position = true;

        Ok(())
    }

    fn push_operand(&mut self, node: ExpressionNode) {
        self.output.push(node);
        self.sign_position = false;
    }

    /// Reduces pending operators binding at least as tight as `min_level`,
    /// all of them if `None`.
    fn reduce_operators(&mut self, min_level: Option<u8>) -> Result<(), SyntaxError> {
        while let Some(Pending::Operator { symbol, .. }) = self.pending.last() {
            if min_level.is_some_and(|min| self.level_of(symbol) < min) {
                break;
            }
            if let Some(Pending::Operator { symbol, position }) = self.pending.pop() {
                self.reduce(symbol, position)?;
            }
        }

        Ok(())
    }

    /// Reduces everything above the innermost open bracket.
    fn reduce_to_bracket(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.pending.pop() {
                Some(Pending::Operator { symbol, position }) => self.reduce(symbol, position)?,
                Some(Pending::Component {
                    name,
                    base,
                    position,
                }) => {
                    if self.output.len() != base + 1 {
                        return Err(
                            self.error(SyntaxErrorKind::MissingListItem { owner: name }, position)
                        );
                    }
                    if let Some(value) = self.output.pop() {
                        self.output
                            .push(ExpressionNode::component(name, value, position));
                    }
                }
                other => {
                    self.pending.extend(other);
                    return Ok(());
                }
            }
        }
    }

    fn reduce(&mut self, symbol: String, position: Position) -> Result<(), SyntaxError> {
        let arity = arity_of(&symbol).unwrap_or(2);
        let available = self.output.len().saturating_sub(self.floor());

        if available < arity {
            return Err(self.error(
                SyntaxErrorKind::StarvedOperator {
                    operator: written_symbol(&symbol).to_string(),
                    expected: arity,
                    received: available,
                },
                position,
            ));
        }

        let operands = self.output.split_off(self.output.len() - arity);
        let node_position = if arity == 1 {
            position
        } else {
            operands[0].position
        };

        debug!("reduced `{}` over {} operand(s)", symbol, arity);
        self.output.push(ExpressionNode::new(
            NodeKind::Operator,
            symbol,
            operands,
            node_position,
        ));

        Ok(())
    }

    /// Operand stack height reductions must not reach below.
    fn floor(&self) -> usize {
        self.pending
            .iter()
            .rev()
            .find_map(Pending::floor)
            .unwrap_or(self.root_base)
    }

    fn level_of(&self, symbol: &str) -> u8 {
        self.config
            .precedence
            .operator_level(symbol)
            .unwrap_or(Precedence::Postfix.level())
    }

    /// Operators missing from the active table still parse; `level_of`
    /// binds them like postfix operators.
    fn is_operator(&self, token: &Token) -> bool {
        let value = token.value.as_str();
        let precedence = self.config.precedence;

        token.kind == TokenKind::Operator
            || precedence.contains(value)
            || DEFAULT_PRECEDENCE.contains(value)
            || is_prefix_operator(value)
            || (OVERLOADED_OPERATORS.contains(&value) && precedence.contains(&unary_key(value)))
    }

    fn is_stop_token(&self, token: &Token) -> bool {
        self.stop_tokens
            .is_some_and(|stops| stops.iter().any(|stop| token.is(stop)))
    }

    fn in_record_body(&self) -> bool {
        matches!(
            self.pending.as_slice(),
            [
                ..,
                Pending::RecordInit { .. },
                Pending::Bracket {
                    kind: BracketKind::Curly,
                    ..
                }
            ]
        )
    }

    /// Name of whatever owns the innermost open bracket, for diagnostics.
    fn owner_name(&self) -> String {
        let mut stack = self.pending.iter().rev();

        match (stack.next(), stack.next()) {
            (
                Some(Pending::Bracket {
                    kind: BracketKind::Paren,
                    ..
                }),
                Some(Pending::Call { name, .. }),
            ) => name.clone(),
            (
                Some(Pending::Bracket {
                    kind: BracketKind::Curly,
                    ..
                }),
                Some(Pending::RecordInit { type_name, .. }),
            ) => type_name.clone(),
            (
                Some(Pending::Bracket {
                    kind: BracketKind::Curly,
                    ..
                }),
                Some(Pending::ArrayInit { .. }),
            ) => "{}".to_string(),
            (
                Some(Pending::Bracket {
                    kind: BracketKind::Square,
                    ..
                }),
                Some(Pending::Operator { symbol, .. }),
            ) => symbol.clone(),
            (Some(Pending::Bracket { kind, .. }), _) => kind.opener().to_string(),
            _ => String::new(),
        }
    }

    fn error(&self, kind: SyntaxErrorKind, position: Position) -> SyntaxError {
        let error = SyntaxError::new(kind, position);

        match self.tokens.token_at(position) {
            Some(token) if token.span != Span::default() => error.with_span(token.span),
            _ => error,
        }
    }
}

fn is_prefix_operator(symbol: &str) -> bool {
    PREFIX_OPERATORS
        .iter()
        .any(|prefix| prefix.eq_ignore_ascii_case(symbol))
}

/// Word operators are case-insensitive and kept in lower case.
fn normalize_operator(symbol: &str) -> String {
    if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        symbol.to_ascii_lowercase()
    } else {
        symbol.to_string()
    }
}
