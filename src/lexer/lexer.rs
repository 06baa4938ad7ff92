use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{SyntaxError, SyntaxErrorKind},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the current offset wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^(0[xX][0-9a-fA-F]+|0[bB][01]+|[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r#"^("([^"\\]|\\.)*"|'([^'\\]|\\.)*')"#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r#"^["']"#).unwrap(), handler: unterminated_handler },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^(<-|:=|==|!=|<>|<=|>=|<<|>>>|>>|&&|\|\|)").unwrap(), handler: operator_handler },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^[-+*/%<>=!&|^.]").unwrap(), handler: operator_handler },
        RegexPattern { regex: Regex::new(r"^.").unwrap(), handler: fallback_handler },
    ];
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    error: Option<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            error: None,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn push_matched(&mut self, kind: TokenKind, regex: &Regex) {
        let matched = match regex.find(self.remainder()) {
            Some(matched) => matched.as_str(),
            None => return,
        };

        self.push(MK_TOKEN!(
            kind,
            matched.to_string(),
            Span {
                start: self.pos,
                end: self.pos + matched.len(),
            }
        ));
        self.advance_n(matched.len());
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    if let Some(matched) = regex.find(lexer.remainder()) {
        lexer.advance_n(matched.end());
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Number, regex);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::String, regex);
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Operator, regex);
}

fn fallback_handler(lexer: &mut Lexer, regex: &Regex) {
    lexer.push_matched(TokenKind::Symbol, regex);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = match regex.find(lexer.remainder()) {
        Some(value) => value.as_str(),
        None => return,
    };

    let kind = RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(
        kind,
        String::from(value),
        Span {
            start: lexer.pos,
            end: lexer.pos + value.len(),
        }
    ));
    lexer.advance_n(value.len());
}

fn unterminated_handler(lexer: &mut Lexer, regex: &Regex) {
    let quote = regex
        .find(lexer.remainder())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    lexer.error = Some(
        SyntaxError::new(
            SyntaxErrorKind::UnterminatedString {
                quote: quote.clone(),
            },
            Position(lexer.tokens.len() as u32),
        )
        .with_span(Span {
            start: lexer.pos,
            end: lexer.pos + quote.len(),
        }),
    );
    lexer.pos = lexer.source.len();
}

/// Splits `source` into tokens, dropping whitespace.
///
/// Unknown characters become [`TokenKind::Symbol`] tokens so that the parser
/// can decide about them; only an unterminated quote is an error here.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let remaining = lex.remainder();
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(remaining));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            // The fallback pattern matches any character, so this is unreachable for valid UTF-8
            None => break,
        }

        if let Some(error) = lex.error.take() {
            return Err(error);
        }
    }

    Ok(lex.tokens)
}
