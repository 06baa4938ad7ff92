use crate::Position;

use super::tokens::Token;

/// A read cursor over an immutable token vector.
///
/// The parser consumes tokens by moving the cursor; whatever it leaves
/// behind (e.g. a stop token) is still available to the caller.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenStream { tokens, pos: 0 }
    }

    /// Builds a stream from bare token texts, dropping whitespace-only entries.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = texts
            .into_iter()
            .filter(|text| !text.as_ref().trim().is_empty())
            .map(|text| Token::from_text(text.as_ref()))
            .collect();

        TokenStream::new(tokens)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Looks `n` tokens past the current one (`peek_nth(0)` equals `peek()`).
    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    pub fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Index of the current token.
    pub fn position(&self) -> Position {
        Position(self.pos as u32)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn token_at(&self, position: Position) -> Option<&Token> {
        self.tokens.get(position.index())
    }

    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}
