//! Lexical analysis module.
//!
//! The expression engine consumes token streams produced elsewhere; this
//! module provides a regex-driven tokenizer for callers that start from
//! text, plus the [`TokenStream`](stream::TokenStream) cursor the parser
//! reads from.

pub mod lexer;
pub mod stream;
pub mod tokens;
