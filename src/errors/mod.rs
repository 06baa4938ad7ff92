//! Error types and error handling for the expression engine.
//!
//! Every failure of the tokenizer or the parser is a [`SyntaxError`]
//! carrying a human-readable message and the offending token position:
//!
//! - Adjacent operands inside brackets
//! - Unbalanced or mismatched brackets
//! - Operators starved of operands
//! - Misplaced list separators
//!
//! Type registrations refused by a registry are reported as [`RegistryError`].
//!
//! [`SyntaxError`]: errors::SyntaxError
//! [`RegistryError`]: errors::RegistryError

pub mod errors;
