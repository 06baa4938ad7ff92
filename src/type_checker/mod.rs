//! Type inference module.
//!
//! This module makes best-effort type judgements about expression trees
//! against a [`TypeRegistry`](registry::TypeRegistry):
//!
//! - Variables and record initializers are looked up by name
//! - Comparisons and logical operators are boolean
//! - Arithmetic promotes mixed operands to string or floating point
//! - Index and member access descend into array and record types
//!
//! Missing type information never aborts inference; the result is
//! simply unknown.

pub mod inference;
pub mod registry;

#[cfg(test)]
mod tests;
