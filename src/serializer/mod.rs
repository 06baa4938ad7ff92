//! Serializer module.
//!
//! Writes expression trees as display text or as token lists for code
//! generators, parenthesizing according to a caller-supplied
//! [`PrecedenceTable`](crate::parser::lookups::PrecedenceTable).

pub mod serializer;
