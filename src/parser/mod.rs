//! Parser module for building expression trees.
//!
//! This module contains the operator-precedence parser that transforms a
//! stream of tokens into [`ExpressionNode`](crate::ast::ast::ExpressionNode)
//! trees, and the precedence tables it and the serializer share:
//!
//! - Binary, unary and postfix (index, member access) operators
//! - Function calls, array and record initializers
//! - Stop tokens and lists of expressions
//! - Configurable precedence and strictness

pub mod lookups;
pub mod parser;
pub mod pending;
