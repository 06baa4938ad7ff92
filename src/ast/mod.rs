/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser and the type
/// descriptors the inference engine works with
///
/// Submodules:
/// - ast: Expression tree nodes and operator symbol helpers
/// - types: Type descriptors
pub mod ast;
pub mod types;

#[cfg(test)]
mod tests;
