// Functions are organized by categories
pub mod polynomial_ast;

// Re-export all function implementations
pub use polynomial_ast::*;
