//! # Tokenizer/ Lexer
//!
//! Scans a JSON document into a stream of [`Token`]s.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Tokenizer, tokenize};
pub use token::{Token, TokenKind};
