pub mod error;
pub mod lexer;

// Re-export all public types from modules
pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use tally_ast::{Node, Span, Token};
