//! # Tally Parser
//!
//! Recursive descent parser for flat `+`/`-` expressions. Consumes the
//! token stream once, left to right, folding it into an `i64`.
//!
//! The parser only depends on the token vocabulary in `tally-ast`, never on
//! the lexer itself.

use tally_ast::Token;
use tracing::{debug, trace};

// Module declarations
mod error;
mod parser;

// Re-export public types
pub use error::{ParseError, ParseResult};
pub use parser::Parser;

// =============================================================================
// Tests
// =============================================================================
