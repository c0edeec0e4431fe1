//! Parse error types

use tally_ast::Token;
use thiserror::Error;

/// Positions carried here are operand slots: the zero-based index of the
/// operand the parser was working on when it failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("invalid token '{0}' at operand {1}")]
    InvalidToken(Token, usize),

    #[error("arithmetic overflow at operand {0}")]
    Overflow(usize),
}

pub type ParseResult<T> = Result<T, ParseError>;
