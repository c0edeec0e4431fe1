//! Lexer error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character outside digits, `+`, `-` and space, with its character index.
    #[error("invalid character '{0}' at index {1}")]
    InvalidCharacter(char, usize),

    /// A digit run starting at this index does not fit in an `i64`.
    #[error("number starting at index {0} is too large")]
    NumberOverflow(usize),
}

impl LexError {
    /// Character index the error points at.
    pub fn position(&self) -> usize {
        match self {
            LexError::InvalidCharacter(_, position) | LexError::NumberOverflow(position) => {
                *position
            }
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
