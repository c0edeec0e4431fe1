//! # Tally AST
//!
//! Shared data types for the Tally evaluator: the token vocabulary produced
//! by the lexer and consumed by the parser, plus source spans for diagnostics.

use std::fmt;

// =============================================================================
// Source Locations
// =============================================================================

/// Half-open range `[start, end)` of character indices into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} is past its end {}", start, end);
        Self { start, end }
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A value paired with the span it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Node<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { span, value }
    }
}

// =============================================================================
// Tokens
// =============================================================================

/// A single lexical unit of an expression.
///
/// Closed on purpose: every consumer matches exhaustively, so adding an
/// operator here fails to compile until the lexer and parser handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Non-negative integer literal
    Number(i64),
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl Token {
    pub fn is_operator(&self) -> bool {
        match self {
            Token::Number(_) => false,
            Token::Plus | Token::Minus => true,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
        }
    }
}
