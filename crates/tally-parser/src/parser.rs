//! Core Parser struct and folding logic

use super::*;

/// Recursive descent parser that folds `Number ((Plus|Minus) Number)*`
/// into a single value.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    operands: usize,
}

impl Parser {
    /// Creates a new parser from a token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            operands: 0,
        }
    }

    /// Number of tokens consumed so far.
    ///
    /// After a failed parse the offending token sits at `position() - 1`.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Returns the next token and advances past it.
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).copied()?;
        self.current += 1;
        Some(token)
    }

    /// Consumes the next token, which must be a number.
    pub fn expect_number(&mut self) -> ParseResult<i64> {
        let token = self.next_token().ok_or(ParseError::UnexpectedEndOfInput)?;

        match token {
            Token::Number(value) => {
                self.operands += 1;
                Ok(value)
            }
            Token::Plus | Token::Minus => Err(ParseError::InvalidToken(token, self.operands)),
        }
    }

    /// Parses the whole token stream and returns its value.
    pub fn parse(&mut self) -> ParseResult<i64> {
        let mut value = self.expect_number()?;

        while let Some(token) = self.next_token() {
            match token {
                Token::Plus => {
                    let rhs = self.expect_number()?;
                    value = value
                        .checked_add(rhs)
                        .ok_or(ParseError::Overflow(self.operands - 1))?;
                }
                Token::Minus => {
                    let rhs = self.expect_number()?;
                    value = value
                        .checked_sub(rhs)
                        .ok_or(ParseError::Overflow(self.operands - 1))?;
                }
                // Two numbers in a row
                Token::Number(_) => {
                    return Err(ParseError::InvalidToken(token, self.operands));
                }
            }
            trace!(target: "tally::parser", %token, value, "folded operand");
        }

        debug!(target: "tally::parser", value, "parse finished");
        Ok(value)
    }
}
