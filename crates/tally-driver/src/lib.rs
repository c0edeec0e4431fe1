//! Tally Driver Library
//!
//! Runs the evaluation pipeline (lex → parse) and provides the pieces the
//! `tally` binary is built from: diagnostics rendering, logging setup and
//! configuration.

pub mod config;
pub mod diagnostics;
pub mod logging;

use tally_ast::{Node, Span, Token};
use tally_lexer::{LexError, Lexer};
use tally_parser::{ParseError, Parser};
use thiserror::Error;
use tracing::debug;

pub use config::LogConfig;
pub use diagnostics::{describe_error, render_error};

/// Inputs evaluated by `tally demo`.
pub const SAMPLE_INPUTS: &[&str] = &[
    "10 + 3 + 5",
    "10 + 5 - 3a - 1",
    "1 + 3 - 7a + 8",
    "10 + 3 3 + 7",
];

/// Any failure of an evaluation, tagged by the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl EvalError {
    /// Stable diagnostic code for this kind of error.
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::Lex(LexError::InvalidCharacter(..)) => "E0001",
            EvalError::Lex(LexError::NumberOverflow(_)) => "E0002",
            EvalError::Parse(ParseError::UnexpectedEndOfInput) => "E0003",
            EvalError::Parse(ParseError::InvalidToken(..)) => "E0004",
            EvalError::Parse(ParseError::Overflow(_)) => "E0005",
        }
    }
}

/// Evaluates `input` and returns its value.
///
/// A fresh lexer and parser are built for every call; the first error aborts
/// the evaluation.
pub fn evaluate(input: &str) -> Result<i64, EvalError> {
    let tokens = Lexer::new(input).lex()?;
    let value = Parser::new(tokens).parse()?;
    Ok(value)
}

/// Outcome of an evaluation with its intermediate stages kept around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation<'a> {
    pub input: &'a str,
    /// Lexer output. Empty when lexing failed.
    pub tokens: Vec<Node<Token>>,
    pub result: Result<i64, EvalError>,
    /// Source span of whatever caused the error, if it can be pinned down.
    pub error_span: Option<Span>,
}

impl Evaluation<'_> {
    pub fn lexed(&self) -> bool {
        !matches!(self.result, Err(EvalError::Lex(_)))
    }

    pub fn token_values(&self) -> Vec<Token> {
        self.tokens.iter().map(|node| node.value).collect()
    }
}

/// Same pipeline as [`evaluate`], but keeps the spanned tokens and locates
/// the error in the source for diagnostics.
pub fn evaluate_traced(input: &str) -> Evaluation<'_> {
    debug!(target: "tally::driver", input, "evaluating");

    let tokens = match Lexer::new(input).tokenize() {
        Ok(tokens) => tokens,
        Err(err) => {
            let error_span = Some(lex_error_span(input, &err));
            return Evaluation {
                input,
                tokens: Vec::new(),
                result: Err(err.into()),
                error_span,
            };
        }
    };

    let mut parser = Parser::new(tokens.iter().map(|node| node.value).collect());
    let (result, error_span) = match parser.parse() {
        Ok(value) => (Ok(value), None),
        Err(err) => {
            let span = match err {
                // Nothing left to point at; blame the last token we did see.
                ParseError::UnexpectedEndOfInput => tokens.last().map(|node| node.span),
                ParseError::InvalidToken(..) | ParseError::Overflow(_) => parser
                    .position()
                    .checked_sub(1)
                    .and_then(|index| tokens.get(index))
                    .map(|node| node.span),
            };
            (Err(err.into()), span)
        }
    };

    debug!(target: "tally::driver", ?result, "evaluation finished");
    Evaluation {
        input,
        tokens,
        result,
        error_span,
    }
}

fn lex_error_span(input: &str, err: &LexError) -> Span {
    match *err {
        LexError::InvalidCharacter(_, position) => Span::new(position, position + 1),
        LexError::NumberOverflow(start) => {
            let digits = input
                .chars()
                .skip(start)
                .take_while(|ch| ch.is_ascii_digit())
                .count();
            Span::new(start, start + digits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("10 + 3 + 5"), Ok(18));
        assert_eq!(evaluate("10 + 5 - 3"), Ok(12));
        assert_eq!(evaluate("  42  "), Ok(42));
    }

    #[test]
    fn test_evaluate_errors() {
        assert_eq!(
            evaluate("10 + 3 3 + 7"),
            Err(EvalError::Parse(ParseError::InvalidToken(Token::Number(3), 2)))
        );
        assert_eq!(
            evaluate("1 + 2 + abc"),
            Err(EvalError::Lex(LexError::InvalidCharacter('a', 8)))
        );
        assert_eq!(
            evaluate(""),
            Err(EvalError::Parse(ParseError::UnexpectedEndOfInput))
        );
        assert_eq!(
            evaluate("   "),
            Err(EvalError::Parse(ParseError::UnexpectedEndOfInput))
        );
    }

    #[test]
    fn test_lex_error_wins_over_parse_error() {
        // "3 3" alone would be a parse error, but lexing fails first.
        assert_eq!(
            evaluate("3 3 ?"),
            Err(EvalError::Lex(LexError::InvalidCharacter('?', 4)))
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(evaluate("a").unwrap_err().code(), "E0001");
        assert_eq!(evaluate("99999999999999999999").unwrap_err().code(), "E0002");
        assert_eq!(evaluate("1 +").unwrap_err().code(), "E0003");
        assert_eq!(evaluate("1 2").unwrap_err().code(), "E0004");
        assert_eq!(evaluate("9223372036854775807 + 1").unwrap_err().code(), "E0005");
    }

    #[test]
    fn test_traced_success() {
        let evaluation = evaluate_traced("12 - 2");
        assert_eq!(evaluation.result, Ok(10));
        assert_eq!(
            evaluation.token_values(),
            vec![Token::Number(12), Token::Minus, Token::Number(2)]
        );
        assert_eq!(evaluation.error_span, None);
        assert!(evaluation.lexed());
    }

    #[test]
    fn test_traced_spans() {
        assert_eq!(evaluate_traced("1 + 2 + abc").error_span, Some(Span::new(8, 9)));
        assert_eq!(evaluate_traced("10 + 3 3 + 7").error_span, Some(Span::new(7, 8)));
        assert_eq!(evaluate_traced("1 + ").error_span, Some(Span::new(2, 3)));
        assert_eq!(evaluate_traced("").error_span, None);
        assert_eq!(
            evaluate_traced("1 + 99999999999999999999 - 2").error_span,
            Some(Span::new(4, 24))
        );
    }

    #[test]
    fn test_traced_lex_failure_has_no_tokens() {
        let evaluation = evaluate_traced("1 + x");
        assert!(!evaluation.lexed());
        assert!(evaluation.tokens.is_empty());
    }

    #[test]
    fn test_traced_matches_evaluate() {
        for input in SAMPLE_INPUTS {
            assert_eq!(evaluate_traced(input).result, evaluate(input));
        }
    }
}
