//! Human-readable rendering of evaluation errors.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use tally_ast::Span;
use tally_lexer::LexError;
use tally_parser::ParseError;

use crate::{EvalError, Evaluation};

/// One-line description of `error`, suitable for console output.
pub fn describe_error(error: &EvalError) -> String {
    match error {
        EvalError::Lex(LexError::InvalidCharacter(ch, index)) => {
            format!("Input contained an invalid character at index {}: {}", index, ch)
        }
        EvalError::Lex(LexError::NumberOverflow(index)) => {
            format!("Number starting at index {} does not fit in a 64-bit integer", index)
        }
        EvalError::Parse(ParseError::UnexpectedEndOfInput) => {
            "Unexpected end of input during parsing".to_string()
        }
        EvalError::Parse(ParseError::InvalidToken(token, index)) => {
            format!("Invalid token during parsing at index {}: {}", index, token)
        }
        EvalError::Parse(ParseError::Overflow(index)) => {
            format!("Arithmetic overflow during parsing at index {}", index)
        }
    }
}

fn title(error: &EvalError) -> &'static str {
    match error {
        EvalError::Lex(_) => "Lexical error",
        EvalError::Parse(ParseError::Overflow(_)) => "Arithmetic error",
        EvalError::Parse(_) => "Syntax error",
    }
}

fn label_message(error: &EvalError) -> String {
    match error {
        EvalError::Lex(LexError::InvalidCharacter(ch, _)) => {
            format!("unexpected character {:?}", ch)
        }
        EvalError::Lex(LexError::NumberOverflow(_)) => {
            format!("larger than {}", i64::MAX)
        }
        EvalError::Parse(ParseError::UnexpectedEndOfInput) => {
            "expected a number after this".to_string()
        }
        EvalError::Parse(ParseError::InvalidToken(token, _)) => {
            if token.is_operator() {
                format!("expected a number, found '{}'", token)
            } else {
                format!("expected '+' or '-' before '{}'", token)
            }
        }
        EvalError::Parse(ParseError::Overflow(_)) => {
            "result leaves the 64-bit integer range here".to_string()
        }
    }
}

/// Renders `error` as an annotated source report.
///
/// `span` is the character range to label; without one the report is just
/// a headline.
pub fn render_error(
    error: &EvalError,
    span: Option<Span>,
    filename: &str,
    source: &str,
    color: bool,
) -> String {
    let anchor = span.unwrap_or_default();
    let mut report = Report::build(ReportKind::Error, (filename, anchor.start..anchor.end))
        .with_config(Config::default().with_color(color))
        .with_code(error.code());

    match span {
        Some(span) => {
            report = report.with_message(title(error)).with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(label_message(error))
                    .with_color(Color::Red),
            );
        }
        // No source to point at, so the headline has to say it all.
        None => report = report.with_message(describe_error(error)),
    }

    let mut out = Vec::new();
    match report
        .finish()
        .write((filename, Source::from(source)), &mut out)
    {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        // Writing into a Vec only fails if ariadne itself does; keep the
        // plain description so the error is never lost.
        Err(_) => describe_error(error),
    }
}

impl Evaluation<'_> {
    /// Renders the failure of this evaluation, if any.
    pub fn render(&self, filename: &str, color: bool) -> Option<String> {
        let error = self.result.as_ref().err()?;
        Some(render_error(error, self.error_span, filename, self.input, color))
    }
}
