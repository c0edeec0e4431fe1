use tally_ast::{Node, Span, Token};
use tracing::{debug, trace};

use crate::error::{LexError, LexResult};

/// Single-pass tokenizer for `+`/`-` expressions.
///
/// Positions are character indices, not byte offsets, so diagnostics line up
/// with what the user typed even for non-ASCII input.
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Creates a new lexer positioned at the start of `input`.
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Current cursor (character index).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the character under the cursor without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Moves the cursor forward by one character.
    pub fn advance(&mut self) {
        debug_assert!(
            self.position < self.chars.len(),
            "cannot advance past the end of input"
        );
        self.position += 1;
    }

    /// Consumes a maximal run of decimal digits and returns its value.
    ///
    /// Must be called with the cursor on a digit. Stops at the first
    /// non-digit without consuming it.
    pub fn scan_number(&mut self) -> LexResult<i64> {
        let start = self.position;
        let mut value: i64 = 0;

        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => {
                    let digit = i64::from(ch as u8 - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or(LexError::NumberOverflow(start))?;
                    self.advance();
                }
                _ => break,
            }
        }

        Ok(value)
    }

    /// Tokenizes the whole input.
    pub fn lex(&mut self) -> LexResult<Vec<Token>> {
        Ok(self.tokenize()?.into_iter().map(|node| node.value).collect())
    }

    /// Tokenizes the whole input, keeping the span of every token.
    pub fn tokenize(&mut self) -> LexResult<Vec<Node<Token>>> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let start = self.position;
            let token = match ch {
                '0'..='9' => Token::Number(self.scan_number()?),
                '+' => {
                    self.advance();
                    Token::Plus
                }
                '-' => {
                    self.advance();
                    Token::Minus
                }
                ' ' => {
                    self.advance();
                    continue;
                }
                _ => {
                    debug!(target: "tally::lexer", character = ?ch, position = start, "invalid character");
                    return Err(LexError::InvalidCharacter(ch, start));
                }
            };

            trace!(target: "tally::lexer", %token, start, end = self.position, "token");
            tokens.push(Node::new(token, Span::new(start, self.position)));
        }

        debug!(target: "tally::lexer", count = tokens.len(), "lexing finished");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> LexResult<Vec<Token>> {
        Lexer::new(source).lex()
    }

    #[test]
    fn test_numbers_and_operators() {
        let tokens = lex("10 + 3 - 5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(10),
                Token::Plus,
                Token::Number(3),
                Token::Minus,
                Token::Number(5),
            ]
        );
    }

    #[test]
    fn test_no_spaces() {
        let tokens = lex("1+22-333").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1),
                Token::Plus,
                Token::Number(22),
                Token::Minus,
                Token::Number(333),
            ]
        );
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(lex("007").unwrap(), vec![Token::Number(7)]);
        assert_eq!(lex("0").unwrap(), vec![Token::Number(0)]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(lex("").unwrap(), Vec::<Token>::new());
        assert_eq!(lex("   ").unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn test_adjacent_numbers_split_by_space() {
        assert_eq!(
            lex("3 3").unwrap(),
            vec![Token::Number(3), Token::Number(3)]
        );
    }

    #[test]
    fn test_operators_without_numbers() {
        assert_eq!(
            lex("+-+").unwrap(),
            vec![Token::Plus, Token::Minus, Token::Plus]
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            lex("1 + 2 + abc"),
            Err(LexError::InvalidCharacter('a', 8))
        );
        assert_eq!(
            lex("10 + 5 - 3a - 1"),
            Err(LexError::InvalidCharacter('a', 10))
        );
    }

    #[test]
    fn test_invalid_character_reports_first_only() {
        assert_eq!(lex("x y"), Err(LexError::InvalidCharacter('x', 0)));
    }

    #[test]
    fn test_other_whitespace_is_invalid() {
        assert_eq!(lex("1\t+ 2"), Err(LexError::InvalidCharacter('\t', 1)));
        assert_eq!(lex("1 + 2\n"), Err(LexError::InvalidCharacter('\n', 5)));
    }

    #[test]
    fn test_positions_count_characters() {
        // 'é' is two bytes in UTF-8 but one character.
        assert_eq!(lex("é1"), Err(LexError::InvalidCharacter('é', 0)));
        assert_eq!(lex("1 é"), Err(LexError::InvalidCharacter('é', 2)));
        assert_eq!(lex("1 é é"), Err(LexError::InvalidCharacter('é', 2)));
    }

    #[test]
    fn test_non_ascii_digits_are_invalid() {
        assert_eq!(lex("١"), Err(LexError::InvalidCharacter('١', 0)));
    }

    #[test]
    fn test_max_number() {
        assert_eq!(
            lex("9223372036854775807").unwrap(),
            vec![Token::Number(i64::MAX)]
        );
    }

    #[test]
    fn test_number_overflow() {
        assert_eq!(
            lex("9223372036854775808"),
            Err(LexError::NumberOverflow(0))
        );
        assert_eq!(
            lex("1 + 99999999999999999999"),
            Err(LexError::NumberOverflow(4))
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("12 +  3").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Node::new(Token::Number(12), Span::new(0, 2)),
                Node::new(Token::Plus, Span::new(3, 4)),
                Node::new(Token::Number(3), Span::new(6, 7)),
            ]
        );
    }

    #[test]
    fn test_relex_is_identical() {
        let source = "10 + 5 - 3";
        assert_eq!(lex(source).unwrap(), lex(source).unwrap());
    }

    #[test]
    fn test_peek_and_advance() {
        let mut lexer = Lexer::new("4+");
        assert_eq!(lexer.peek(), Some('4'));
        assert_eq!(lexer.peek(), Some('4'));
        lexer.advance();
        assert_eq!(lexer.peek(), Some('+'));
        lexer.advance();
        assert_eq!(lexer.peek(), None);
        assert_eq!(lexer.position(), 2);
    }

    #[test]
    fn test_scan_number_stops_at_non_digit() {
        let mut lexer = Lexer::new("123+4");
        assert_eq!(lexer.scan_number(), Ok(123));
        assert_eq!(lexer.position(), 3);
        assert_eq!(lexer.peek(), Some('+'));
    }
}
