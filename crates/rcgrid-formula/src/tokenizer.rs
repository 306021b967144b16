//! Expression tokenizer
//!
//! Splits expression text into [`Token`]s on demand. At each position the first
//! matching category wins: number, cell reference, identifier, operator. Cell
//! reference recognition is greedy: any word starting with `R` must continue as
//! a valid `R<row>C<col>` reference or tokenization fails, there is no fallback
//! to identifier.

use crate::error::{FormulaError, FormulaResult};

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input, returned repeatedly once the text is exhausted
    End,
    /// Unsigned integer literal
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LeftParen,
    RightParen,
    Comma,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    LessThan,
    GreaterThan,
    /// Bare word, including the keywords `and`, `or`, `not`, `if`
    Identifier,
    /// `R<row>C<col>` with absolute or `[relative]` parts
    CellRef,
}

/// A token and the slice of input it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, lexeme: &'a str) -> Self {
        Self { kind, lexeme }
    }

    /// Whether this is the identifier `word`
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == word
    }
}

/// Forward-only tokenizer over one expression
///
/// There is no rewind; tokenizing the same text again requires a new tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            done: false,
        }
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the next token, skipping leading whitespace
    pub fn next_token(&mut self) -> FormulaResult<Token<'a>> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::End, ""));
        };

        if c.is_ascii_digit() {
            return Ok(self.scan_number());
        }
        if c == b'R' {
            return self.scan_cell_reference();
        }
        if c.is_ascii_alphabetic() {
            return Ok(self.scan_identifier());
        }
        self.scan_operator()
    }

    // === Scanners ===

    fn scan_number(&mut self) -> Token<'a> {
        let start = self.pos;
        self.skip_digits();
        Token::new(TokenKind::Number, &self.input[start..self.pos])
    }

    fn scan_cell_reference(&mut self) -> FormulaResult<Token<'a>> {
        let start = self.pos;
        self.pos += 1; // R

        self.scan_reference_part("row")?;

        if self.peek() != Some(b'C') {
            return Err(FormulaError::lexical(
                self.pos,
                "invalid cell reference (missing C)",
            ));
        }
        self.pos += 1;

        self.scan_reference_part("column")?;

        Ok(Token::new(TokenKind::CellRef, &self.input[start..self.pos]))
    }

    fn scan_reference_part(&mut self, part: &str) -> FormulaResult<()> {
        if self.peek() == Some(b'[') {
            self.pos += 1;
            if self.peek() == Some(b'-') {
                self.pos += 1;
            }
            if self.skip_digits() == 0 {
                return Err(FormulaError::lexical(
                    self.pos,
                    format!("invalid relative {part} reference"),
                ));
            }
            if self.peek() != Some(b']') {
                return Err(FormulaError::lexical(
                    self.pos,
                    format!("invalid relative {part} reference (missing ']')"),
                ));
            }
            self.pos += 1;
        } else if self.skip_digits() == 0 {
            return Err(FormulaError::lexical(
                self.pos,
                format!("invalid absolute {part} reference"),
            ));
        }
        Ok(())
    }

    fn scan_identifier(&mut self) -> Token<'a> {
        let start = self.pos;
        self.pos += 1;
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.pos += 1;
        }
        Token::new(TokenKind::Identifier, &self.input[start..self.pos])
    }

    fn scan_operator(&mut self) -> FormulaResult<Token<'a>> {
        let start = self.pos;
        let kind = match self.input.as_bytes()[start] {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b',' => TokenKind::Comma,
            b'<' => TokenKind::LessThan,
            b'>' => TokenKind::GreaterThan,
            b'=' if self.peek_at(1) == Some(b'=') => TokenKind::Equal,
            b'!' if self.peek_at(1) == Some(b'=') => TokenKind::NotEqual,
            _ => {
                let c = self.input[start..].chars().next().unwrap_or_default();
                return Err(FormulaError::lexical(
                    start,
                    format!("unexpected character '{c}'"),
                ));
            }
        };

        self.pos += match kind {
            TokenKind::Equal | TokenKind::NotEqual => 2,
            _ => 1,
        };
        Ok(Token::new(kind, &self.input[start..self.pos]))
    }

    // === Helper methods ===

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance over ASCII digits, returning how many were skipped
    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }
}

/// Yields every token up to and including `End`, or stops after the first error
impl<'a> Iterator for Tokenizer<'a> {
    type Item = FormulaResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if !matches!(&token, Ok(t) if t.kind != TokenKind::End) {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input)
            .map(|t| t.unwrap().kind)
            .collect()
    }

    fn lexemes(input: &str) -> Vec<&str> {
        Tokenizer::new(input)
            .map(|t| t.unwrap().lexeme)
            .collect()
    }

    #[test]
    fn test_numbers() {
        let mut t = Tokenizer::new("123 45");
        assert_eq!(t.next_token().unwrap(), Token::new(TokenKind::Number, "123"));
        assert_eq!(t.next_token().unwrap(), Token::new(TokenKind::Number, "45"));
        assert_eq!(t.next_token().unwrap().kind, TokenKind::End);
    }

    #[test]
    fn test_end_is_sticky() {
        let mut t = Tokenizer::new("  ");
        for _ in 0..3 {
            assert_eq!(t.next_token().unwrap(), Token::new(TokenKind::End, ""));
        }
    }

    #[test]
    fn test_cell_references() {
        assert_eq!(
            lexemes("R5C3 R[-1]C[0] R[-1]C3 R12C[4]"),
            vec!["R5C3", "R[-1]C[0]", "R[-1]C3", "R12C[4]", ""]
        );
        assert!(kinds("R5C3 R[-1]C[0]")[..2]
            .iter()
            .all(|k| *k == TokenKind::CellRef));
    }

    #[test]
    fn test_identifiers() {
        let mut t = Tokenizer::new("sum avg if and or not foo123 a_b");
        for expected in ["sum", "avg", "if", "and", "or", "not", "foo123", "a_b"] {
            let tok = t.next_token().unwrap();
            assert_eq!(tok, Token::new(TokenKind::Identifier, expected));
        }
        assert_eq!(t.next_token().unwrap().kind, TokenKind::End);
    }

    #[test]
    fn test_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("+-*/%(),==!=<>"),
            vec![
                Plus,
                Minus,
                Star,
                Slash,
                Percent,
                LeftParen,
                RightParen,
                Comma,
                Equal,
                NotEqual,
                LessThan,
                GreaterThan,
                End
            ]
        );
    }

    #[test]
    fn test_number_stops_before_letters() {
        assert_eq!(lexemes("12abc"), vec!["12", "abc", ""]);
    }

    #[test]
    fn test_identifier_starting_with_r_is_greedy() {
        let err = Tokenizer::new("Result").next_token().unwrap_err();
        assert!(matches!(err, FormulaError::Lexical { position: 1, .. }));
    }

    #[test]
    fn test_malformed_references() {
        for input in ["R[1C2", "R1", "R1X2", "R[]C1", "R[-]C1", "RC1", "R1C", "R1C[2"] {
            let result = Tokenizer::new(input).next_token();
            assert!(
                matches!(result, Err(FormulaError::Lexical { .. })),
                "{input} should fail, got {result:?}"
            );
        }
    }

    #[test]
    fn test_lexical_errors() {
        for input in ["=", "!", "= =", "<=", "#", "1 ^ 2", "é"] {
            let result: FormulaResult<Vec<_>> = Tokenizer::new(input).collect();
            assert!(
                matches!(result, Err(FormulaError::Lexical { .. })),
                "{input} should fail"
            );
        }
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results: Vec<_> = Tokenizer::new("1 # 2").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
