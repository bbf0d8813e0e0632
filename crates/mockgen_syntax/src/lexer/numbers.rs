//! Numeric literal scanning.
//!
//! Covers decimal, hex/octal/binary prefixes, `_` separators, fractions and exponents (`1e-9`, `0x1p+4`).
//! The spelling is kept verbatim; nothing downstream needs the value.

use super::{Lexer, TokenKind};

impl<'a> Lexer<'a> {
    /// Scan a number whose first digit has been consumed.
    pub(super) fn scan_number(&mut self, start: usize) {
        self.scan_digits();

        // `1.5` is a fraction, `1..2` and `x.0.1` are not.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.scan_digits();
        }

        let spelling = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(spelling), start);
    }

    fn scan_digits(&mut self) {
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            self.advance();
            if matches!(c, 'e' | 'E' | 'p' | 'P') && matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
        }
    }
}
