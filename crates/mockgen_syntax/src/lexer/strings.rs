//! String literal scanning: `"..."`, `"""..."""`, raw `#"..."#` and `\( )` interpolation.
//!
//! The token keeps the literal's contents as written; escapes are not decoded, since structure is all the
//! grammars need.

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::SyntaxError;

impl<'a> Lexer<'a> {
    /// Return `true` if the input after a consumed `#` is `#*"`, i.e. a raw string opener.
    pub(super) fn raw_string_ahead(&self) -> bool {
        self.source[self.current_pos..].trim_start_matches('#').starts_with('"')
    }

    /// Scan a raw string. The first `#` has been consumed.
    pub(super) fn scan_raw_string(&mut self, start: usize) {
        let mut hashes = 1;
        while self.match_char('#') {
            hashes += 1;
        }
        self.advance(); // opening quote
        self.scan_string(start, hashes);
    }

    /// Scan a string literal whose opening `"` has been consumed.
    pub(super) fn scan_string(&mut self, start: usize, hashes: usize) {
        let multiline = self.source[self.current_pos..].starts_with("\"\"");
        if multiline {
            self.advance();
            self.advance();
        }
        let content_start = self.current_pos;
        let (content_end, terminated) = self.string_body(hashes, multiline);
        let contents = self.source[content_start..content_end].to_string();
        if !terminated {
            self.errors.push(
                SyntaxError::lexical("Unterminated string literal", Span::new(start, self.current_pos))
                    .with_hint("add a closing '\"'"),
            );
        }
        self.add_token(TokenKind::String(contents), start);
    }

    /// Consume up to and including the closing delimiter.
    ///
    /// Returns the end offset of the contents and whether the delimiter was found.
    fn string_body(&mut self, hashes: usize, multiline: bool) -> (usize, bool) {
        let quotes = if multiline { "\"\"\"" } else { "\"" };
        let closing = format!("{}{}", quotes, "#".repeat(hashes));
        loop {
            if self.source[self.current_pos..].starts_with(closing.as_str()) {
                let end = self.current_pos;
                for _ in 0..closing.len() {
                    self.advance();
                }
                return (end, true);
            }
            match self.peek() {
                None => return (self.current_pos, false),
                Some('\n') if !multiline => return (self.current_pos, false),
                Some('\\') => {
                    self.advance();
                    self.scan_escape(hashes);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Handle the text after a `\` inside a literal.
    fn scan_escape(&mut self, hashes: usize) {
        let delimiter = &self.source[self.current_pos..];
        if !delimiter.starts_with(&"#".repeat(hashes)) {
            // In a raw string a backslash without its hashes is plain text.
            return;
        }
        for _ in 0..hashes {
            self.advance();
        }
        if self.match_char('(') {
            self.skip_interpolation();
        } else if self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skip an interpolated expression up to its closing `)`, including nested strings.
    fn skip_interpolation(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    self.advance();
                    depth += 1;
                }
                ')' => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '"' => {
                    self.advance();
                    let multiline = self.source[self.current_pos..].starts_with("\"\"");
                    if multiline {
                        self.advance();
                        self.advance();
                    }
                    let (_, terminated) = self.string_body(0, multiline);
                    if !terminated {
                        return;
                    }
                }
                '\n' => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn first(source: &str) -> TokenKind {
        lex(source).unwrap().remove(0).kind
    }

    #[test]
    fn test_plain_and_escaped() {
        assert_eq!(first(r#""hello""#), TokenKind::String("hello".to_string()));
        assert_eq!(first(r#""a \"b\"""#), TokenKind::String(r#"a \"b\""#.to_string()));
    }

    #[test]
    fn test_interpolation_with_nested_string() {
        let tokens = lex(r#""x \(f("y)")) z" next"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String(r#"x \(f("y)")) z"#.to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Ident("next".to_string()));
    }

    #[test]
    fn test_multiline() {
        let source = "\"\"\"\nline \"quoted\"\n\"\"\" after";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("\nline \"quoted\"\n".to_string()));
        assert_eq!(tokens[1].kind, TokenKind::Ident("after".to_string()));
    }

    #[test]
    fn test_raw_string() {
        assert_eq!(first(r##"#"a \n "b" c"#"##), TokenKind::String(r#"a \n "b" c"#.to_string()));
    }

    #[test]
    fn test_unterminated_single_line() {
        let errors = lex("\"abc\nvar").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unterminated string literal"));
    }
}
