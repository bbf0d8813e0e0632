//! Lexer for Swift source
//!
//! Handles tokenization including:
//! - Reserved keywords (via `mockgen_core::lang::keywords`) and identifiers (Unicode, `$0`, backticked)
//! - Numeric and string literals (multi-line, raw, interpolated)
//! - Operator runs and punctuation, with `< > ? ! &` always split so type sugar lexes predictably
//! - Line and nested block comments (skipped)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String literal scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
use mockgen_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Swift source code.
///
/// Converts source text into a stream of tokens. The lexer never stops early: unexpected characters become
/// [`TokenKind::Unknown`] tokens and a diagnostic, unterminated literals and comments run to end of input.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// A line break was skipped since the last emitted token
    newline_pending: bool,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            newline_pending: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        let (tokens, errors) = self.tokenize_lossy();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    /// Tokenize the entire source code, returning the tokens together with any diagnostics.
    pub fn tokenize_lossy(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        let eof = Token::new(TokenKind::Eof, Span::new(self.current_pos, self.current_pos))
            .with_newline_before(self.newline_pending);
        self.tokens.push(eof);

        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Whitespace
            '\n' => self.newline_pending = true,
            ' ' | '\t' | '\r' | '\u{000B}' | '\u{000C}' | '\u{FEFF}' => {}

            // Comments
            '/' if self.peek() == Some('/') => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),

            // Punctuation
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            '<' => self.add_punct(PunctuationId::LAngle, start),
            '>' => self.add_punct(PunctuationId::RAngle, start),
            '?' => self.add_punct(PunctuationId::Question, start),
            '!' => self.add_punct(PunctuationId::Bang, start),
            '&' => self.add_punct(PunctuationId::Amp, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '\\' => self.add_punct(PunctuationId::Backslash, start),
            '.' => self.scan_dot(start),
            '-' if self.peek() == Some('>') => {
                self.advance();
                self.add_punct(PunctuationId::Arrow, start);
            }

            // Raw strings and directives
            '#' => {
                if self.raw_string_ahead() {
                    self.scan_raw_string(start);
                } else {
                    self.add_punct(PunctuationId::Hash, start);
                }
            }

            // Strings
            '"' => self.scan_string(start, 0),

            // Operators
            _ if is_operator_char(c) => self.scan_operator(start),

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            '`' => self.scan_backticked(start),
            '_' if !self.peek().is_some_and(is_ident_continue) => self.add_punct(PunctuationId::Underscore, start),
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.errors.push(SyntaxError::lexical(
                    format!("Unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
                self.add_token(TokenKind::Unknown(c), start);
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        let token = Token::new(kind, Span::new(start, self.current_pos)).with_newline_before(self.newline_pending);
        self.newline_pending = false;
        self.tokens.push(token);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Scan `.`, `...`, `..<` and `..`.
    fn scan_dot(&mut self, start: usize) {
        if self.peek() != Some('.') {
            self.add_punct(PunctuationId::Dot, start);
            return;
        }
        self.advance();
        if self.match_char('.') {
            self.add_punct(PunctuationId::Ellipsis, start);
        } else if self.match_char('<') {
            self.add_token(TokenKind::Operator("..<".to_string()), start);
        } else {
            self.add_token(TokenKind::Operator("..".to_string()), start);
        }
    }

    /// Scan a run of operator characters. A lone `=` is punctuation.
    fn scan_operator(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            // A comment opener ends the run.
            if c == '/' && matches!(self.peek_next(), Some('/') | Some('*')) {
                break;
            }
            if !is_operator_char(c) {
                break;
            }
            self.advance();
        }
        let spelling = &self.source[start..self.current_pos];
        if spelling == "=" {
            self.add_punct(PunctuationId::Eq, start);
        } else {
            self.add_token(TokenKind::Operator(spelling.to_string()), start);
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a `/* ... */` comment; block comments nest.
    fn skip_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('/') if self.peek() == Some('*') => {
                    self.advance();
                    depth += 1;
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                }
                Some('\n') => self.newline_pending = true,
                Some(_) => {}
                None => {
                    self.errors.push(
                        SyntaxError::lexical("Unterminated block comment", Span::new(start, self.current_pos))
                            .with_hint("add a closing '*/'"),
                    );
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Look up identifier spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }

    /// Scan `` `name` ``; the token is always an identifier, even for reserved spellings.
    fn scan_backticked(&mut self, start: usize) {
        let name_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c == '`' || c == '\n' {
                break;
            }
            self.advance();
        }
        let name = self.source[name_start..self.current_pos].to_string();
        if !self.match_char('`') {
            self.errors.push(SyntaxError::lexical(
                "Unterminated backticked identifier",
                Span::new(start, self.current_pos),
            ));
        }
        self.add_token(TokenKind::Ident(name), start);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Characters that form operator runs (the single-token punctuation `< > ? ! &` excluded).
fn is_operator_char(c: char) -> bool {
    matches!(c, '/' | '=' | '-' | '+' | '*' | '%' | '|' | '^' | '~')
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

/// Lex a source string, always producing a token stream ending in `Eof`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex_lossy(source: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    Lexer::new(source).tokenize_lossy()
}

// ============================================================================
// TESTS
// ============================================================================
