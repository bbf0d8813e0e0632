//! Token types for the Swift lexer.
//!
//! The lexer uses **registry-backed IDs** for vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! Contextual keywords (`get`, `weak`, `mutating`, ...) stay `Ident` tokens; the parser resolves them through
//! `mockgen_core::lang::contextual` where the grammar allows them.
//!
//! ## Notes
//! - Operators are open-ended in Swift (`<*>`, `|||`), so an `Operator` token carries its spelling.
//! - `< > ? ! &` are always single punctuation tokens; the grammar joins them when they form an operator
//!   name (`func <=(...)`).

use crate::ast::Span;
use mockgen_core::lang::keywords::{self, KeywordId};
use mockgen_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Spelled tokens ==========
    /// Run of operator characters, e.g. `==`, `+=`, `..<`.
    Operator(String),
    /// Identifier; backticks are stripped, so `` `default` `` is `Ident("default")`.
    Ident(String),
    /// Numeric literal as written.
    Number(String),
    /// String literal contents between the delimiters (escapes and interpolations left as written).
    String(String),

    // ========== Special ==========
    /// Character the lexer does not understand (reported as a diagnostic).
    Unknown(char),
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// `true` if at least one line break separates this token from the previous one.
    pub newline_before: bool,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            newline_before: false,
        }
    }

    /// Set the line-break flag.
    pub fn with_newline_before(mut self, newline_before: bool) -> Self {
        self.newline_before = newline_before;
        self
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
