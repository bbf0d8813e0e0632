//! Diagnostics for the Swift frontend.
//!
//! Grammars return `Result<_, SyntaxError>`; builders collect the errors of skipped members into
//! [`Parsed::diagnostics`] instead of aborting. [`SourceDiagnostic`] attaches the source text so a caller can
//! render an error through `miette`.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A structural error with location information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    /// The type grammar found nothing to parse.
    pub fn empty_type(span: Span) -> Self {
        Self::new(ErrorKind::EmptyType, "expected a type", span)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach the source file so the error can be rendered with a labelled snippet.
    pub fn with_source(&self, name: impl AsRef<str>, source: impl Into<String>) -> SourceDiagnostic {
        let help = if self.hints.is_empty() {
            None
        } else {
            Some(self.hints.join("\n"))
        };
        SourceDiagnostic {
            kind: self.kind,
            message: self.message.clone(),
            src: NamedSource::new(name, source.into()),
            span: self.span.into(),
            notes: self.notes.join("; "),
            help,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unexpected character, unterminated literal or comment.
    Lexical,
    /// Grammar could not match at the current position.
    Syntax,
    /// Empty input where a type was required.
    EmptyType,
    /// Nesting deeper than `ParseConfig::max_nesting_depth`.
    RecursionLimit,
    /// Index entry whose byte range does not fit the source.
    InvalidRange,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::EmptyType => write!(f, "empty type"),
            ErrorKind::RecursionLimit => write!(f, "nesting too deep"),
            ErrorKind::InvalidRange => write!(f, "invalid range"),
        }
    }
}

/// A built node plus the diagnostics of everything that was skipped while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub node: T,
    pub diagnostics: Vec<SyntaxError>,
}

impl<T> Parsed<T> {
    pub fn new(node: T, diagnostics: Vec<SyntaxError>) -> Self {
        Self { node, diagnostics }
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// A [`SyntaxError`] bound to its source file, renderable through `miette`.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}: {message}")]
pub struct SourceDiagnostic {
    pub kind: ErrorKind,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{notes}")]
    pub span: SourceSpan,
    pub notes: String,
    #[help]
    pub help: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = SyntaxError::syntax("expected ')'", Span::new(3, 4));
        assert_eq!(err.to_string(), "syntax error: expected ')'");
    }

    #[test]
    fn notes_and_hints_accumulate() {
        let err = SyntaxError::lexical("unterminated string", Span::new(0, 5))
            .with_note("string started here")
            .with_hint("add a closing quote");
        assert_eq!(err.notes, vec!["string started here"]);
        assert_eq!(err.hints, vec!["add a closing quote"]);

        let diag = err.with_source("A.swift", "\"abcd");
        assert_eq!(diag.help.as_deref(), Some("add a closing quote"));
        assert_eq!(diag.span, SourceSpan::from((0, 5)));
    }
}
