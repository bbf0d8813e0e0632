//! Swift vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, contextual keywords,
//! punctuation, and reference-ownership qualifiers.
//!
//! The design goal is to avoid stringly-typed checks scattered across the lexer/parser/builders.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `ContextualId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no syntax-tree types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use (diagnostics,
//!   outlines, rescans).
//!
//! ## Examples
//! ```rust
//! use mockgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("func"), Some(KeywordId::Func));
//! assert_eq!(keywords::as_str(KeywordId::Func), "func");
//! ```

pub mod contextual;
pub mod keywords;
pub mod ownership;
pub mod punctuation;
