//! Provide the canonical Swift vocabulary shared by the mockgen lexer, parser and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains const registry tables and pure lookup
//! helpers; it never touches source text beyond comparing spellings.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no syntax-tree types.
//! - Callers work with stable IDs (`KeywordId`, `ContextualId`, `PunctuationId`, `Ownership`) instead of
//!   scattering string comparisons across the frontend.

pub mod lang;
