//! Structural Swift frontend for mockgen: lexer, grammars, element tree, visitor and file builders.
//!
//! The crate turns Swift source into a typed, span-annotated element tree. Two construction paths feed the
//! same tree:
//! - [`builder::SyntaxFileBuilder`] parses the whole file with the recursive-descent grammars.
//! - [`builder::IndexedFileBuilder`] takes a compiler [`index::StructureIndex`] for the coarse skeleton and
//!   runs the member grammars over each entry's token window for fine structure.
//!
//! ## Notes
//! - This crate is “structure-only”: no name resolution, no type checking.
//! - Vocabulary identity (keywords/contextual keywords/punctuation/ownership) comes from `mockgen_core::lang`.
//!
//! ## Examples
//! ```rust
//! use mockgen_syntax::parser;
//!
//! let ty = parser::parse_type("[String: Int]?").unwrap();
//! assert_eq!(ty.name, "[String:Int]?");
//! ```
//!
//! ## See also
//! - `mockgen_core::lang` for registry-backed vocabulary.

pub mod ast;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod index;
pub mod lexer;
pub mod parser;
pub mod token_helpers;

pub use ast::{ElementRef, File, Span, Visitor};
pub use builder::{FileBuilder, IndexedFileBuilder, SyntaxFileBuilder};
pub use config::ParseConfig;
pub use diagnostics::{ErrorKind, Parsed, SyntaxError};
