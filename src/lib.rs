#![forbid(unsafe_code)]
//! mockgen: structural Swift parsing for mock generation.
//!
//! This crate is the thin tooling layer over [`mockgen_syntax`]: locating the project the user has open,
//! discovering its Swift sources, and rendering element trees for inspection.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod discovery;
pub mod outline;
pub mod project;

pub use mockgen_syntax::{ast, diagnostics, index, lexer, parser};
pub use mockgen_syntax::{FileBuilder, IndexedFileBuilder, ParseConfig, Parsed, SyntaxFileBuilder};

pub use discovery::{SourceFile, discover_sources};
pub use outline::render_outline;
pub use project::{EnvWorkspacePath, ExplicitWorkspacePath, ProjectPath, ProjectPathFinder, WorkspacePathSource};
