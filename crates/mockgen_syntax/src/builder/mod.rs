//! File builders.
//!
//! Two strategies produce the same [`File`] tree:
//! - [`SyntaxFileBuilder`] runs the file grammar over the whole source.
//! - [`IndexedFileBuilder`] follows a compiler [`StructureIndex`](crate::index::StructureIndex) for the
//!   skeleton and runs the member grammars over each entry's token window.
//!
//! Both return [`Parsed`], so members that could not be built are reported instead of aborting the file.

mod indexed;
mod ownership;
mod syntax;

pub use indexed::IndexedFileBuilder;
pub use ownership::ownership_before;
pub use syntax::SyntaxFileBuilder;

use crate::ast::File;
use crate::diagnostics::Parsed;

/// Builds the element tree for one source file.
pub trait FileBuilder {
    fn build(&self, source: &str) -> Parsed<File>;
}
