//! Grammar-only file builder.

use super::FileBuilder;
use crate::ast::File;
use crate::config::ParseConfig;
use crate::diagnostics::Parsed;
use crate::parser;

/// Builds the tree by parsing the whole file with the recursive-descent grammars.
///
/// Ownership comes from the `weak`/`unowned` modifiers in front of each declaration, writability from the
/// declaration form (`let`, stored `var`, accessor block, computed getter).
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxFileBuilder {
    config: ParseConfig,
}

impl SyntaxFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }
}

impl FileBuilder for SyntaxFileBuilder {
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    fn build(&self, source: &str) -> Parsed<File> {
        parser::parse_file_with(source, self.config)
    }
}
