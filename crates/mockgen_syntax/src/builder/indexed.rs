//! Index-backed file builder.
//!
//! The index decides which declarations exist and where they are; the grammars fill in what the index does
//! not describe (parameters, return types, accessor blocks, inherited-type nodes). Properties keep the
//! index's view of type and writability, and re-read ownership from the source text.

use super::{FileBuilder, ownership_before};
use crate::ast::*;
use crate::config::ParseConfig;
use crate::diagnostics::{ErrorKind, Parsed, SyntaxError};
use crate::index::{EntryKind, IndexEntry, IndexError, StructureIndex};
use crate::lexer::{self, Token};
use crate::parser::Parser;

/// Builds the tree from a [`StructureIndex`] plus the source it describes.
#[derive(Debug, Clone, Default)]
pub struct IndexedFileBuilder {
    index: StructureIndex,
    config: ParseConfig,
}

impl IndexedFileBuilder {
    pub fn new(index: StructureIndex) -> Self {
        Self {
            index,
            config: ParseConfig::default(),
        }
    }

    /// Read the index from SourceKit-style JSON.
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(Self::new(StructureIndex::from_json(json)?))
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }
}

impl FileBuilder for IndexedFileBuilder {
    #[tracing::instrument(skip_all, fields(source_len = source.len(), entries = self.index.substructure.len()))]
    fn build(&self, source: &str) -> Parsed<File> {
        let (tokens, diagnostics) = lexer::lex_lossy(source);
        let mut build = IndexedBuild {
            source,
            tokens: &tokens,
            config: self.config,
            diagnostics,
        };
        let declarations = build.declarations(&self.index.substructure);
        let file = File {
            span: Span::new(0, source.len()),
            text: source.to_string(),
            declarations,
        };
        Parsed::new(file, build.diagnostics)
    }
}

/// State for one build: the source, its tokens, and the diagnostics collected so far.
struct IndexedBuild<'a> {
    source: &'a str,
    tokens: &'a [Token],
    config: ParseConfig,
    diagnostics: Vec<SyntaxError>,
}

impl<'a> IndexedBuild<'a> {
    /// Build the declarations for sibling entries, in offset order.
    fn declarations(&mut self, entries: &[IndexEntry]) -> Vec<Declaration> {
        let mut ordered: Vec<&IndexEntry> = entries.iter().collect();
        ordered.sort_by_key(|entry| entry.offset);
        ordered.into_iter().filter_map(|entry| self.declaration(entry)).collect()
    }

    fn declaration(&mut self, entry: &IndexEntry) -> Option<Declaration> {
        let kind = entry.entry_kind();
        if kind == EntryKind::Other {
            tracing::debug!(kind = %entry.kind, offset = entry.offset, "skipping index entry");
            return None;
        }
        let span = match entry.checked_span(self.source) {
            Ok(span) => span,
            Err(err) => {
                tracing::warn!(error = %err, "skipping index entry with invalid range");
                let at = entry.offset.min(self.source.len());
                self.diagnostics
                    .push(SyntaxError::new(ErrorKind::InvalidRange, err.to_string(), Span::new(at, at)));
                return None;
            }
        };

        match kind {
            EntryKind::Type(kind) => Some(Declaration::Type(self.type_declaration(entry, span, kind))),
            EntryKind::Function { is_static } => self.function(span, is_static).map(Declaration::Function),
            EntryKind::Subscript => self.subscript(span).map(Declaration::Subscript),
            EntryKind::Variable { is_static } => Some(Declaration::Variable(self.variable(entry, span, is_static))),
            EntryKind::Other => None,
        }
    }

    fn parser(&self, window: Span) -> Parser<'a> {
        Parser::windowed(self.source, self.tokens, window).with_config(self.config)
    }

    fn text(&self, span: Span) -> String {
        span.slice(self.source).unwrap_or_default().to_string()
    }

    fn type_declaration(&mut self, entry: &IndexEntry, span: Span, kind: TypeDeclarationKind) -> TypeDeclaration {
        let inherited_types = self.inherited_types(entry, span);
        let members = self.declarations(&entry.substructure);
        TypeDeclaration {
            kind,
            name: entry.name.clone().unwrap_or_default(),
            span,
            text: self.text(span),
            inherited_types,
            members,
        }
    }

    /// Parse the inheritance clause between the entry's name and its body.
    fn inherited_types(&mut self, entry: &IndexEntry, span: Span) -> Vec<TypeIdentifier> {
        let Some(name) = entry.name_span().filter(|name| span.contains(*name)) else {
            tracing::debug!(kind = %entry.kind, offset = entry.offset, "no name range; inherited types skipped");
            return Vec::new();
        };
        let end = entry
            .body_offset
            .filter(|body| (name.end..=span.end).contains(body))
            .unwrap_or(span.end);

        let mut parser = self.parser(Span::new(name.end, end));
        match parser.parse_inheritance() {
            Ok(types) => types,
            Err(err) => {
                self.diagnostics.push(err);
                Vec::new()
            }
        }
    }

    fn function(&mut self, span: Span, is_static: bool) -> Option<FunctionDeclaration> {
        let mut parser = self.parser(span);
        let result = parser.parse_function_declaration();
        self.diagnostics.extend(parser.take_errors());
        match result {
            Ok(mut func) => {
                func.span = span;
                func.text = self.text(span);
                func.is_static |= is_static;
                Some(func)
            }
            Err(err) => {
                self.diagnostics.push(err);
                None
            }
        }
    }

    fn subscript(&mut self, span: Span) -> Option<SubscriptDeclaration> {
        let mut parser = self.parser(span);
        let result = parser.parse_subscript_declaration();
        self.diagnostics.extend(parser.take_errors());
        match result {
            Ok(mut subscript) => {
                subscript.span = span;
                subscript.text = self.text(span);
                Some(subscript)
            }
            Err(err) => {
                self.diagnostics.push(err);
                None
            }
        }
    }

    /// Properties: index facts for name, type and writability; grammar only for child nodes.
    fn variable(&mut self, entry: &IndexEntry, span: Span, is_static: bool) -> VariableDeclaration {
        let mut parser = self.parser(span);
        let (type_annotation, accessors, declared_static) = match parser.parse_variable_declaration() {
            Ok(var) => (var.type_annotation, var.accessors, var.is_static),
            Err(err) => {
                tracing::debug!(error = %err, offset = entry.offset, "property grammar failed; using index facts only");
                (None, None, false)
            }
        };

        let ownership = if entry.has_weak_attribute() {
            ownership_before(self.source, entry.offset)
        } else {
            None
        };

        VariableDeclaration {
            name: entry.name.clone().unwrap_or_default(),
            span,
            text: self.text(span),
            type_name: entry.typename.clone().unwrap_or_default(),
            type_annotation,
            accessors,
            is_writable: entry.setter_accessibility.is_some(),
            ownership,
            is_static: is_static || declared_static,
        }
    }
}
