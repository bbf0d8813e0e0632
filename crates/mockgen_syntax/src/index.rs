//! Compiler structure index (SourceKit `editor.open` / `structure` style JSON).
//!
//! The index supplies the coarse skeleton of a file: one entry per declaration with its kind, name, byte
//! range and a few facts the grammars cannot see (inferred types, setter visibility, attributes). The
//! [`crate::builder::IndexedFileBuilder`] turns it into an element tree.
//!
//! ## Examples
//!
//! ```rust
//! use mockgen_syntax::index::{EntryKind, StructureIndex};
//!
//! let json = r#"{"key.substructure": [
//!     {"key.kind": "source.lang.swift.decl.var.instance", "key.name": "x",
//!      "key.typename": "Int", "key.offset": 0, "key.length": 10}
//! ]}"#;
//! let index = StructureIndex::from_json(json).unwrap();
//! assert_eq!(index.substructure[0].entry_kind(), EntryKind::Variable { is_static: false });
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::{Span, TypeDeclarationKind};

/// Attribute kind the index reports for `weak`/`unowned` reference ownership.
pub const WEAK_ATTRIBUTE: &str = "source.decl.attribute.weak";

const DECL_PREFIX: &str = "source.lang.swift.decl.";

/// Errors raised while reading or applying a structure index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("malformed structure index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index entry `{kind}` range {start}..{end} is not a valid slice of the {len}-byte source")]
    InvalidRange {
        kind: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// Root of a structure index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureIndex {
    #[serde(rename = "key.offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(rename = "key.length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(rename = "key.substructure", default)]
    pub substructure: Vec<IndexEntry>,
}

impl StructureIndex {
    pub fn from_json(json: &str) -> Result<Self, IndexError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One declaration (or other construct) in the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "key.kind")]
    pub kind: String,
    #[serde(rename = "key.name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "key.typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(rename = "key.offset")]
    pub offset: usize,
    #[serde(rename = "key.length")]
    pub length: usize,
    #[serde(rename = "key.nameoffset", default, skip_serializing_if = "Option::is_none")]
    pub name_offset: Option<usize>,
    #[serde(rename = "key.namelength", default, skip_serializing_if = "Option::is_none")]
    pub name_length: Option<usize>,
    #[serde(rename = "key.bodyoffset", default, skip_serializing_if = "Option::is_none")]
    pub body_offset: Option<usize>,
    #[serde(rename = "key.bodylength", default, skip_serializing_if = "Option::is_none")]
    pub body_length: Option<usize>,
    #[serde(rename = "key.accessibility", default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
    /// Present only for settable properties.
    #[serde(rename = "key.setter_accessibility", default, skip_serializing_if = "Option::is_none")]
    pub setter_accessibility: Option<String>,
    #[serde(rename = "key.attributes", default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<IndexAttribute>,
    #[serde(rename = "key.inheritedtypes", default, skip_serializing_if = "Vec::is_empty")]
    pub inherited_types: Vec<InheritedTypeName>,
    #[serde(rename = "key.substructure", default, skip_serializing_if = "Vec::is_empty")]
    pub substructure: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexAttribute {
    #[serde(rename = "key.attribute")]
    pub attribute: String,
    #[serde(rename = "key.offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(rename = "key.length", default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InheritedTypeName {
    #[serde(rename = "key.name")]
    pub name: String,
}

/// What an index entry becomes in the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Type(TypeDeclarationKind),
    Function { is_static: bool },
    Subscript,
    Variable { is_static: bool },
    /// Locals, parameters, enum elements, expressions and anything unknown.
    Other,
}

impl EntryKind {
    /// Map a `key.kind` string.
    pub fn from_kind(kind: &str) -> Self {
        let Some(decl) = kind.strip_prefix(DECL_PREFIX) else {
            return EntryKind::Other;
        };
        match decl {
            "class" => EntryKind::Type(TypeDeclarationKind::Class),
            "struct" => EntryKind::Type(TypeDeclarationKind::Struct),
            "enum" => EntryKind::Type(TypeDeclarationKind::Enum),
            "protocol" => EntryKind::Type(TypeDeclarationKind::Protocol),
            "actor" => EntryKind::Type(TypeDeclarationKind::Actor),
            d if d == "extension" || d.starts_with("extension.") => EntryKind::Type(TypeDeclarationKind::Extension),
            "function.method.instance" | "function.free" | "function.constructor" => {
                EntryKind::Function { is_static: false }
            }
            "function.method.static" | "function.method.class" => EntryKind::Function { is_static: true },
            d if d.starts_with("function.operator") => EntryKind::Function { is_static: false },
            "function.subscript" => EntryKind::Subscript,
            "var.instance" | "var.global" => EntryKind::Variable { is_static: false },
            "var.static" | "var.class" => EntryKind::Variable { is_static: true },
            _ => EntryKind::Other,
        }
    }
}

impl IndexEntry {
    pub fn entry_kind(&self) -> EntryKind {
        EntryKind::from_kind(&self.kind)
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.offset.saturating_add(self.length))
    }

    pub fn name_span(&self) -> Option<Span> {
        let start = self.name_offset?;
        Some(Span::new(start, start.saturating_add(self.name_length?)))
    }

    /// Return `true` if any attribute is the weak/unowned ownership attribute.
    pub fn has_weak_attribute(&self) -> bool {
        self.attributes.iter().any(|a| a.attribute == WEAK_ATTRIBUTE)
    }

    /// The entry's span, checked to be an in-bounds slice of `source` on char boundaries.
    pub fn checked_span(&self, source: &str) -> Result<Span, IndexError> {
        let span = self.span();
        if span.slice(source).is_some() {
            Ok(span)
        } else {
            Err(IndexError::InvalidRange {
                kind: self.kind.clone(),
                start: span.start,
                end: span.end,
                len: source.len(),
            })
        }
    }
}
