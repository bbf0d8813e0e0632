//! Contextual keyword vocabulary.
//!
//! Contextual keywords are words with grammatical meaning only in specific positions (`get` inside an
//! accessor block, `weak` before a `var`, ...). They are **not** reserved: the lexer emits them as plain
//! identifiers and the parser checks the spelling through this registry when the position calls for it.
//!
//! ## Examples
//! ```rust
//! use mockgen_core::lang::contextual::{self, ContextualId};
//!
//! assert_eq!(contextual::from_str("willSet"), Some(ContextualId::WillSet));
//! assert!(contextual::is_declaration_modifier(ContextualId::Mutating));
//! ```

/// Stable identifier for contextual keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextualId {
    // Accessors
    Get,
    Set,
    WillSet,
    DidSet,

    // Ownership
    Weak,
    Unowned,
    Safe,
    Unsafe,

    // Declaration modifiers
    Mutating,
    Nonmutating,
    Lazy,
    Final,
    Override,
    Required,
    Convenience,
    Dynamic,
    Optional,
    Indirect,
    Prefix,
    Postfix,
    Infix,
    Open,
    Nonisolated,

    // Effects
    Async,

    // Declarations
    Actor,

    // Type prefixes
    Some,
    AnyExistential,
}

/// Broad grouping for contextual keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextualCategory {
    /// `get`, `set`, `willSet`, `didSet`.
    Accessor,
    /// `weak`, `unowned` and the `safe`/`unsafe` arguments of `unowned(...)`.
    Ownership,
    /// Modifiers that may precede a declaration keyword.
    Modifier,
    /// `async`.
    Effect,
    /// `actor`.
    Declaration,
    /// `some`/`any` before a type.
    TypePrefix,
}

/// Metadata for a contextual keyword.
#[derive(Debug, Clone, Copy)]
pub struct ContextualInfo {
    pub id: ContextualId,
    pub canonical: &'static str,
    pub category: ContextualCategory,
}

/// Registry of all contextual keywords.
pub const CONTEXTUAL_KEYWORDS: &[ContextualInfo] = &[
    info(ContextualId::Get, "get", ContextualCategory::Accessor),
    info(ContextualId::Set, "set", ContextualCategory::Accessor),
    info(ContextualId::WillSet, "willSet", ContextualCategory::Accessor),
    info(ContextualId::DidSet, "didSet", ContextualCategory::Accessor),
    info(ContextualId::Weak, "weak", ContextualCategory::Ownership),
    info(ContextualId::Unowned, "unowned", ContextualCategory::Ownership),
    info(ContextualId::Safe, "safe", ContextualCategory::Ownership),
    info(ContextualId::Unsafe, "unsafe", ContextualCategory::Ownership),
    info(ContextualId::Mutating, "mutating", ContextualCategory::Modifier),
    info(ContextualId::Nonmutating, "nonmutating", ContextualCategory::Modifier),
    info(ContextualId::Lazy, "lazy", ContextualCategory::Modifier),
    info(ContextualId::Final, "final", ContextualCategory::Modifier),
    info(ContextualId::Override, "override", ContextualCategory::Modifier),
    info(ContextualId::Required, "required", ContextualCategory::Modifier),
    info(ContextualId::Convenience, "convenience", ContextualCategory::Modifier),
    info(ContextualId::Dynamic, "dynamic", ContextualCategory::Modifier),
    info(ContextualId::Optional, "optional", ContextualCategory::Modifier),
    info(ContextualId::Indirect, "indirect", ContextualCategory::Modifier),
    info(ContextualId::Prefix, "prefix", ContextualCategory::Modifier),
    info(ContextualId::Postfix, "postfix", ContextualCategory::Modifier),
    info(ContextualId::Infix, "infix", ContextualCategory::Modifier),
    info(ContextualId::Open, "open", ContextualCategory::Modifier),
    info(ContextualId::Nonisolated, "nonisolated", ContextualCategory::Modifier),
    info(ContextualId::Async, "async", ContextualCategory::Effect),
    info(ContextualId::Actor, "actor", ContextualCategory::Declaration),
    info(ContextualId::Some, "some", ContextualCategory::TypePrefix),
    info(ContextualId::AnyExistential, "any", ContextualCategory::TypePrefix),
];

/// Canonical spelling.
pub fn as_str(id: ContextualId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: ContextualId) -> ContextualCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ContextualId) -> &'static ContextualInfo {
    CONTEXTUAL_KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("contextual keyword info missing")
}

/// Lookup by spelling (case-sensitive).
pub fn from_str(s: &str) -> Option<ContextualId> {
    CONTEXTUAL_KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if the word can appear in a declaration's modifier list.
///
/// Ownership words count as modifiers too: `weak var delegate: Delegate?`.
pub fn is_declaration_modifier(id: ContextualId) -> bool {
    matches!(
        category(id),
        ContextualCategory::Modifier | ContextualCategory::Ownership
    ) && !matches!(id, ContextualId::Safe | ContextualId::Unsafe)
}

const fn info(id: ContextualId, canonical: &'static str, category: ContextualCategory) -> ContextualInfo {
    ContextualInfo {
        id,
        canonical,
        category,
    }
}
