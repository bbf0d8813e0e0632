//! Define the reserved keyword vocabulary for Swift source.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings and
//! categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`self` and `Self` are different keywords).
//! - Words that only carry meaning in some positions (`get`, `weak`, `mutating`, ...) are *not* reserved;
//!   see [`crate::lang::contextual`].
//!
//! ## Examples
//! ```rust
//! use mockgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("subscript"), Some(KeywordId::Subscript));
//! assert_eq!(keywords::from_str("Self"), Some(KeywordId::SelfType));
//! assert_eq!(keywords::from_str("get"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Associatedtype,
    Class,
    Deinit,
    Enum,
    Extension,
    Func,
    Import,
    Init,
    Inout,
    Let,
    Operator,
    Precedencegroup,
    Protocol,
    Struct,
    Subscript,
    Typealias,
    Var,

    // Declaration modifiers
    Fileprivate,
    Internal,
    Private,
    Public,
    Static,

    // Effects
    Throws,
    Rethrows,

    // Statements
    Break,
    Case,
    Continue,
    Default,
    Defer,
    Do,
    Else,
    Fallthrough,
    For,
    Guard,
    If,
    In,
    Repeat,
    Return,
    Switch,
    Throw,
    Where,
    While,

    // Expressions
    As,
    Catch,
    False,
    Is,
    Nil,
    Super,
    SelfKw,
    True,
    Try,

    // Types
    Any,
    SelfType,
}

/// High-level grouping for documentation and tooling.
///
/// ## Notes
/// - Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Modifier,
    Effect,
    Statement,
    Expression,
    Type,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Associatedtype, "associatedtype", KeywordCategory::Declaration),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Deinit, "deinit", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Extension, "extension", KeywordCategory::Declaration),
    info(KeywordId::Func, "func", KeywordCategory::Declaration),
    info(KeywordId::Import, "import", KeywordCategory::Declaration),
    info(KeywordId::Init, "init", KeywordCategory::Declaration),
    info(KeywordId::Inout, "inout", KeywordCategory::Declaration),
    info(KeywordId::Let, "let", KeywordCategory::Declaration),
    info(KeywordId::Operator, "operator", KeywordCategory::Declaration),
    info(KeywordId::Precedencegroup, "precedencegroup", KeywordCategory::Declaration),
    info(KeywordId::Protocol, "protocol", KeywordCategory::Declaration),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration),
    info(KeywordId::Subscript, "subscript", KeywordCategory::Declaration),
    info(KeywordId::Typealias, "typealias", KeywordCategory::Declaration),
    info(KeywordId::Var, "var", KeywordCategory::Declaration),
    // Declaration modifiers
    info(KeywordId::Fileprivate, "fileprivate", KeywordCategory::Modifier),
    info(KeywordId::Internal, "internal", KeywordCategory::Modifier),
    info(KeywordId::Private, "private", KeywordCategory::Modifier),
    info(KeywordId::Public, "public", KeywordCategory::Modifier),
    info(KeywordId::Static, "static", KeywordCategory::Modifier),
    // Effects
    info(KeywordId::Throws, "throws", KeywordCategory::Effect),
    info(KeywordId::Rethrows, "rethrows", KeywordCategory::Effect),
    // Statements
    info(KeywordId::Break, "break", KeywordCategory::Statement),
    info(KeywordId::Case, "case", KeywordCategory::Statement),
    info(KeywordId::Continue, "continue", KeywordCategory::Statement),
    info(KeywordId::Default, "default", KeywordCategory::Statement),
    info(KeywordId::Defer, "defer", KeywordCategory::Statement),
    info(KeywordId::Do, "do", KeywordCategory::Statement),
    info(KeywordId::Else, "else", KeywordCategory::Statement),
    info(KeywordId::Fallthrough, "fallthrough", KeywordCategory::Statement),
    info(KeywordId::For, "for", KeywordCategory::Statement),
    info(KeywordId::Guard, "guard", KeywordCategory::Statement),
    info(KeywordId::If, "if", KeywordCategory::Statement),
    info(KeywordId::In, "in", KeywordCategory::Statement),
    info(KeywordId::Repeat, "repeat", KeywordCategory::Statement),
    info(KeywordId::Return, "return", KeywordCategory::Statement),
    info(KeywordId::Switch, "switch", KeywordCategory::Statement),
    info(KeywordId::Throw, "throw", KeywordCategory::Statement),
    info(KeywordId::Where, "where", KeywordCategory::Statement),
    info(KeywordId::While, "while", KeywordCategory::Statement),
    // Expressions
    info(KeywordId::As, "as", KeywordCategory::Expression),
    info(KeywordId::Catch, "catch", KeywordCategory::Expression),
    info(KeywordId::False, "false", KeywordCategory::Expression),
    info(KeywordId::Is, "is", KeywordCategory::Expression),
    info(KeywordId::Nil, "nil", KeywordCategory::Expression),
    info(KeywordId::Super, "super", KeywordCategory::Expression),
    info(KeywordId::SelfKw, "self", KeywordCategory::Expression),
    info(KeywordId::True, "true", KeywordCategory::Expression),
    info(KeywordId::Try, "try", KeywordCategory::Expression),
    // Types
    info(KeywordId::Any, "Any", KeywordCategory::Type),
    info(KeywordId::SelfType, "Self", KeywordCategory::Type),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise (including contextual keywords such as `get`).
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if the keyword may be used as an argument label without backticks.
///
/// ## Notes
/// - Swift accepts every reserved word as an argument label except `inout`, `var` and `let`.
pub fn is_argument_label(id: KeywordId) -> bool {
    !matches!(id, KeywordId::Inout | KeywordId::Var | KeywordId::Let)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
    }
}
