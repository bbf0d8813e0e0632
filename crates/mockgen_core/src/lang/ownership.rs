//! Reference-ownership qualifiers (`weak`, `unowned`, `unowned(safe)`, `unowned(unsafe)`).
//!
//! The registry order is the **match priority**: parenthesised spellings come before the bare
//! `unowned`, so a suffix scan never classifies `unowned(safe)` as `unowned`.
//!
//! ## Examples
//! ```rust
//! use mockgen_core::lang::ownership::{self, Ownership};
//!
//! assert_eq!(ownership::classify_suffix("private unowned(safe)"), Some(Ownership::UnownedSafe));
//! assert_eq!(ownership::classify_suffix("@IBOutlet weak"), Some(Ownership::Weak));
//! assert_eq!(ownership::classify_suffix("tweak"), None);
//! ```

use std::fmt;

/// Ownership qualifier attached to a stored reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Weak,
    Unowned,
    UnownedSafe,
    UnownedUnsafe,
}

/// Metadata for an ownership qualifier.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipInfo {
    pub id: Ownership,
    pub canonical: &'static str,
}

/// Registry of ownership qualifiers, most specific spelling first.
pub const OWNERSHIP_QUALIFIERS: &[OwnershipInfo] = &[
    info(Ownership::UnownedSafe, "unowned(safe)"),
    info(Ownership::UnownedUnsafe, "unowned(unsafe)"),
    info(Ownership::Unowned, "unowned"),
    info(Ownership::Weak, "weak"),
];

/// Canonical spelling.
pub fn as_str(id: Ownership) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: Ownership) -> &'static OwnershipInfo {
    OWNERSHIP_QUALIFIERS
        .iter()
        .find(|o| o.id == id)
        .expect("ownership info missing")
}

/// Lookup by exact spelling.
pub fn from_str(s: &str) -> Option<Ownership> {
    OWNERSHIP_QUALIFIERS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

/// Classify the qualifier that `text` ends with, if any.
///
/// Spellings are tried in registry order. A match must start at an identifier boundary, so `tweak`
/// does not end with the `weak` qualifier.
///
/// ## Notes
/// - `text` is expected to be already trimmed; trailing whitespace prevents a match.
pub fn classify_suffix(text: &str) -> Option<Ownership> {
    OWNERSHIP_QUALIFIERS.iter().find_map(|o| {
        let head = text.strip_suffix(o.canonical)?;
        let at_boundary = head
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$'));
        at_boundary.then_some(o.id)
    })
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

const fn info(id: Ownership, canonical: &'static str) -> OwnershipInfo {
    OwnershipInfo { id, canonical }
}
