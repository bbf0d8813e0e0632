//! Ownership rescan over raw source text.

use mockgen_core::lang::ownership::{self, Ownership};

/// Classify the ownership qualifier written directly before `offset`.
///
/// The text before `offset` is trimmed of trailing whitespace and matched against the qualifier spellings,
/// most specific first. Returns `None` when `offset` is not a char boundary inside `source`.
pub fn ownership_before(source: &str, offset: usize) -> Option<Ownership> {
    let preceding = source.get(..offset)?;
    ownership::classify_suffix(preceding.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_var(source: &str) -> Option<Ownership> {
        let offset = source.find("var").unwrap();
        ownership_before(source, offset)
    }

    #[test]
    fn test_qualifiers() {
        assert_eq!(at_var("weak var a: A?"), Some(Ownership::Weak));
        assert_eq!(at_var("unowned var a: A"), Some(Ownership::Unowned));
        assert_eq!(at_var("unowned(safe) var a: A"), Some(Ownership::UnownedSafe));
        assert_eq!(at_var("unowned(unsafe) var a: A"), Some(Ownership::UnownedUnsafe));
    }

    #[test]
    fn test_whitespace_and_newlines_are_trimmed() {
        assert_eq!(at_var("class C {\n    private weak\n\t  var a: A?"), Some(Ownership::Weak));
    }

    #[test]
    fn test_no_qualifier() {
        assert_eq!(at_var("var a: A"), None);
        assert_eq!(at_var("let tweak = 1\nvar a: A"), None);
    }

    #[test]
    fn test_offset_out_of_range() {
        assert_eq!(ownership_before("weak", 10), None);
        assert_eq!(ownership_before("é", 1), None);
    }
}
