//! Small helper APIs for working with `TokenKind`.
//!
//! Contextual keywords are lexed as identifiers, so the grammars ask the token which contextual word it
//! spells instead of matching on a dedicated variant.

use crate::lexer::TokenKind;
use mockgen_core::lang::contextual::{self, ContextualId};
use mockgen_core::lang::keywords::{self, KeywordId};
use mockgen_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return the contextual keyword an identifier spells, if any.
    pub fn contextual_id(&self) -> Option<ContextualId> {
        match self {
            TokenKind::Ident(name) => contextual::from_str(name),
            _ => None,
        }
    }

    pub fn is_contextual(&self, id: ContextualId) -> bool {
        self.contextual_id() == Some(id)
    }

    /// Return the identifier name, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Short human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword '{}'", keywords::as_str(*id)),
            TokenKind::Punctuation(id) => format!("'{}'", punctuation::as_str(*id)),
            TokenKind::Operator(op) => format!("operator '{}'", op),
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Number(n) => format!("number '{}'", n),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Unknown(c) => format!("'{}'", c),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contextual_words_are_identifiers() {
        let weak = TokenKind::Ident("weak".to_string());
        assert!(weak.is_contextual(ContextualId::Weak));
        assert_eq!(weak.ident(), Some("weak"));
        assert_eq!(TokenKind::Ident("weakly".to_string()).contextual_id(), None);
        assert_eq!(TokenKind::Keyword(KeywordId::Var).contextual_id(), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::Keyword(KeywordId::Func).describe(), "keyword 'func'");
        assert_eq!(TokenKind::Punctuation(PunctuationId::LBrace).describe(), "'{'");
        assert_eq!(TokenKind::Eof.describe(), "end of input");
    }
}
