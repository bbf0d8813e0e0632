//! Property-based tests for the mockgen frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use mockgen::ast::Span;
use mockgen::{FileBuilder, SyntaxFileBuilder, lexer, parser};
use proptest::prelude::*;

/// Fragments that look like Swift type syntax, so the generator reaches deep into the grammar.
fn type_soup() -> impl Strategy<Value = String> {
    let pieces = prop::sample::select(vec![
        "Int", "String", "Array", "Dictionary", "Self", "Any", "some", "any", "inout", "throws", "async",
        "->", "<", ">", "[", "]", "(", ")", ":", ",", "?", "!", "&", ".", "...", "_", "@escaping", " ", "\n",
    ]);
    prop::collection::vec(pieces, 0..24).prop_map(|parts| parts.concat())
}

fn within(span: Span, len: usize) -> bool {
    span.start <= span.end && span.end <= len
}

proptest! {
    /// Property: the type parser never panics and any parsed type lies inside the input
    #[test]
    fn type_parser_spans_stay_in_input(input in type_soup()) {
        if let Ok(ty) = parser::parse_type(&input) {
            prop_assert!(within(ty.span, input.len()));
            prop_assert_eq!(ty.span.slice(&input), Some(ty.text.as_str()));
        }
    }

    /// Property: arbitrary text never panics the type parser
    #[test]
    fn type_parser_accepts_any_text(input in ".{0,64}") {
        let _ = parser::parse_type(&input);
    }

    /// Property: the lossy lexer covers the input with ordered, in-bounds tokens
    #[test]
    fn lexer_tokens_are_ordered(input in ".{0,128}") {
        let (tokens, _) = lexer::lex_lossy(&input);
        let mut previous_end = 0;
        for token in &tokens {
            prop_assert!(within(token.span, input.len()));
            prop_assert!(token.span.start >= previous_end);
            previous_end = token.span.end;
        }
    }

    /// Property: file building never panics and every declaration span is inside the file
    #[test]
    fn file_builder_spans_stay_in_input(input in "[a-z{}():<>?!,=\n @]{0,96}") {
        let parsed = SyntaxFileBuilder::new().build(&input);
        prop_assert_eq!(parsed.node.span, Span::new(0, input.len()));
        for decl in &parsed.node.declarations {
            prop_assert!(within(decl.span(), input.len()));
        }
    }
}
