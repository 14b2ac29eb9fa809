//! Property-based invariant tests for the ICU message parser.
//!
//! Verifies structural guarantees:
//!
//! 1. The parser is total: arbitrary input never panics
//! 2. Parsing is deterministic: same input → same tree
//! 3. Plain text (no syntax characters) round-trips as one literal
//! 4. A well-formed simple argument always parses
//! 5. Plural templates always carry an `other` branch
//! 6. Balanced tags parse to a tag node with the same name

use glossa_parser::{MessageElement, PluralSelector, parse};
use proptest::prelude::*;

// ═════════════════════════════════════════════════════════════════════════
// 1. Totality: arbitrary input never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = parse(&input);
    }
}

proptest! {
    #[test]
    fn parse_never_panics_on_syntax_soup(
        input in "[{}#<>/=,' a-z0-9]*"
    ) {
        let _ = parse(&input);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_is_deterministic(input in ".*") {
        let first = parse(&input);
        let second = parse(&input);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Plain text round-trips as a single literal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_text_is_one_literal(input in "[a-zA-Z0-9 .,!?:;-]+") {
        let parsed = parse(&input).expect("plain text must parse");
        prop_assert_eq!(parsed, vec![MessageElement::Literal(input)]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Simple arguments always parse
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn simple_argument_parses(name in "[a-z][a-z0-9_]{0,12}") {
        let template = format!("Hello, {{{name}}}!");
        let parsed = parse(&template).expect("argument must parse");
        prop_assert_eq!(
            parsed[1].argument_name(),
            Some(name.as_str())
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Parsed plurals always carry an `other` branch
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plural_always_has_other(
        name in "[a-z]{1,8}",
        one in "[a-z ]{1,10}",
        other in "[a-z ]{1,10}",
    ) {
        let template = format!("{{{name}, plural, one {{{one}}} other {{{other}}}}}");
        let parsed = parse(&template).expect("plural must parse");
        let MessageElement::Plural { branches, .. } = &parsed[0] else {
            return Err(TestCaseError::fail("expected plural element"));
        };
        prop_assert!(
            branches
                .iter()
                .any(|b| b.selector == PluralSelector::Keyword("other".into()))
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Balanced tags parse back to the same name
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn balanced_tag_parses(
        tag in "[a-z][a-z0-9]{0,6}",
        body in "[a-zA-Z0-9 ]*",
    ) {
        let template = format!("<{tag}>{body}</{tag}>");
        let parsed = parse(&template).expect("balanced tag must parse");
        let MessageElement::Tag { name, .. } = &parsed[0] else {
            return Err(TestCaseError::fail("expected tag element"));
        };
        prop_assert_eq!(name, &tag);
    }
}
