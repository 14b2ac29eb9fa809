//! Property-based invariant tests for the formatting core.
//!
//! Verifies structural guarantees of the pipeline end to end:
//!
//! 1.  `format_message` never panics, whatever the template or values
//! 2.  `format_message` is deterministic: same input → same output
//! 3.  Formatting placeholder-free text is identity
//! 4.  Plural selection is total and deterministic over arbitrary floats
//! 5.  Cached formatters construct at most once per distinct option set
//! 6.  Number output for finite values always contains an ASCII digit
//! 7.  Missing values never abort the walk: output is still produced and
//!     every reported error is a classified kind

use std::cell::RefCell;
use std::rc::Rc;

use glossa::{
    FormatNumberOptions, Intl, IntlConfig, IntlError, MessageDescriptor, NumberOptions,
    Output, PluralKind, Value, Values,
};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn quiet_config(locale: &str) -> IntlConfig {
    // Tests feed arbitrary garbage; drop the reports instead of logging.
    IntlConfig::new(locale, "en")
        .expect("valid locale tags")
        .with_on_error(Rc::new(|_| {}))
}

fn capturing(locale: &str) -> (IntlConfig, Rc<RefCell<Vec<IntlError>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let seen = Rc::clone(&seen);
        Rc::new(move |err: &IntlError| seen.borrow_mut().push(err.clone()))
    };
    let config = IntlConfig::new(locale, "en")
        .expect("valid locale tags")
        .with_on_error(sink);
    (config, seen)
}

/// Text with none of the characters the message grammar treats specially.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{0,60}"
}

/// Syntax soup biased toward the grammar's special characters.
fn template_soup() -> impl Strategy<Value = String> {
    "[{}#<>/',a-z0-9 =]{0,80}"
}

// ═════════════════════════════════════════════════════════════════════════
// 1. format_message never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn format_message_total_over_arbitrary_templates(template in template_soup()) {
        let intl = Intl::new(quiet_config("en"));
        let descriptor = MessageDescriptor::default().with_default(&template);
        // Malformed templates fall back; well-formed ones substitute. Either
        // way the call returns.
        let _ = intl.format_message(&descriptor, &Values::new());
    }

    #[test]
    fn format_message_total_over_arbitrary_values(
        template in template_soup(),
        name in "[a-z]{1,8}",
        text in plain_text(),
        number in any::<i64>(),
    ) {
        let intl = Intl::new(quiet_config("en"));
        let mut values = Values::new();
        values.insert(name, Value::from(text));
        values.insert("n".into(), Value::from(number));
        let descriptor = MessageDescriptor::default().with_default(&template);
        let _ = intl.format_message(&descriptor, &values);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. format_message is deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn format_message_deterministic(template in template_soup(), number in -1000i64..1000) {
        let values: Values = [("n".to_owned(), Value::from(number))].into_iter().collect();
        let descriptor = MessageDescriptor::default().with_default(&template);

        // Across repeated calls on one instance (warm caches)...
        let intl = Intl::new(quiet_config("en"));
        let first = intl.format_message(&descriptor, &values);
        let again = intl.format_message(&descriptor, &values);
        prop_assert_eq!(&first, &again);

        // ...and across a fresh instance (cold caches).
        let fresh = Intl::new(quiet_config("en"));
        prop_assert_eq!(&first, &fresh.format_message(&descriptor, &values));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Placeholder-free text round-trips unchanged
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_text_is_identity(text in plain_text()) {
        let (config, seen) = capturing("en");
        let intl = Intl::new(config.with_message("msg", text.clone()));
        let output = intl.format_message(&MessageDescriptor::id("msg"), &Values::new());
        prop_assert_eq!(output, Output::Text(text));
        prop_assert!(seen.borrow().is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Plural selection is total and deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plural_selection_total_and_deterministic(value in any::<f64>()) {
        for locale in ["en", "fr", "ru", "pl", "ar", "ja"] {
            let intl = Intl::new(quiet_config(locale));
            let first = intl.format_plural(value, PluralKind::Cardinal);
            prop_assert_eq!(first, intl.format_plural(value, PluralKind::Cardinal));
            let ordinal = intl.format_plural(value, PluralKind::Ordinal);
            prop_assert_eq!(ordinal, intl.format_plural(value, PluralKind::Ordinal));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. One construction per distinct option set
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_number_formatting_constructs_once(
        values in proptest::collection::vec(-1.0e9f64..1.0e9, 1..20),
        min_frac in 0u8..4,
    ) {
        let intl = Intl::new(quiet_config("en"));
        let call = FormatNumberOptions::from(NumberOptions {
            minimum_fraction_digits: Some(min_frac),
            ..Default::default()
        });
        for value in values {
            intl.format_number(value, &call);
        }
        prop_assert_eq!(intl.stats().number.constructions(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Finite numbers always render with a digit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn finite_number_output_contains_a_digit(value in -1.0e12f64..1.0e12) {
        let intl = Intl::new(quiet_config("en"));
        let text = intl.format_number(value, &FormatNumberOptions::default());
        prop_assert!(
            text.chars().any(|c| c.is_ascii_digit()),
            "no digit in {:?} for {}",
            text,
            value
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Missing values degrade, never abort
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_values_still_produce_output(prefix in plain_text(), suffix in plain_text()) {
        let (config, seen) = capturing("en");
        let template = format!("{prefix}{{missing}}{suffix}");
        let intl = Intl::new(config.with_message("msg", template));
        let output = intl.format_message(&MessageDescriptor::id("msg"), &Values::new());
        prop_assert_eq!(output, Output::Text(format!("{prefix}{suffix}")));
        prop_assert_eq!(seen.borrow().len(), 1);
    }
}
