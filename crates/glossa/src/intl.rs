//! The public formatting facade.
//!
//! [`Intl`] is the long-lived object applications hold: it owns the
//! configuration and the formatter caches, and exposes one method per
//! formatter kind plus [`Intl::format_message`]. No format method
//! returns `Result`; failures are classified, reported through the
//! configured sink, and replaced by a deterministic fallback:
//!
//! | Operation | Fallback on failure |
//! |-----------|---------------------|
//! | `format_date` / `format_time` | ISO-like stringified input |
//! | `format_date_time_range` | both endpoints, stringified, en-dashed |
//! | `format_number` | `f64` `Display` output |
//! | `format_plural` | [`PluralCategory::Other`] |
//! | `format_relative_time` | `"{value} {unit}(s)"` |
//! | `format_list` | items joined with `", "` |
//! | `format_display_name` | `None` |
//! | `format_message` | per-placeholder fallbacks, walk completes |

use std::rc::Rc;

use glossa_intl::{
    CivilDateTime, DateTimeStyle, DisplayNamesOptions, PluralCategory, PluralKind,
    PluralOptions, RelativeTimeUnit,
};

use crate::cache::{CacheStats, FormatterCaches};
use crate::config::{
    FormatDateOptions, FormatListOptions, FormatNumberOptions, FormatRelativeTimeOptions,
    IntlConfig,
};
use crate::error::{FormatterKind, IntlError};
use crate::message::{self, MessageDescriptor};
use crate::substitute::{self, Output, SubstitutionCtx, Values};

/// A formatting context: configuration plus per-kind formatter caches.
///
/// `R` is the rich-node type tag handlers produce; the default `String`
/// fits plain-text applications. Create one instance per configuration
/// and keep it alive: the caches pay off across calls.
pub struct Intl<R = String> {
    config: IntlConfig<R>,
    caches: FormatterCaches,
}

impl<R: Clone> Intl<R> {
    /// Wrap a configuration with fresh caches.
    #[must_use]
    pub fn new(config: IntlConfig<R>) -> Self {
        Self {
            config,
            caches: FormatterCaches::new(),
        }
    }

    /// The configuration this instance formats with.
    #[must_use]
    pub fn config(&self) -> &IntlConfig<R> {
        &self.config
    }

    /// Cache counter snapshot.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.caches.stats()
    }

    fn report(&self, err: IntlError) {
        (self.config.on_error())(&err);
    }

    /// Format a date.
    #[must_use]
    pub fn format_date(&self, value: &CivilDateTime, options: &FormatDateOptions) -> String {
        let resolved = self.config.resolved_date_options(options);
        match self.caches.date_time(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format(value),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::DateTime, err));
                value.to_string()
            }
        }
    }

    /// Format a time of day.
    #[must_use]
    pub fn format_time(&self, value: &CivilDateTime, options: &FormatDateOptions) -> String {
        let mut resolved = self.config.resolved_time_options(options);
        if resolved.date_style.is_none() && resolved.time_style.is_none() {
            resolved.time_style = Some(DateTimeStyle::Short);
        }
        match self.caches.date_time(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format(value),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::DateTime, err));
                value.to_string()
            }
        }
    }

    /// Format a date/time range.
    #[must_use]
    pub fn format_date_time_range(
        &self,
        from: &CivilDateTime,
        to: &CivilDateTime,
        options: &FormatDateOptions,
    ) -> String {
        let resolved = self.config.resolved_date_options(options);
        match self.caches.date_time(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format_range(from, to),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::DateTime, err));
                format!("{from} \u{2013} {to}")
            }
        }
    }

    /// Format a number.
    #[must_use]
    pub fn format_number(&self, value: f64, options: &FormatNumberOptions) -> String {
        let resolved = self.config.resolved_number_options(options);
        match self.caches.number(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format(value),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::Number, err));
                value.to_string()
            }
        }
    }

    /// Plural category of a value.
    #[must_use]
    pub fn format_plural(&self, value: f64, kind: PluralKind) -> PluralCategory {
        let options = PluralOptions { kind: Some(kind) };
        match self.caches.plural_rules(
            self.config.provider().as_ref(),
            self.config.locale(),
            &options,
        ) {
            Ok(rules) => rules.select(value),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::Plural, err));
                PluralCategory::Other
            }
        }
    }

    /// Format a signed offset in a time unit ("in 3 days").
    #[must_use]
    pub fn format_relative_time(
        &self,
        value: i64,
        unit: RelativeTimeUnit,
        options: &FormatRelativeTimeOptions,
    ) -> String {
        let resolved = self.config.resolved_relative_time_options(options);
        match self.caches.relative_time(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format(value, unit),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::RelativeTime, err));
                if value.unsigned_abs() == 1 {
                    format!("{value} {}", unit.as_str())
                } else {
                    format!("{value} {}s", unit.as_str())
                }
            }
        }
    }

    /// Join items with locale-appropriate connectives.
    #[must_use]
    pub fn format_list(&self, items: &[String], options: &FormatListOptions) -> String {
        let resolved = self.config.resolved_list_options(options);
        match self.caches.list(
            self.config.provider().as_ref(),
            self.config.locale(),
            &resolved,
        ) {
            Ok(formatter) => formatter.format(items),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::List, err));
                items.join(", ")
            }
        }
    }

    /// Display name of a language/region/script/currency code.
    #[must_use]
    pub fn format_display_name(
        &self,
        code: &str,
        options: &DisplayNamesOptions,
    ) -> Option<String> {
        match self.caches.display_names(
            self.config.provider().as_ref(),
            self.config.locale(),
            options,
        ) {
            Ok(names) => names.of(code),
            Err(err) => {
                self.report(IntlError::from_provider(FormatterKind::DisplayNames, err));
                None
            }
        }
    }

    /// Resolve a message and substitute values into it.
    ///
    /// Resolution order and every fallback are described in
    /// [`crate::message`] and [`crate::substitute`]; the call always
    /// produces output.
    #[must_use]
    pub fn format_message(
        &self,
        descriptor: &MessageDescriptor<'_>,
        values: &Values<R>,
    ) -> Output<R> {
        let report = |err: IntlError| self.report(err);
        let tree = message::resolve(
            descriptor,
            self.config.messages(),
            &self.caches,
            &self.config.locale().to_string(),
            &report,
        );
        let ctx = SubstitutionCtx {
            config: &self.config,
            caches: &self.caches,
            values,
            message_id: descriptor.id,
            report: &report,
        };
        Output::from_fragments(substitute::substitute(&ctx, &tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitute::Value;

    fn intl() -> Intl {
        Intl::new(IntlConfig::new("en-US", "en").expect("valid tags"))
    }

    #[test]
    fn simple_message_round_trips() {
        let intl: Intl = Intl::new(
            IntlConfig::new("en", "en")
                .expect("valid tags")
                .with_message("plain", "No placeholders here."),
        );
        let output = intl.format_message(&MessageDescriptor::id("plain"), &Values::new());
        assert_eq!(output.as_text(), Some("No placeholders here."));
    }

    #[test]
    fn format_number_goes_through_the_cache() {
        let intl = intl();
        assert_eq!(
            intl.format_number(1234.5, &FormatNumberOptions::default()),
            "1,234.5"
        );
        intl.format_number(7.0, &FormatNumberOptions::default());
        assert_eq!(intl.stats().number.constructions(), 1);
    }

    #[test]
    fn format_plural_selects_categories() {
        let intl = intl();
        assert_eq!(intl.format_plural(1.0, PluralKind::Cardinal), PluralCategory::One);
        assert_eq!(intl.format_plural(5.0, PluralKind::Cardinal), PluralCategory::Other);
        assert_eq!(intl.format_plural(3.0, PluralKind::Ordinal), PluralCategory::Few);
    }

    #[test]
    fn format_message_with_values() {
        let intl: Intl = Intl::new(
            IntlConfig::new("en", "en")
                .expect("valid tags")
                .with_message("greeting", "Hello, {name}!"),
        );
        let mut values = Values::new();
        values.insert("name".into(), Value::from("Ada"));
        let output = intl.format_message(&MessageDescriptor::id("greeting"), &values);
        assert_eq!(output.as_text(), Some("Hello, Ada!"));
    }

    #[test]
    fn display_name_lookup() {
        let intl = intl();
        assert_eq!(
            intl.format_display_name(
                "fr",
                &DisplayNamesOptions::new(glossa_intl::DisplayNamesKind::Language)
            ),
            Some("French".into())
        );
    }
}
