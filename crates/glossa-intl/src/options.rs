//! Canonical formatter options.
//!
//! Every struct here is a plain field bundle deriving `Hash + Eq`, so a
//! `(locale, options)` pair is directly usable as a memoization key:
//! structurally equal options hit the same cache entry no matter where the
//! value was allocated. Unset fields mean "provider default", which is
//! what makes field-wise merging with named presets a pure `or`-fold.

/// Date/time rendering length, mirroring the ECMA-402 style buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeStyle {
    /// `Thursday, January 2, 2020` / `3:04:05 AM UTC`.
    Full,
    /// `January 2, 2020` / `3:04:05 AM UTC`.
    Long,
    /// `Jan 2, 2020` / `3:04:05 AM`.
    Medium,
    /// `1/2/2020` / `3:04 AM`.
    Short,
}

impl DateTimeStyle {
    /// Parse a message-syntax style token (`"short"`, `"medium"`, …).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "full" => Some(Self::Full),
            "long" => Some(Self::Long),
            "medium" => Some(Self::Medium),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Options for constructing a date/time formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateTimeOptions {
    /// How much of the date to render. `None` means no date part unless
    /// the call site defaults one in.
    pub date_style: Option<DateTimeStyle>,
    /// How much of the time to render.
    pub time_style: Option<DateTimeStyle>,
    /// 12-hour clock. Defaults to 12-hour (English convention).
    pub hour12: Option<bool>,
    /// IANA-ish time zone label. Values are passed to the provider
    /// unchanged; the built-in provider accepts only `"UTC"`.
    pub time_zone: Option<String>,
}

impl DateTimeOptions {
    /// Field-wise merge: fields set on `self` win, the rest inherit from
    /// `base`.
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            date_style: self.date_style.or(base.date_style),
            time_style: self.time_style.or(base.time_style),
            hour12: self.hour12.or(base.hour12),
            time_zone: self.time_zone.clone().or_else(|| base.time_zone.clone()),
        }
    }
}

/// Number rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    /// Plain decimal.
    Decimal,
    /// Scaled by 100 with a trailing `%`.
    Percent,
    /// Currency, using [`NumberOptions::currency`].
    Currency,
}

/// Options for constructing a number formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NumberOptions {
    /// Rendering style. Defaults to [`NumberStyle::Decimal`].
    pub style: Option<NumberStyle>,
    /// ISO 4217 code, required when `style` is [`NumberStyle::Currency`].
    pub currency: Option<String>,
    /// Minimum fraction digits (zero-padded up to this count).
    pub minimum_fraction_digits: Option<u8>,
    /// Maximum fraction digits (rounded beyond this count).
    pub maximum_fraction_digits: Option<u8>,
    /// Thousands grouping. Defaults to on.
    pub use_grouping: Option<bool>,
}

impl NumberOptions {
    /// Field-wise merge; see [`DateTimeOptions::merged_over`].
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            style: self.style.or(base.style),
            currency: self.currency.clone().or_else(|| base.currency.clone()),
            minimum_fraction_digits: self
                .minimum_fraction_digits
                .or(base.minimum_fraction_digits),
            maximum_fraction_digits: self
                .maximum_fraction_digits
                .or(base.maximum_fraction_digits),
            use_grouping: self.use_grouping.or(base.use_grouping),
        }
    }
}

/// Cardinal vs. ordinal plural selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralKind {
    /// "1 item", "2 items".
    Cardinal,
    /// "1st", "2nd", "3rd".
    Ordinal,
}

/// Options for constructing plural rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PluralOptions {
    /// Selection kind. Defaults to [`PluralKind::Cardinal`].
    pub kind: Option<PluralKind>,
}

impl PluralOptions {
    /// Field-wise merge; see [`DateTimeOptions::merged_over`].
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            kind: self.kind.or(base.kind),
        }
    }
}

/// Whether relative times may use named phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeTimeNumeric {
    /// Always numeric: "in 1 day".
    Always,
    /// Named phrases where one exists: "tomorrow".
    Auto,
}

/// Options for constructing a relative-time formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativeTimeOptions {
    /// Phrase policy. Defaults to [`RelativeTimeNumeric::Always`].
    pub numeric: Option<RelativeTimeNumeric>,
}

impl RelativeTimeOptions {
    /// Field-wise merge; see [`DateTimeOptions::merged_over`].
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            numeric: self.numeric.or(base.numeric),
        }
    }
}

/// List separator length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyle {
    /// "a, b, and c".
    Long,
    /// "a, b, & c".
    Short,
    /// "a, b, c".
    Narrow,
}

/// List joining semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// "and"-joined.
    Conjunction,
    /// "or"-joined.
    Disjunction,
    /// Unit lists, no connective.
    Unit,
}

/// Options for constructing a list formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListOptions {
    /// Separator length. Defaults to [`ListStyle::Long`].
    pub style: Option<ListStyle>,
    /// Joining semantics. Defaults to [`ListKind::Conjunction`].
    pub kind: Option<ListKind>,
}

impl ListOptions {
    /// Field-wise merge; see [`DateTimeOptions::merged_over`].
    #[must_use]
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            style: self.style.or(base.style),
            kind: self.kind.or(base.kind),
        }
    }
}

/// What kind of code a display-names lookup receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayNamesKind {
    /// Language subtags: `"fr"` → "French".
    Language,
    /// Region subtags: `"JP"` → "Japan".
    Region,
    /// Script subtags: `"Cyrl"` → "Cyrillic".
    Script,
    /// ISO 4217 codes: `"EUR"` → "Euro".
    Currency,
}

/// Behavior when no display name is known for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayNamesFallback {
    /// Return the code itself.
    Code,
    /// Return nothing.
    None,
}

/// Options for constructing a display-names formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayNamesOptions {
    /// Code namespace to resolve in.
    pub kind: DisplayNamesKind,
    /// Unknown-code behavior. Defaults to [`DisplayNamesFallback::Code`].
    pub fallback: Option<DisplayNamesFallback>,
}

impl DisplayNamesOptions {
    /// Options for the given namespace with default fallback behavior.
    #[must_use]
    pub fn new(kind: DisplayNamesKind) -> Self {
        Self {
            kind,
            fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_explicit_fields() {
        let preset = NumberOptions {
            style: Some(NumberStyle::Currency),
            currency: Some("USD".into()),
            minimum_fraction_digits: Some(2),
            ..Default::default()
        };
        let explicit = NumberOptions {
            minimum_fraction_digits: Some(0),
            ..Default::default()
        };
        let merged = explicit.merged_over(&preset);
        assert_eq!(merged.style, Some(NumberStyle::Currency));
        assert_eq!(merged.currency.as_deref(), Some("USD"));
        assert_eq!(merged.minimum_fraction_digits, Some(0));
    }

    #[test]
    fn merge_over_empty_base_is_identity() {
        let explicit = DateTimeOptions {
            date_style: Some(DateTimeStyle::Long),
            time_zone: Some("UTC".into()),
            ..Default::default()
        };
        assert_eq!(explicit.merged_over(&DateTimeOptions::default()), explicit);
    }

    #[test]
    fn structurally_equal_options_hash_equal() {
        use std::collections::HashMap;
        let a = DateTimeOptions {
            date_style: Some(DateTimeStyle::Short),
            ..Default::default()
        };
        let b = DateTimeOptions {
            date_style: Some(DateTimeStyle::Short),
            ..Default::default()
        };
        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn style_token_parsing() {
        assert_eq!(DateTimeStyle::from_token("short"), Some(DateTimeStyle::Short));
        assert_eq!(DateTimeStyle::from_token("full"), Some(DateTimeStyle::Full));
        assert_eq!(DateTimeStyle::from_token("iso"), None);
    }
}
