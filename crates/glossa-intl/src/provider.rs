//! The provider boundary: per-kind formatter traits and their constructor.
//!
//! A provider plays the role of the host `Intl` library: it constructs
//! formatter objects from `(locale, options)` and reports distinguishable
//! errors for invalid options, unsupported features, and missing locale
//! data. Construction is the expensive step; the objects it returns must
//! be deterministic (same input → same output) so callers may memoize
//! them freely.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::datetime::CivilDateTime;
use crate::options::{
    DateTimeOptions, DisplayNamesOptions, ListOptions, NumberOptions, PluralOptions,
    RelativeTimeOptions,
};
use crate::plural::PluralCategory;

/// Why a formatter could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The options are structurally invalid (for example a currency style
    /// without a currency code).
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// The provider does not implement the requested feature.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// The provider has no data for the requested locale.
    #[error("no locale data for {locale}: {detail}")]
    MissingData {
        /// The locale that lacked data.
        locale: String,
        /// What was missing.
        detail: String,
    },
}

/// Unit for relative-time formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RelativeTimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl RelativeTimeUnit {
    /// Singular English unit name, also used in fallback output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }
}

/// A constructed date/time formatter.
pub trait DateTimeFormatter {
    /// Render one value.
    fn format(&self, value: &CivilDateTime) -> String;
    /// Render a range.
    fn format_range(&self, from: &CivilDateTime, to: &CivilDateTime) -> String;
}

/// A constructed number formatter.
pub trait NumberFormatter {
    /// Render one value.
    fn format(&self, value: f64) -> String;
}

/// Constructed plural rules.
pub trait PluralRules {
    /// Category for a value.
    fn select(&self, value: f64) -> PluralCategory;
}

/// A constructed relative-time formatter.
pub trait RelativeTimeFormatter {
    /// Render a signed offset in the given unit.
    fn format(&self, value: i64, unit: RelativeTimeUnit) -> String;
}

/// A constructed list formatter.
pub trait ListFormatter {
    /// Join items with locale-appropriate connectives.
    fn format(&self, items: &[String]) -> String;
}

/// A constructed display-names lookup.
pub trait DisplayNames {
    /// Display name of a code, or `None` when unknown and the fallback
    /// policy is [`crate::options::DisplayNamesFallback::None`].
    fn of(&self, code: &str) -> Option<String>;
}

/// Constructor for every formatter kind.
///
/// Implementations must be deterministic and side-effect free; errors
/// must use the matching [`ProviderError`] variant so callers can
/// classify them.
pub trait IntlProvider {
    /// Construct a date/time formatter.
    fn date_time(
        &self,
        locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Result<Box<dyn DateTimeFormatter>, ProviderError>;

    /// Construct a number formatter.
    fn number(
        &self,
        locale: &LanguageIdentifier,
        options: &NumberOptions,
    ) -> Result<Box<dyn NumberFormatter>, ProviderError>;

    /// Construct plural rules.
    fn plural_rules(
        &self,
        locale: &LanguageIdentifier,
        options: &PluralOptions,
    ) -> Result<Box<dyn PluralRules>, ProviderError>;

    /// Construct a relative-time formatter.
    fn relative_time(
        &self,
        locale: &LanguageIdentifier,
        options: &RelativeTimeOptions,
    ) -> Result<Box<dyn RelativeTimeFormatter>, ProviderError>;

    /// Construct a list formatter.
    fn list(
        &self,
        locale: &LanguageIdentifier,
        options: &ListOptions,
    ) -> Result<Box<dyn ListFormatter>, ProviderError>;

    /// Construct a display-names lookup.
    fn display_names(
        &self,
        locale: &LanguageIdentifier,
        options: &DisplayNamesOptions,
    ) -> Result<Box<dyn DisplayNames>, ProviderError>;
}
