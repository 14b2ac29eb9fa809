#![forbid(unsafe_code)]

//! Locale-formatting primitives for Glossa.
//!
//! Defines the boundary between the formatting core and the locale-data
//! layer: per-kind formatter traits (date/time, number, plural rules,
//! relative time, list, display names), canonical options structs usable
//! as cache keys, and [`BuiltinProvider`], a deterministic implementation
//! with English conventions and hand-written CLDR-style plural rule
//! families.
//!
//! # Role in Glossa
//! The core crate only ever talks to [`IntlProvider`]; swapping in a
//! CLDR-complete provider (or a counting probe in tests) changes no core
//! code. The built-in provider keeps the workspace self-contained and its
//! output deterministic.
//!
//! # How it fits in the system
//! Constructed formatters are cheap to call but comparatively expensive
//! to build, which is why the core memoizes them per
//! `(locale, options)` key. Every options struct here derives
//! `Hash + Eq` so that keying is structural, not identity-based.

pub mod builtin;
pub mod datetime;
pub mod options;
pub mod plural;
pub mod provider;

pub use builtin::BuiltinProvider;
pub use datetime::CivilDateTime;
pub use options::{
    DateTimeOptions, DateTimeStyle, DisplayNamesFallback, DisplayNamesKind,
    DisplayNamesOptions, ListKind, ListOptions, ListStyle, NumberOptions, NumberStyle,
    PluralKind, PluralOptions, RelativeTimeNumeric, RelativeTimeOptions,
};
pub use plural::{PluralCategory, PluralRuleFamily};
pub use provider::{
    DateTimeFormatter, DisplayNames, IntlProvider, ListFormatter, NumberFormatter,
    PluralRules, ProviderError, RelativeTimeFormatter, RelativeTimeUnit,
};

pub use unic_langid::{LanguageIdentifier, LanguageIdentifierError};
