#![forbid(unsafe_code)]

//! Locale-aware formatting core.
//!
//! Glossa wraps expensive locale primitives (date/time, number, plural
//! rules, relative time, list, display names) behind a long-lived
//! [`Intl`] instance that memoizes every constructed formatter per
//! `(locale, options)` key, resolves ICU MessageFormat templates from a
//! catalog with parse caching, substitutes typed values including rich
//! tag content, and funnels every recoverable failure through one
//! classified, non-throwing error channel.
//!
//! ```
//! use glossa::{Intl, IntlConfig, MessageDescriptor, Value, Values};
//!
//! let intl: Intl = Intl::new(
//!     IntlConfig::new("en-US", "en")
//!         .expect("valid locale tags")
//!         .with_message("cart", "{count, plural, one {# item} other {# items}}"),
//! );
//! let mut values = Values::new();
//! values.insert("count".into(), Value::from(5));
//! let output = intl.format_message(&MessageDescriptor::id("cart"), &values);
//! assert_eq!(output.as_text(), Some("5 items"));
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Invalid locale tag | bad input to [`IntlConfig::new`] | hard `Err`, no fallback |
//! | Everything else | see [`error`] | reported to the sink, fallback output |
//!
//! # Crate layout
//!
//! [`cache`] memoizes formatters, [`config`] resolves options, [`message`]
//! resolves descriptors against the catalog, [`substitute`] walks parsed
//! trees, [`error`] classifies failures, and [`intl`] ties them together.
//! Parsing lives in `glossa-parser`; locale primitives and the provider
//! boundary live in `glossa-intl`.

pub mod cache;
pub mod config;
pub mod error;
pub mod intl;
pub mod message;
pub mod substitute;

pub use cache::{CacheStats, FormatterCaches, KindStats};
pub use config::{
    CustomFormats, FormatDateOptions, FormatListOptions, FormatNumberOptions,
    FormatRelativeTimeOptions, IntlConfig,
};
pub use error::{ErrorKind, FormatterKind, IntlError, OnError, tracing_sink};
pub use intl::Intl;
pub use message::{MessageCatalog, MessageDescriptor, MessageEntry};
pub use substitute::{
    Fragment, MAX_SUBSTITUTION_DEPTH, Output, TagHandler, Value, Values,
};

pub use glossa_intl::{
    BuiltinProvider, CivilDateTime, DateTimeOptions, DateTimeStyle, DisplayNamesFallback,
    DisplayNamesKind, DisplayNamesOptions, IntlProvider, LanguageIdentifier, ListKind,
    ListOptions, ListStyle, NumberOptions, NumberStyle, PluralCategory, PluralKind,
    PluralOptions, ProviderError, RelativeTimeNumeric, RelativeTimeOptions, RelativeTimeUnit,
};
pub use glossa_parser::{MessageElement, ParseError, parse};
