//! The classified, non-throwing error channel.
//!
//! Format calls never return `Result`: every recoverable failure is
//! classified into an [`IntlError`], handed to the configured [`OnError`]
//! sink exactly once, and the call proceeds with its documented fallback
//! output. The only hard failure in the crate is configuration
//! construction with an unparseable locale tag.
//!
//! # Invariants
//!
//! 1. **One report per failure**: a single underlying failure produces a
//!    single sink invocation, synchronously, before the fallback value is
//!    returned.
//!
//! 2. **Classification is total**: every [`ProviderError`] maps to exactly
//!    one [`IntlError`] variant; there is no catch-all "unknown" kind.

use std::fmt;
use std::rc::Rc;

use glossa_intl::ProviderError;
use thiserror::Error;

/// Which formatter kind an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    /// Date/time formatting (including ranges).
    DateTime,
    /// Number formatting.
    Number,
    /// Plural-rules selection.
    Plural,
    /// Relative-time formatting.
    RelativeTime,
    /// List formatting.
    List,
    /// Display-name lookup.
    DisplayNames,
}

impl FormatterKind {
    /// Stable lowercase name, used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateTime => "date-time",
            Self::Number => "number",
            Self::Plural => "plural",
            Self::RelativeTime => "relative-time",
            Self::List => "list",
            Self::DisplayNames => "display-names",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified formatting error.
///
/// Each variant carries enough context to act on the report: the message
/// id or template for message errors, the locale for data errors, and
/// the formatter kind plus diagnostic for primitive errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntlError {
    /// The catalog has no entry for a requested message id.
    #[error("missing translation for {id:?} in locale {locale}")]
    MissingTranslation {
        /// The id that was looked up (`None` when the descriptor had none).
        id: Option<String>,
        /// The configured locale tag.
        locale: String,
    },
    /// A template failed to parse, referenced a value that was not
    /// supplied, or exceeded the substitution depth limit.
    #[error("message format error in {id:?}: {detail}")]
    MessageFormat {
        /// Message id, when known.
        id: Option<String>,
        /// The offending template source, when known.
        template: Option<String>,
        /// What went wrong.
        detail: String,
    },
    /// The provider has no locale data for the request.
    #[error("missing locale data for {locale}: {detail}")]
    MissingData {
        /// The locale that lacked data.
        locale: String,
        /// What was missing.
        detail: String,
    },
    /// Configuration is invalid: a bad locale tag at construction, or
    /// structurally invalid formatter options at format time.
    #[error("invalid configuration: {detail}")]
    InvalidConfig {
        /// What was invalid.
        detail: String,
    },
    /// The provider does not support the requested feature.
    #[error("unsupported {kind} formatter: {detail}")]
    UnsupportedFormatter {
        /// The formatter kind that was requested.
        kind: FormatterKind,
        /// The unsupported feature.
        detail: String,
    },
    /// A constructed primitive failed at format time, or a placeholder
    /// value had the wrong type for its placeholder.
    #[error("{kind} formatting failed: {detail}")]
    Format {
        /// The formatter kind that failed.
        kind: FormatterKind,
        /// What went wrong.
        detail: String,
    },
}

/// Discriminant of [`IntlError`], for sinks that branch on class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`IntlError::MissingTranslation`].
    MissingTranslation,
    /// See [`IntlError::MessageFormat`].
    MessageFormat,
    /// See [`IntlError::MissingData`].
    MissingData,
    /// See [`IntlError::InvalidConfig`].
    InvalidConfig,
    /// See [`IntlError::UnsupportedFormatter`].
    UnsupportedFormatter,
    /// See [`IntlError::Format`].
    Format,
}

impl IntlError {
    /// This error's class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTranslation { .. } => ErrorKind::MissingTranslation,
            Self::MessageFormat { .. } => ErrorKind::MessageFormat,
            Self::MissingData { .. } => ErrorKind::MissingData,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::UnsupportedFormatter { .. } => ErrorKind::UnsupportedFormatter,
            Self::Format { .. } => ErrorKind::Format,
        }
    }

    /// Classify a provider construction failure.
    pub(crate) fn from_provider(kind: FormatterKind, err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidOptions(detail) => Self::InvalidConfig {
                detail: format!("{kind} options: {detail}"),
            },
            ProviderError::Unsupported(detail) => Self::UnsupportedFormatter { kind, detail },
            ProviderError::MissingData { locale, detail } => Self::MissingData { locale, detail },
        }
    }
}

/// The error sink: called synchronously, exactly once per classified
/// error, before the format call returns its fallback.
pub type OnError = Rc<dyn Fn(&IntlError)>;

/// The default sink: emits each error as a `tracing` warning.
#[must_use]
pub fn tracing_sink() -> OnError {
    Rc::new(|err: &IntlError| {
        tracing::warn!(kind = ?err.kind(), "{err}");
    })
}
