//! Configuration and option resolution.
//!
//! [`IntlConfig`] is the long-lived description of one formatting
//! context: locale pair, optional time zone, message catalog, named
//! format presets, default tag handlers, provider, and error sink.
//! Construction validates both locale tags and fails hard on an invalid
//! tag; nothing else about the configuration can fail.
//!
//! Option resolution is pure: a per-call options bundle names a preset
//! via its `format` field, and the effective options are the preset's
//! fields overridden field-wise by the explicit overrides. An unknown
//! preset name resolves as if no preset were named.

use std::fmt;
use std::rc::Rc;

use glossa_intl::{
    BuiltinProvider, DateTimeOptions, IntlProvider, LanguageIdentifier, ListOptions,
    NumberOptions, RelativeTimeOptions,
};
use rustc_hash::FxHashMap;

use crate::error::{IntlError, OnError, tracing_sink};
use crate::message::MessageCatalog;
use crate::substitute::TagHandler;

/// Named option presets, referenced from per-call options and from
/// message-syntax style tokens (`{n, number, compactUsd}`).
#[derive(Debug, Clone, Default)]
pub struct CustomFormats {
    /// Presets for `format_date` and `{d, date, name}`.
    pub date: FxHashMap<String, DateTimeOptions>,
    /// Presets for `format_time` and `{t, time, name}`.
    pub time: FxHashMap<String, DateTimeOptions>,
    /// Presets for `format_number` and `{n, number, name}`.
    pub number: FxHashMap<String, NumberOptions>,
    /// Presets for `format_relative_time`.
    pub relative_time: FxHashMap<String, RelativeTimeOptions>,
    /// Presets for `format_list`.
    pub list: FxHashMap<String, ListOptions>,
}

/// Per-call date/time options: an optional preset name plus explicit
/// field overrides.
#[derive(Debug, Clone, Default)]
pub struct FormatDateOptions {
    /// Name of a [`CustomFormats`] preset to start from.
    pub format: Option<String>,
    /// Fields that win over the preset.
    pub overrides: DateTimeOptions,
}

impl FormatDateOptions {
    /// Options that only name a preset.
    #[must_use]
    pub fn named(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            overrides: DateTimeOptions::default(),
        }
    }
}

impl From<DateTimeOptions> for FormatDateOptions {
    fn from(overrides: DateTimeOptions) -> Self {
        Self {
            format: None,
            overrides,
        }
    }
}

/// Per-call number options; see [`FormatDateOptions`].
#[derive(Debug, Clone, Default)]
pub struct FormatNumberOptions {
    /// Name of a [`CustomFormats`] preset to start from.
    pub format: Option<String>,
    /// Fields that win over the preset.
    pub overrides: NumberOptions,
}

impl FormatNumberOptions {
    /// Options that only name a preset.
    #[must_use]
    pub fn named(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            overrides: NumberOptions::default(),
        }
    }
}

impl From<NumberOptions> for FormatNumberOptions {
    fn from(overrides: NumberOptions) -> Self {
        Self {
            format: None,
            overrides,
        }
    }
}

/// Per-call relative-time options; see [`FormatDateOptions`].
#[derive(Debug, Clone, Default)]
pub struct FormatRelativeTimeOptions {
    /// Name of a [`CustomFormats`] preset to start from.
    pub format: Option<String>,
    /// Fields that win over the preset.
    pub overrides: RelativeTimeOptions,
}

impl From<RelativeTimeOptions> for FormatRelativeTimeOptions {
    fn from(overrides: RelativeTimeOptions) -> Self {
        Self {
            format: None,
            overrides,
        }
    }
}

/// Per-call list options; see [`FormatDateOptions`].
#[derive(Debug, Clone, Default)]
pub struct FormatListOptions {
    /// Name of a [`CustomFormats`] preset to start from.
    pub format: Option<String>,
    /// Fields that win over the preset.
    pub overrides: ListOptions,
}

impl From<ListOptions> for FormatListOptions {
    fn from(overrides: ListOptions) -> Self {
        Self {
            format: None,
            overrides,
        }
    }
}

/// Configuration for one formatting context.
///
/// `R` is the rich-node type produced by tag handlers; plain-text
/// applications use the default `String`.
pub struct IntlConfig<R = String> {
    locale: LanguageIdentifier,
    default_locale: LanguageIdentifier,
    time_zone: Option<String>,
    messages: MessageCatalog,
    formats: CustomFormats,
    default_tags: FxHashMap<String, TagHandler<R>>,
    provider: Rc<dyn IntlProvider>,
    on_error: OnError,
}

impl<R> fmt::Debug for IntlConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlConfig")
            .field("locale", &self.locale)
            .field("default_locale", &self.default_locale)
            .field("time_zone", &self.time_zone)
            .field("messages", &self.messages.len())
            .field("default_tags", &self.default_tags.len())
            .finish_non_exhaustive()
    }
}

impl<R> IntlConfig<R> {
    /// Parse and validate both locale tags.
    ///
    /// An invalid tag is a hard construction failure
    /// ([`IntlError::InvalidConfig`]); there is no fallback locale.
    pub fn new(locale: &str, default_locale: &str) -> Result<Self, IntlError> {
        let locale = parse_tag(locale)?;
        let default_locale = parse_tag(default_locale)?;
        Ok(Self {
            locale,
            default_locale,
            time_zone: None,
            messages: MessageCatalog::new(),
            formats: CustomFormats::default(),
            default_tags: FxHashMap::default(),
            provider: Rc::new(BuiltinProvider::new()),
            on_error: tracing_sink(),
        })
    }

    /// Set the time zone injected into date/time options that carry none.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    /// Replace the message catalog.
    #[must_use]
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Add one message template to the catalog.
    #[must_use]
    pub fn with_message(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(id, template);
        self
    }

    /// Replace the named format presets.
    #[must_use]
    pub fn with_formats(mut self, formats: CustomFormats) -> Self {
        self.formats = formats;
        self
    }

    /// Register a default tag handler, used when a format call supplies
    /// no handler for the tag name.
    #[must_use]
    pub fn with_tag(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(Vec<crate::substitute::Fragment<R>>) -> R + 'static,
    ) -> Self {
        self.default_tags.insert(name.into(), Rc::new(handler));
        self
    }

    /// Replace the locale-primitive provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Rc<dyn IntlProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Replace the error sink.
    #[must_use]
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// The active locale.
    #[must_use]
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// The ultimate-fallback locale.
    #[must_use]
    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    /// The configured time zone, if any.
    #[must_use]
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    /// The named format presets.
    #[must_use]
    pub fn formats(&self) -> &CustomFormats {
        &self.formats
    }

    /// The message catalog.
    #[must_use]
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    pub(crate) fn provider(&self) -> &Rc<dyn IntlProvider> {
        &self.provider
    }

    pub(crate) fn on_error(&self) -> &OnError {
        &self.on_error
    }

    pub(crate) fn default_tag(&self, name: &str) -> Option<&TagHandler<R>> {
        self.default_tags.get(name)
    }

    /// Effective date options: preset (if named and known) overridden
    /// field-wise, then the config time zone injected if none is set.
    #[must_use]
    pub fn resolved_date_options(&self, call: &FormatDateOptions) -> DateTimeOptions {
        self.resolve_date_time(call, &self.formats.date)
    }

    /// Effective time options; like [`Self::resolved_date_options`] but
    /// against the `time` preset namespace.
    #[must_use]
    pub fn resolved_time_options(&self, call: &FormatDateOptions) -> DateTimeOptions {
        self.resolve_date_time(call, &self.formats.time)
    }

    fn resolve_date_time(
        &self,
        call: &FormatDateOptions,
        presets: &FxHashMap<String, DateTimeOptions>,
    ) -> DateTimeOptions {
        let preset = call.format.as_deref().and_then(|name| presets.get(name));
        let mut merged = match preset {
            Some(preset) => call.overrides.merged_over(preset),
            None => call.overrides.clone(),
        };
        if merged.time_zone.is_none() {
            merged.time_zone = self.time_zone.clone();
        }
        merged
    }

    /// Effective number options.
    #[must_use]
    pub fn resolved_number_options(&self, call: &FormatNumberOptions) -> NumberOptions {
        match call.format.as_deref().and_then(|name| self.formats.number.get(name)) {
            Some(preset) => call.overrides.merged_over(preset),
            None => call.overrides.clone(),
        }
    }

    /// Effective relative-time options.
    #[must_use]
    pub fn resolved_relative_time_options(
        &self,
        call: &FormatRelativeTimeOptions,
    ) -> RelativeTimeOptions {
        match call
            .format
            .as_deref()
            .and_then(|name| self.formats.relative_time.get(name))
        {
            Some(preset) => call.overrides.merged_over(preset),
            None => call.overrides.clone(),
        }
    }

    /// Effective list options.
    #[must_use]
    pub fn resolved_list_options(&self, call: &FormatListOptions) -> ListOptions {
        match call.format.as_deref().and_then(|name| self.formats.list.get(name)) {
            Some(preset) => call.overrides.merged_over(preset),
            None => call.overrides.clone(),
        }
    }
}

fn parse_tag(tag: &str) -> Result<LanguageIdentifier, IntlError> {
    tag.parse().map_err(|err| IntlError::InvalidConfig {
        detail: format!("invalid locale tag {tag:?}: {err:?}"),
    })
}
