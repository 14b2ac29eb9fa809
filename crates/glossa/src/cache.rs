//! Per-kind formatter memoization.
//!
//! Constructing a locale primitive is the expensive step; calling one is
//! cheap. [`FormatterCaches`] keeps one independent map per formatter
//! kind, keyed by `(locale, options)`, plus a message element-tree cache
//! keyed by template content. Because the options structs derive
//! `Hash + Eq`, canonicalization is inherent: two call sites building the
//! same option fields hit the same entry regardless of where the values
//! were allocated.
//!
//! # Invariants
//!
//! 1. **Never evicts**: entries live as long as the cache. The key space
//!    is bounded by the set of distinct `(locale, options)` pairs an
//!    application actually uses, so growth is bounded in practice. A
//!    fresh configuration gets a fresh cache.
//!
//! 2. **Misses are constructions**: [`KindStats::misses`] equals the
//!    number of provider constructor calls for that kind. Construction
//!    failures propagate to the caller and are not stored, so a failing
//!    key is re-attempted on the next request.
//!
//! 3. **Single-threaded**: interior mutability is `RefCell`/`Cell`; the
//!    type is not `Sync`. Wrap the owning instance in a lock for parallel
//!    use.

use std::cell::{Cell, RefCell};
use std::hash::Hash;
use std::rc::Rc;

use glossa_intl::{
    DateTimeFormatter, DateTimeOptions, DisplayNames, DisplayNamesOptions, IntlProvider,
    LanguageIdentifier, ListFormatter, ListOptions, NumberFormatter, NumberOptions,
    PluralOptions, PluralRules, ProviderError, RelativeTimeFormatter, RelativeTimeOptions,
};
use glossa_parser::{MessageElement, ParseError};
use rustc_hash::FxHashMap;

/// Hit/miss counters for one cache kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindStats {
    /// Requests served from the cache.
    pub hits: u64,
    /// Requests that constructed a new entry (or attempted to).
    pub misses: u64,
}

impl KindStats {
    /// Number of construction attempts; equal to `misses`.
    #[must_use]
    pub fn constructions(&self) -> u64 {
        self.misses
    }

    fn hit(self) -> Self {
        Self {
            hits: self.hits + 1,
            ..self
        }
    }

    fn miss(self) -> Self {
        Self {
            misses: self.misses + 1,
            ..self
        }
    }
}

/// Snapshot of every cache's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct CacheStats {
    pub date_time: KindStats,
    pub number: KindStats,
    pub plural_rules: KindStats,
    pub relative_time: KindStats,
    pub list: KindStats,
    pub display_names: KindStats,
    pub messages: KindStats,
}

/// One kind's map plus its counters.
struct Slot<K, T: ?Sized> {
    map: RefCell<FxHashMap<K, Rc<T>>>,
    stats: Cell<KindStats>,
}

impl<K, T: ?Sized> Default for Slot<K, T> {
    fn default() -> Self {
        Self {
            map: RefCell::new(FxHashMap::default()),
            stats: Cell::new(KindStats::default()),
        }
    }
}

impl<K: Eq + Hash, T: ?Sized> Slot<K, T> {
    fn get_or_build<E>(
        &self,
        kind: &'static str,
        key: K,
        build: impl FnOnce() -> Result<Box<T>, E>,
    ) -> Result<Rc<T>, E> {
        if let Some(hit) = self.map.borrow().get(&key) {
            self.stats.set(self.stats.get().hit());
            return Ok(Rc::clone(hit));
        }
        self.stats.set(self.stats.get().miss());
        tracing::debug!(kind, "formatter cache miss");
        let built: Rc<T> = Rc::from(build()?);
        self.map.borrow_mut().insert(key, Rc::clone(&built));
        Ok(built)
    }
}

/// One independent memoization map per formatter kind.
#[derive(Default)]
pub struct FormatterCaches {
    date_time: Slot<(LanguageIdentifier, DateTimeOptions), dyn DateTimeFormatter>,
    number: Slot<(LanguageIdentifier, NumberOptions), dyn NumberFormatter>,
    plural_rules: Slot<(LanguageIdentifier, PluralOptions), dyn PluralRules>,
    relative_time: Slot<(LanguageIdentifier, RelativeTimeOptions), dyn RelativeTimeFormatter>,
    list: Slot<(LanguageIdentifier, ListOptions), dyn ListFormatter>,
    display_names: Slot<(LanguageIdentifier, DisplayNamesOptions), dyn DisplayNames>,
    messages: Slot<String, [MessageElement]>,
}

impl FormatterCaches {
    /// Empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Date/time formatter for `(locale, options)`, constructing on miss.
    pub fn date_time(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &DateTimeOptions,
    ) -> Result<Rc<dyn DateTimeFormatter>, ProviderError> {
        self.date_time.get_or_build("date_time", (locale.clone(), options.clone()), || {
            provider.date_time(locale, options)
        })
    }

    /// Number formatter for `(locale, options)`, constructing on miss.
    pub fn number(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &NumberOptions,
    ) -> Result<Rc<dyn NumberFormatter>, ProviderError> {
        self.number.get_or_build("number", (locale.clone(), options.clone()), || {
            provider.number(locale, options)
        })
    }

    /// Plural rules for `(locale, options)`, constructing on miss.
    pub fn plural_rules(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &PluralOptions,
    ) -> Result<Rc<dyn PluralRules>, ProviderError> {
        self.plural_rules.get_or_build("plural_rules", (locale.clone(), options.clone()), || {
            provider.plural_rules(locale, options)
        })
    }

    /// Relative-time formatter for `(locale, options)`, constructing on miss.
    pub fn relative_time(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &RelativeTimeOptions,
    ) -> Result<Rc<dyn RelativeTimeFormatter>, ProviderError> {
        self.relative_time.get_or_build("relative_time", (locale.clone(), options.clone()), || {
            provider.relative_time(locale, options)
        })
    }

    /// List formatter for `(locale, options)`, constructing on miss.
    pub fn list(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &ListOptions,
    ) -> Result<Rc<dyn ListFormatter>, ProviderError> {
        self.list.get_or_build("list", (locale.clone(), options.clone()), || {
            provider.list(locale, options)
        })
    }

    /// Display-names lookup for `(locale, options)`, constructing on miss.
    pub fn display_names(
        &self,
        provider: &dyn IntlProvider,
        locale: &LanguageIdentifier,
        options: &DisplayNamesOptions,
    ) -> Result<Rc<dyn DisplayNames>, ProviderError> {
        self.display_names.get_or_build("display_names", (locale.clone(), options.clone()), || {
            provider.display_names(locale, options)
        })
    }

    /// Parsed element tree for a template, parsing and caching on miss.
    ///
    /// Parse failures are returned and not cached, so a malformed template
    /// re-parses (and re-fails) on each request; callers report once and
    /// fall back, so repeats only occur if the caller retries.
    pub fn message(&self, template: &str) -> Result<Rc<[MessageElement]>, ParseError> {
        if let Some(hit) = self.messages.map.borrow().get(template) {
            self.messages.stats.set(self.messages.stats.get().hit());
            return Ok(Rc::clone(hit));
        }
        self.messages.stats.set(self.messages.stats.get().miss());
        tracing::debug!(kind = "message", "parse cache miss");
        let tree: Rc<[MessageElement]> = Rc::from(glossa_parser::parse(template)?);
        self.messages
            .map
            .borrow_mut()
            .insert(template.to_owned(), Rc::clone(&tree));
        Ok(tree)
    }

    /// Counter snapshot across all kinds.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            date_time: self.date_time.stats.get(),
            number: self.number.stats.get(),
            plural_rules: self.plural_rules.stats.get(),
            relative_time: self.relative_time.stats.get(),
            list: self.list.stats.get(),
            display_names: self.display_names.stats.get(),
            messages: self.messages.stats.get(),
        }
    }
}
