//! Message catalog and descriptor resolution.
//!
//! A catalog maps ids to entries that are either raw ICU template strings
//! (parsed lazily, cached by content) or trees parsed ahead of time at
//! build or load time. Resolution turns a [`MessageDescriptor`] into the
//! tree to substitute into, reporting through the error sink and falling
//! back rather than failing:
//!
//! - catalog hit: parse-and-cache a raw template, or use a pre-parsed
//!   tree directly;
//! - catalog miss with a default message: report `MissingTranslation`,
//!   use the parsed default;
//! - catalog miss without one: report `MissingTranslation`, yield the
//!   empty tree;
//! - malformed syntax anywhere: report `MessageFormat`, fall back to the
//!   literal source text as a single text node.

use std::rc::Rc;

use glossa_parser::MessageElement;
use rustc_hash::FxHashMap;

use crate::cache::FormatterCaches;
use crate::error::IntlError;

/// Reference to a message: an id into the catalog, an inline default, or
/// both. The description is documentation for translators and extraction
/// tooling; it never affects formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageDescriptor<'a> {
    /// Catalog id.
    pub id: Option<&'a str>,
    /// Source-language template used when the catalog has no entry.
    pub default_message: Option<&'a str>,
    /// Context for translators; unused at format time.
    pub description: Option<&'a str>,
}

impl<'a> MessageDescriptor<'a> {
    /// Descriptor with only an id.
    #[must_use]
    pub fn id(id: &'a str) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// Attach a source-language default message.
    #[must_use]
    pub fn with_default(mut self, default_message: &'a str) -> Self {
        self.default_message = Some(default_message);
        self
    }
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub enum MessageEntry {
    /// Raw ICU template source, parsed on first use.
    Template(String),
    /// A tree parsed ahead of time.
    Parsed(Rc<[MessageElement]>),
}

/// Messages for one locale, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: FxHashMap<String, MessageEntry>,
}

impl MessageCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw template.
    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) {
        self.entries
            .insert(id.into(), MessageEntry::Template(template.into()));
    }

    /// Add a pre-parsed tree.
    pub fn insert_parsed(&mut self, id: impl Into<String>, tree: Rc<[MessageElement]>) {
        self.entries.insert(id.into(), MessageEntry::Parsed(tree));
    }

    /// Entry for an id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MessageEntry> {
        self.entries.get(id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: Into<String>, T: Into<String>> FromIterator<(I, T)> for MessageCatalog {
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        let mut catalog = Self::new();
        for (id, template) in iter {
            catalog.insert(id, template);
        }
        catalog
    }
}

/// Resolve a descriptor to the tree to substitute into. Never fails;
/// reports through `report` and falls back instead.
pub(crate) fn resolve(
    descriptor: &MessageDescriptor<'_>,
    catalog: &MessageCatalog,
    caches: &FormatterCaches,
    locale: &str,
    report: &dyn Fn(IntlError),
) -> Rc<[MessageElement]> {
    if let Some(id) = descriptor.id {
        match catalog.get(id) {
            Some(MessageEntry::Parsed(tree)) => return Rc::clone(tree),
            Some(MessageEntry::Template(source)) => {
                return parse_with_fallback(source, Some(id), caches, report);
            }
            None => report(IntlError::MissingTranslation {
                id: Some(id.to_owned()),
                locale: locale.to_owned(),
            }),
        }
    }
    match descriptor.default_message {
        Some(source) => parse_with_fallback(source, descriptor.id, caches, report),
        None => {
            if descriptor.id.is_none() {
                report(IntlError::MissingTranslation {
                    id: None,
                    locale: locale.to_owned(),
                });
            }
            Rc::from(Vec::<MessageElement>::new())
        }
    }
}

/// Parse a template, falling back to its literal source on failure.
fn parse_with_fallback(
    source: &str,
    id: Option<&str>,
    caches: &FormatterCaches,
    report: &dyn Fn(IntlError),
) -> Rc<[MessageElement]> {
    match caches.message(source) {
        Ok(tree) => tree,
        Err(err) => {
            report(IntlError::MessageFormat {
                id: id.map(str::to_owned),
                template: Some(source.to_owned()),
                detail: err.to_string(),
            });
            Rc::from(vec![MessageElement::Literal(source.to_owned())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn capture() -> (Rc<RefCell<Vec<IntlError>>>, impl Fn(IntlError)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = Rc::clone(&seen);
            move |err: IntlError| seen.borrow_mut().push(err)
        };
        (seen, sink)
    }

    #[test]
    fn catalog_hit_parses_and_caches() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("greeting", "Hello, {name}!");
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let first = resolve(
            &MessageDescriptor::id("greeting"),
            &catalog,
            &caches,
            "en",
            &sink,
        );
        let again = resolve(
            &MessageDescriptor::id("greeting"),
            &catalog,
            &caches,
            "en",
            &sink,
        );
        assert!(Rc::ptr_eq(&first, &again));
        assert!(seen.borrow().is_empty());
        assert_eq!(caches.stats().messages.misses, 1);
    }

    #[test]
    fn pre_parsed_entries_skip_the_parser() {
        let mut catalog = MessageCatalog::new();
        let tree: Rc<[MessageElement]> = Rc::from(vec![MessageElement::Literal("hi".into())]);
        catalog.insert_parsed("greeting", Rc::clone(&tree));
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let resolved = resolve(
            &MessageDescriptor::id("greeting"),
            &catalog,
            &caches,
            "en",
            &sink,
        );
        assert!(Rc::ptr_eq(&resolved, &tree));
        assert!(seen.borrow().is_empty());
        assert_eq!(caches.stats().messages.misses, 0);
    }

    #[test]
    fn miss_with_default_reports_and_uses_default() {
        let catalog = MessageCatalog::new();
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let tree = resolve(
            &MessageDescriptor::id("greeting").with_default("Hello!"),
            &catalog,
            &caches,
            "fr",
            &sink,
        );
        assert_eq!(&*tree, &[MessageElement::Literal("Hello!".into())]);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(matches!(
            &seen[0],
            IntlError::MissingTranslation { id: Some(id), locale } if id == "greeting" && locale == "fr"
        ));
    }

    #[test]
    fn miss_without_default_yields_empty_tree() {
        let catalog = MessageCatalog::new();
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let tree = resolve(
            &MessageDescriptor::id("greeting"),
            &catalog,
            &caches,
            "en",
            &sink,
        );
        assert!(tree.is_empty());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn malformed_template_falls_back_to_literal_source() {
        let mut catalog = MessageCatalog::new();
        catalog.insert("broken", "Hello, {name");
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let tree = resolve(
            &MessageDescriptor::id("broken"),
            &catalog,
            &caches,
            "en",
            &sink,
        );
        assert_eq!(&*tree, &[MessageElement::Literal("Hello, {name".into())]);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(matches!(&seen[0], IntlError::MessageFormat { .. }));
    }

    #[test]
    fn default_only_descriptor_is_silent() {
        let catalog = MessageCatalog::new();
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let descriptor = MessageDescriptor {
            default_message: Some("Inline only"),
            ..Default::default()
        };
        let tree = resolve(&descriptor, &catalog, &caches, "en", &sink);
        assert_eq!(&*tree, &[MessageElement::Literal("Inline only".into())]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn empty_descriptor_reports_missing_translation() {
        let catalog = MessageCatalog::new();
        let caches = FormatterCaches::new();
        let (seen, sink) = capture();

        let tree = resolve(&MessageDescriptor::default(), &catalog, &caches, "en", &sink);
        assert!(tree.is_empty());
        assert!(matches!(
            &seen.borrow()[0],
            IntlError::MissingTranslation { id: None, .. }
        ));
    }
}
