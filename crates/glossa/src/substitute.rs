//! Value substitution over a parsed message tree.
//!
//! Walks the element tree in document order, replacing placeholders from
//! a value map and producing an interleaved fragment list: text runs plus
//! rich nodes produced by tag handlers. Adjacent text fragments are
//! concatenated as they are emitted, and an output that ends up as a
//! single text run collapses to a plain string.
//!
//! # Invariants
//!
//! 1. **Non-throwing**: every failure (missing value, wrong-typed value,
//!    primitive construction failure, depth overflow) is reported through
//!    the error sink and replaced by its documented fallback; the walk
//!    always completes.
//!
//! 2. **Values resolve once**: a placeholder name is looked up once per
//!    occurrence and matched exhaustively on its variant.
//!
//! 3. **Post-order tags**: a tag handler receives fully substituted
//!    children; handlers never see raw template text.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use glossa_intl::{
    CivilDateTime, DateTimeOptions, DateTimeStyle, NumberOptions, NumberStyle, PluralKind,
    PluralOptions,
};
use glossa_parser::{MessageElement, PluralArgKind, PluralSelector};

use crate::cache::FormatterCaches;
use crate::config::IntlConfig;
use crate::error::{FormatterKind, IntlError};

/// Maximum element-tree depth the substitution walk will follow.
///
/// Trees from the bundled parser are already bounded well below this;
/// the limit guards against pathological pre-parsed trees inserted
/// directly into a catalog.
pub const MAX_SUBSTITUTION_DEPTH: usize = 64;

/// A tag handler: wraps substituted children in a rich node.
pub type TagHandler<R> = Rc<dyn Fn(Vec<Fragment<R>>) -> R>;

/// A placeholder value.
///
/// The variant is matched exhaustively at each placeholder site; a value
/// whose variant does not fit its placeholder kind (for example a string
/// under `{n, number}`) is a reported error, not a coercion.
pub enum Value<R = String> {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A boolean; renders as `true`/`false` in plain placeholders.
    Bool(bool),
    /// A civil date-time, for `{d, date}` / `{t, time}` placeholders.
    DateTime(CivilDateTime),
    /// A pre-built rich node, passed through as a fragment.
    Rich(R),
    /// A tag handler for `<name>…</name>` containers.
    Tag(TagHandler<R>),
}

impl<R> Value<R> {
    /// Wrap a closure as a tag handler value.
    pub fn tag(handler: impl Fn(Vec<Fragment<R>>) -> R + 'static) -> Self {
        Self::Tag(Rc::new(handler))
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::DateTime(_) => "date-time",
            Self::Rich(_) => "rich node",
            Self::Tag(_) => "tag handler",
        }
    }
}

impl<R: Clone> Clone for Value<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Str(s) => Self::Str(s.clone()),
            Self::Int(n) => Self::Int(*n),
            Self::Float(n) => Self::Float(*n),
            Self::Bool(b) => Self::Bool(*b),
            Self::DateTime(dt) => Self::DateTime(*dt),
            Self::Rich(r) => Self::Rich(r.clone()),
            Self::Tag(f) => Self::Tag(Rc::clone(f)),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for Value<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Self::Rich(r) => f.debug_tuple("Rich").field(r).finish(),
            Self::Tag(_) => f.write_str("Tag(..)"),
        }
    }
}

impl<R> From<&str> for Value<R> {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl<R> From<String> for Value<R> {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<R> From<i64> for Value<R> {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl<R> From<i32> for Value<R> {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl<R> From<f64> for Value<R> {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl<R> From<bool> for Value<R> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<R> From<CivilDateTime> for Value<R> {
    fn from(dt: CivilDateTime) -> Self {
        Self::DateTime(dt)
    }
}

/// Placeholder values by name.
pub type Values<R = String> = HashMap<String, Value<R>>;

/// One piece of substituted output.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<R = String> {
    /// A run of plain text (maximal: never adjacent to another text run).
    Text(String),
    /// A rich node from a tag handler or a [`Value::Rich`] value.
    Node(R),
}

/// The result of formatting a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<R = String> {
    /// Pure-text output, collapsed to one string.
    Text(String),
    /// Mixed output: at least one rich node among the fragments.
    Rich(Vec<Fragment<R>>),
}

impl<R> Output<R> {
    /// Collapse a fragment list: empty or single-text becomes [`Output::Text`].
    #[must_use]
    pub fn from_fragments(mut fragments: Vec<Fragment<R>>) -> Self {
        match fragments.len() {
            0 => Self::Text(String::new()),
            1 => match fragments.pop() {
                Some(Fragment::Text(text)) => Self::Text(text),
                Some(node @ Fragment::Node(_)) => Self::Rich(vec![node]),
                None => Self::Text(String::new()),
            },
            _ => Self::Rich(fragments),
        }
    }

    /// The collapsed text, when the output is pure text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich(_) => None,
        }
    }
}

/// Everything a substitution walk needs, borrowed from the facade.
pub(crate) struct SubstitutionCtx<'a, R> {
    pub config: &'a IntlConfig<R>,
    pub caches: &'a FormatterCaches,
    pub values: &'a Values<R>,
    pub message_id: Option<&'a str>,
    pub report: &'a dyn Fn(IntlError),
}

impl<R: Clone> SubstitutionCtx<'_, R> {
    fn message_format(&self, detail: String) -> IntlError {
        IntlError::MessageFormat {
            id: self.message_id.map(str::to_owned),
            template: None,
            detail,
        }
    }

    fn wrong_type(&self, kind: FormatterKind, name: &str, value: &Value<R>) {
        (self.report)(IntlError::Format {
            kind,
            detail: format!(
                "placeholder {name:?} needs a {kind} value, got {}",
                value.variant_name()
            ),
        });
    }

    /// Render a value as plain text, the way an untyped `{name}` does.
    fn stringify(&self, value: &Value<R>) -> Option<String> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::DateTime(dt) => Some(dt.to_string()),
            Value::Rich(_) | Value::Tag(_) => None,
        }
    }

    fn format_number(&self, value: f64, options: &NumberOptions) -> Option<String> {
        match self.caches.number(
            self.config.provider().as_ref(),
            self.config.locale(),
            options,
        ) {
            Ok(formatter) => Some(formatter.format(value)),
            Err(err) => {
                (self.report)(IntlError::from_provider(FormatterKind::Number, err));
                None
            }
        }
    }

    fn format_date_time(&self, value: &CivilDateTime, options: &DateTimeOptions) -> String {
        match self.caches.date_time(
            self.config.provider().as_ref(),
            self.config.locale(),
            options,
        ) {
            Ok(formatter) => formatter.format(value),
            Err(err) => {
                (self.report)(IntlError::from_provider(FormatterKind::DateTime, err));
                value.to_string()
            }
        }
    }

    fn select_category(&self, value: f64, kind: PluralArgKind) -> &'static str {
        let options = PluralOptions {
            kind: Some(match kind {
                PluralArgKind::Cardinal => PluralKind::Cardinal,
                PluralArgKind::Ordinal => PluralKind::Ordinal,
            }),
        };
        match self.caches.plural_rules(
            self.config.provider().as_ref(),
            self.config.locale(),
            &options,
        ) {
            Ok(rules) => rules.select(value).as_str(),
            Err(err) => {
                (self.report)(IntlError::from_provider(FormatterKind::Plural, err));
                "other"
            }
        }
    }
}

/// Append text, merging into a trailing text fragment.
fn push_text<R>(fragments: &mut Vec<Fragment<R>>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Fragment::Text(last)) = fragments.last_mut() {
        last.push_str(text);
    } else {
        fragments.push(Fragment::Text(text.to_owned()));
    }
}

/// Splice already-built fragments, keeping text runs maximal.
fn extend_fragments<R>(fragments: &mut Vec<Fragment<R>>, more: Vec<Fragment<R>>) {
    for fragment in more {
        match fragment {
            Fragment::Text(text) => push_text(fragments, &text),
            node @ Fragment::Node(_) => fragments.push(node),
        }
    }
}

/// Substitute values into a parsed tree, producing the fragment list.
pub(crate) fn substitute<R: Clone>(
    ctx: &SubstitutionCtx<'_, R>,
    tree: &[MessageElement],
) -> Vec<Fragment<R>> {
    let mut fragments = Vec::new();
    walk(ctx, tree, None, 0, &mut fragments);
    fragments
}

fn walk<R: Clone>(
    ctx: &SubstitutionCtx<'_, R>,
    elements: &[MessageElement],
    pound: Option<&str>,
    depth: usize,
    out: &mut Vec<Fragment<R>>,
) {
    if depth > MAX_SUBSTITUTION_DEPTH {
        (ctx.report)(ctx.message_format(format!(
            "message tree exceeds substitution depth limit ({MAX_SUBSTITUTION_DEPTH})"
        )));
        return;
    }
    for element in elements {
        match element {
            MessageElement::Literal(text) => push_text(out, text),
            MessageElement::Argument { name } => {
                let Some(value) = lookup(ctx, name) else {
                    continue;
                };
                match value {
                    Value::Rich(node) => out.push(Fragment::Node(node.clone())),
                    other => match ctx.stringify(other) {
                        Some(text) => push_text(out, &text),
                        None => (ctx.report)(ctx.message_format(format!(
                            "placeholder {name:?} holds a {}, which has no text form",
                            other.variant_name()
                        ))),
                    },
                }
            }
            MessageElement::Number { name, style } => {
                let Some(value) = lookup(ctx, name) else {
                    continue;
                };
                let Some(n) = numeric(value) else {
                    ctx.wrong_type(FormatterKind::Number, name, value);
                    if let Some(raw) = ctx.stringify(value) {
                        push_text(out, &raw);
                    }
                    continue;
                };
                let options = number_style_options(ctx.config, style.as_deref());
                match ctx.format_number(n, &options) {
                    Some(text) => push_text(out, &text),
                    None => push_text(out, &n.to_string()),
                }
            }
            MessageElement::Date { name, style } => {
                date_time_placeholder(ctx, name, style.as_deref(), true, out);
            }
            MessageElement::Time { name, style } => {
                date_time_placeholder(ctx, name, style.as_deref(), false, out);
            }
            MessageElement::Plural {
                name,
                kind,
                offset,
                branches,
            } => {
                let Some(value) = lookup(ctx, name) else {
                    continue;
                };
                let n = match numeric(value) {
                    Some(n) => n,
                    None => {
                        ctx.wrong_type(FormatterKind::Plural, name, value);
                        0.0
                    }
                };
                let adjusted = n - (*offset as f64);
                // Exact selectors match the unadjusted value.
                let branch = branches
                    .iter()
                    .find(|branch| {
                        matches!(branch.selector, PluralSelector::Exact(k) if (k as f64) == n)
                    })
                    .or_else(|| {
                        let category = ctx.select_category(adjusted, *kind);
                        keyword_branch(branches, category)
                            .or_else(|| keyword_branch(branches, "other"))
                    });
                let Some(branch) = branch else {
                    (ctx.report)(ctx.message_format(format!(
                        "plural placeholder {name:?} has no matching branch"
                    )));
                    continue;
                };
                let pound_text = ctx
                    .format_number(adjusted, &NumberOptions::default())
                    .unwrap_or_else(|| adjusted.to_string());
                walk(ctx, &branch.message, Some(&pound_text), depth + 1, out);
            }
            MessageElement::Select { name, branches } => {
                let Some(value) = lookup(ctx, name) else {
                    continue;
                };
                let key = match ctx.stringify(value) {
                    Some(key) => key,
                    None => {
                        (ctx.report)(ctx.message_format(format!(
                            "select placeholder {name:?} holds a {}, which has no key form",
                            value.variant_name()
                        )));
                        "other".to_owned()
                    }
                };
                let branch = branches
                    .iter()
                    .find(|branch| branch.key == key)
                    .or_else(|| branches.iter().find(|branch| branch.key == "other"));
                if let Some(branch) = branch {
                    walk(ctx, &branch.message, pound, depth + 1, out);
                }
            }
            MessageElement::Pound => match pound {
                Some(text) => push_text(out, text),
                None => push_text(out, "#"),
            },
            MessageElement::Tag { name, children } => {
                let mut inner = Vec::new();
                walk(ctx, children, pound, depth + 1, &mut inner);
                match tag_handler(ctx, name) {
                    Some(handler) => out.push(Fragment::Node(handler(inner))),
                    None => {
                        // Unknown tag: keep the delimiters as literal text,
                        // preserving the self-closing form.
                        if children.is_empty() {
                            push_text(out, &format!("<{name}/>"));
                        } else {
                            push_text(out, &format!("<{name}>"));
                            extend_fragments(out, inner);
                            push_text(out, &format!("</{name}>"));
                        }
                    }
                }
            }
        }
    }
}

/// Look up a placeholder value, reporting (once) when it is missing.
fn lookup<'v, R: Clone>(ctx: &SubstitutionCtx<'v, R>, name: &str) -> Option<&'v Value<R>> {
    let value = ctx.values.get(name);
    if value.is_none() {
        (ctx.report)(ctx.message_format(format!("no value supplied for placeholder {name:?}")));
    }
    value
}

fn numeric<R>(value: &Value<R>) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

fn keyword_branch<'b>(
    branches: &'b [glossa_parser::PluralBranch],
    keyword: &str,
) -> Option<&'b glossa_parser::PluralBranch> {
    branches.iter().find(
        |branch| matches!(&branch.selector, PluralSelector::Keyword(k) if k == keyword),
    )
}

fn tag_handler<R: Clone>(ctx: &SubstitutionCtx<'_, R>, name: &str) -> Option<TagHandler<R>> {
    match ctx.values.get(name) {
        Some(Value::Tag(handler)) => Some(Rc::clone(handler)),
        Some(other) => {
            (ctx.report)(ctx.message_format(format!(
                "tag {name:?} needs a tag handler value, got {}",
                other.variant_name()
            )));
            None
        }
        None => ctx.config.default_tag(name).cloned(),
    }
}

/// Options for an inline `{n, number, style}` placeholder.
fn number_style_options<R>(config: &IntlConfig<R>, style: Option<&str>) -> NumberOptions {
    match style {
        None => NumberOptions::default(),
        Some("percent") => NumberOptions {
            style: Some(NumberStyle::Percent),
            ..Default::default()
        },
        Some("integer") => NumberOptions {
            maximum_fraction_digits: Some(0),
            ..Default::default()
        },
        // Anything else names a custom format preset; unknown names fall
        // back to default options.
        Some(name) => config
            .formats()
            .number
            .get(name)
            .cloned()
            .unwrap_or_default(),
    }
}

/// Options for an inline `{d, date, style}` / `{t, time, style}` placeholder.
fn date_time_style_options<R>(
    config: &IntlConfig<R>,
    style: Option<&str>,
    is_date: bool,
) -> DateTimeOptions {
    let default_style = |s: DateTimeStyle| {
        if is_date {
            DateTimeOptions {
                date_style: Some(s),
                ..Default::default()
            }
        } else {
            DateTimeOptions {
                time_style: Some(s),
                ..Default::default()
            }
        }
    };
    let mut options = match style {
        None => default_style(DateTimeStyle::Short),
        Some(token) => match DateTimeStyle::from_token(token) {
            Some(s) => default_style(s),
            None => {
                let presets = if is_date {
                    &config.formats().date
                } else {
                    &config.formats().time
                };
                presets
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| default_style(DateTimeStyle::Short))
            }
        },
    };
    if options.time_zone.is_none() {
        options.time_zone = config.time_zone().map(str::to_owned);
    }
    options
}

fn date_time_placeholder<R: Clone>(
    ctx: &SubstitutionCtx<'_, R>,
    name: &str,
    style: Option<&str>,
    is_date: bool,
    out: &mut Vec<Fragment<R>>,
) {
    let Some(value) = lookup(ctx, name) else {
        return;
    };
    let Value::DateTime(dt) = value else {
        ctx.wrong_type(FormatterKind::DateTime, name, value);
        if let Some(raw) = ctx.stringify(value) {
            push_text(out, &raw);
        }
        return;
    };
    let options = date_time_style_options(ctx.config, style, is_date);
    push_text(out, &ctx.format_date_time(dt, &options));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_rules() {
        let output: Output = Output::from_fragments(vec![]);
        assert_eq!(output, Output::Text(String::new()));

        let output: Output = Output::from_fragments(vec![Fragment::Text("hi".into())]);
        assert_eq!(output, Output::Text("hi".into()));

        let output: Output<u32> = Output::from_fragments(vec![Fragment::Node(7)]);
        assert_eq!(output, Output::Rich(vec![Fragment::Node(7)]));
    }

    #[test]
    fn push_text_merges_adjacent_runs() {
        let mut fragments: Vec<Fragment> = Vec::new();
        push_text(&mut fragments, "a");
        push_text(&mut fragments, "b");
        assert_eq!(fragments, vec![Fragment::Text("ab".into())]);

        fragments.push(Fragment::Node("node".into()));
        push_text(&mut fragments, "c");
        push_text(&mut fragments, "");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2], Fragment::Text("c".into()));
    }

    #[test]
    fn value_conversions() {
        let v: Value = "x".into();
        assert!(matches!(v, Value::Str(_)));
        let v: Value = 3i64.into();
        assert!(matches!(v, Value::Int(3)));
        let v: Value = 0.5.into();
        assert!(matches!(v, Value::Float(_)));
        let v: Value = true.into();
        assert!(matches!(v, Value::Bool(true)));
        let v: Value = CivilDateTime::date(2020, 1, 2).into();
        assert!(matches!(v, Value::DateTime(_)));
    }
}
