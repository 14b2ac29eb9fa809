//! Parsed representation of an ICU message.
//!
//! A message is an ordered sequence of [`MessageElement`] nodes. Branching
//! nodes (plural, selectordinal, select) and tags hold nested sequences,
//! so the overall structure is a tree evaluated in document order.

/// One node of a parsed ICU message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageElement {
    /// A run of literal text (apostrophe quoting already resolved).
    Literal(String),
    /// A plain placeholder: `{name}`.
    Argument {
        /// Placeholder name.
        name: String,
    },
    /// A number placeholder: `{n, number}` or `{n, number, percent}`.
    Number {
        /// Placeholder name.
        name: String,
        /// Optional style token (`"percent"`, `"integer"`, or a named
        /// custom format), verbatim from the template.
        style: Option<String>,
    },
    /// A date placeholder: `{d, date}` or `{d, date, long}`.
    Date {
        /// Placeholder name.
        name: String,
        /// Optional style token (`"short"`, `"medium"`, `"long"`,
        /// `"full"`, or a named custom format).
        style: Option<String>,
    },
    /// A time placeholder: `{t, time}` or `{t, time, short}`.
    Time {
        /// Placeholder name.
        name: String,
        /// Optional style token, as for [`MessageElement::Date`].
        style: Option<String>,
    },
    /// A plural or selectordinal placeholder with per-category branches.
    Plural {
        /// Placeholder name.
        name: String,
        /// Cardinal (`plural`) or ordinal (`selectordinal`) selection.
        kind: PluralArgKind,
        /// Offset subtracted before keyword selection and `#` display.
        offset: i64,
        /// Branches in source order. Exactly one has the `other` selector.
        branches: Vec<PluralBranch>,
    },
    /// A select placeholder with per-key branches.
    Select {
        /// Placeholder name.
        name: String,
        /// Branches in source order. Exactly one has the key `other`.
        branches: Vec<SelectBranch>,
    },
    /// `#` inside a plural branch: the offset-adjusted, formatted value.
    Pound,
    /// A rich-content tag: `<name>children</name>` (or `<name/>` with no
    /// children).
    Tag {
        /// Tag name.
        name: String,
        /// Nested message inside the tag.
        children: Vec<MessageElement>,
    },
}

/// Whether a plural argument selects cardinal or ordinal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralArgKind {
    /// `{n, plural, …}`: cardinal categories.
    Cardinal,
    /// `{n, selectordinal, …}`: ordinal categories.
    Ordinal,
}

/// Selector of a single plural branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralSelector {
    /// Exact match: `=0`, `=1`, … Tested against the unadjusted value.
    Exact(i64),
    /// CLDR category keyword: `zero`, `one`, `two`, `few`, `many`, `other`.
    Keyword(String),
}

/// One branch of a plural/selectordinal argument.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralBranch {
    /// Which values this branch covers.
    pub selector: PluralSelector,
    /// The branch's nested message.
    pub message: Vec<MessageElement>,
}

/// One branch of a select argument.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBranch {
    /// Literal key the argument value is matched against.
    pub key: String,
    /// The branch's nested message.
    pub message: Vec<MessageElement>,
}

impl MessageElement {
    /// Placeholder name referenced by this node, if any.
    #[must_use]
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            Self::Argument { name }
            | Self::Number { name, .. }
            | Self::Date { name, .. }
            | Self::Time { name, .. }
            | Self::Plural { name, .. }
            | Self::Select { name, .. } => Some(name),
            Self::Literal(_) | Self::Pound | Self::Tag { .. } => None,
        }
    }
}
