#![forbid(unsafe_code)]

//! ICU MessageFormat parser for Glossa.
//!
//! Turns a template string such as
//! `"{count, plural, one {# item} other {# items}}"` or
//! `"<b>{name}</b> items"` into an ordered [`MessageElement`] tree that the
//! formatting core can walk. Parsing is a pure function of the input: the
//! same template always yields the same tree, which is what makes caching
//! parse results by template content safe.
//!
//! # Supported grammar
//!
//! - Literal text with ICU apostrophe quoting (`''` is a literal
//!   apostrophe; `'` quotes runs containing `{`, `}`, `#`, `<`).
//! - Plain arguments: `{name}`.
//! - Typed arguments: `{n, number}`, `{d, date, long}`, `{t, time, short}`
//!   with an optional free-form style token.
//! - Branching arguments: `{n, plural, offset:1 =0 {…} one {…} other {…}}`,
//!   `{n, selectordinal, …}`, `{g, select, …}`. The `other` branch is
//!   mandatory, matching ICU.
//! - `#` inside plural branches, substituting the offset-adjusted value.
//! - XML-ish tags for rich content: `<b>…</b>` and `<br/>`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unbalanced braces | `{` without `}` | [`ParseError`] with byte offset |
//! | Missing `other` | plural/select without it | [`ParseError::MissingOther`] |
//! | Mismatched tag | `<b>…</i>` | [`ParseError::MismatchedTag`] |
//! | Pathological nesting | depth over [`MAX_NESTING_DEPTH`] | [`ParseError::TooDeep`] |
//!
//! The parser never panics; every malformed input maps to a [`ParseError`].

pub mod ast;
pub mod parse;

pub use ast::{MessageElement, PluralArgKind, PluralBranch, PluralSelector, SelectBranch};
pub use parse::{MAX_NESTING_DEPTH, ParseError, parse};
