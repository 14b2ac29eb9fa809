//! Recursive-descent parser over ICU message syntax.
//!
//! # Invariants
//!
//! 1. **Totality**: every input maps to `Ok(tree)` or `Err(ParseError)`;
//!    the parser never panics.
//!
//! 2. **Purity**: parsing has no side effects, so trees may be cached by
//!    template content.
//!
//! 3. **Bounded depth**: branch and tag nesting beyond
//!    [`MAX_NESTING_DEPTH`] is rejected with [`ParseError::TooDeep`]
//!    instead of recursing without bound.
//!
//! Top-level leniency: a lone `}` outside any argument and a `<` that does
//! not open a tag are literal text, matching how hand-written templates
//! actually look. Inside arguments the grammar is strict.

use thiserror::Error;

use crate::ast::{
    MessageElement, PluralArgKind, PluralBranch, PluralSelector, SelectBranch,
};

/// Maximum nesting depth of branches and tags.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Errors produced while parsing a message template.
///
/// Offsets are byte positions into the source template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended where more syntax was required.
    #[error("unexpected end of input at byte {offset}: expected {expected}")]
    UnexpectedEof {
        /// Byte offset of the end of input.
        offset: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// A character that does not fit the grammar at this position.
    #[error("unexpected character {found:?} at byte {offset}: expected {expected}")]
    Unexpected {
        /// Byte offset of the offending character.
        offset: usize,
        /// The character found.
        found: char,
        /// What the parser was looking for.
        expected: &'static str,
    },
    /// An argument type other than number/date/time/plural/selectordinal/select.
    #[error("unknown argument type {found:?} at byte {offset}")]
    UnknownArgType {
        /// Byte offset of the type token.
        offset: usize,
        /// The token found.
        found: String,
    },
    /// `offset:` not followed by an integer.
    #[error("invalid plural offset at byte {offset}")]
    BadOffset {
        /// Byte offset of the malformed value.
        offset: usize,
    },
    /// The same branch selector appeared twice in one argument.
    #[error("duplicate branch {key:?} for argument {name:?}")]
    DuplicateBranch {
        /// Argument name.
        name: String,
        /// The repeated selector, as written.
        key: String,
    },
    /// A plural/select argument without the mandatory `other` branch.
    #[error("argument {name:?} is missing the required 'other' branch")]
    MissingOther {
        /// Argument name.
        name: String,
    },
    /// A closing tag that does not match the open tag.
    #[error("mismatched closing tag </{found}> at byte {offset}: expected </{expected}>")]
    MismatchedTag {
        /// Byte offset of the closing tag.
        offset: usize,
        /// Tag name found.
        found: String,
        /// Tag name that was open.
        expected: String,
    },
    /// A closing tag with no corresponding open tag.
    #[error("closing tag </{found}> at byte {offset} has no open tag")]
    UnmatchedClosingTag {
        /// Byte offset of the closing tag.
        offset: usize,
        /// Tag name found.
        found: String,
    },
    /// Nesting beyond [`MAX_NESTING_DEPTH`].
    #[error("nesting deeper than {max} levels at byte {offset}")]
    TooDeep {
        /// Byte offset where the limit was exceeded.
        offset: usize,
        /// The limit that was exceeded.
        max: usize,
    },
}

/// Result alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse an ICU message template into its element tree.
///
/// The empty string parses to an empty tree.
pub fn parse(src: &str) -> Result<Vec<MessageElement>> {
    let mut parser = Parser { src, pos: 0 };
    parser.parse_message(0, false, false, None)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, want: char) -> bool {
        if self.peek() == Some(want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: char, expected: &'static str) -> Result<()> {
        if self.eat(want) {
            Ok(())
        } else {
            Err(self.err_here(expected))
        }
    }

    fn err_here(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::Unexpected {
                offset: self.pos,
                found,
                expected,
            },
            None => ParseError::UnexpectedEof {
                offset: self.pos,
                expected,
            },
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Argument names and type tokens: alphanumerics plus `_`.
    fn read_name(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.bump();
                out.push(c);
            } else {
                break;
            }
        }
        out
    }

    /// Select keys additionally allow `-`.
    fn read_select_key(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.bump();
                out.push(c);
            } else {
                break;
            }
        }
        out
    }

    /// Tag names: ASCII letter, then letters/digits/`-`/`_`.
    fn read_tag_name(&mut self) -> String {
        let mut out = String::new();
        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    self.bump();
                    out.push(c);
                } else {
                    break;
                }
            }
        }
        out
    }

    fn read_int(&mut self) -> Option<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        if text.is_empty() || text == "-" {
            self.pos = start;
            return None;
        }
        text.parse().ok()
    }

    /// Parse a message body.
    ///
    /// `stop_at_brace` makes an unconsumed `}` terminate the body (branch
    /// contents); `closing_tag` makes the matching `</name>` terminate it
    /// (tag contents, the close is consumed).
    fn parse_message(
        &mut self,
        depth: usize,
        in_plural: bool,
        stop_at_brace: bool,
        closing_tag: Option<&str>,
    ) -> Result<Vec<MessageElement>> {
        let mut out = Vec::new();
        loop {
            let text = self.parse_text(in_plural, stop_at_brace);
            if !text.is_empty() {
                out.push(MessageElement::Literal(text));
            }
            match self.peek() {
                None => {
                    if closing_tag.is_some() {
                        return Err(ParseError::UnexpectedEof {
                            offset: self.pos,
                            expected: "closing tag",
                        });
                    }
                    break;
                }
                Some('}') if stop_at_brace => break,
                Some('{') => out.push(self.parse_argument(depth, in_plural)?),
                Some('#') if in_plural => {
                    self.bump();
                    out.push(MessageElement::Pound);
                }
                Some('<') if self.peek2() == Some('/') => {
                    let close_off = self.pos;
                    self.bump();
                    self.bump();
                    let found = self.read_tag_name();
                    self.skip_ws();
                    self.expect('>', "'>'")?;
                    match closing_tag {
                        Some(open) if open == found => break,
                        Some(open) => {
                            return Err(ParseError::MismatchedTag {
                                offset: close_off,
                                found,
                                expected: open.to_string(),
                            });
                        }
                        None => {
                            return Err(ParseError::UnmatchedClosingTag {
                                offset: close_off,
                                found,
                            });
                        }
                    }
                }
                Some('<') => out.push(self.parse_tag(depth, in_plural)?),
                // parse_text stops only at the characters handled above;
                // anything else is consumed as literal text.
                Some(other) => {
                    self.bump();
                    out.push(MessageElement::Literal(other.to_string()));
                }
            }
        }
        Ok(out)
    }

    /// Consume a run of literal text, resolving apostrophe quoting.
    fn parse_text(&mut self, in_plural: bool, stop_at_brace: bool) -> String {
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else { break };
            match c {
                '{' => break,
                '}' if stop_at_brace => break,
                '#' if in_plural => break,
                '<' => match self.peek2() {
                    Some(next) if next.is_ascii_alphabetic() || next == '/' => break,
                    _ => {
                        self.bump();
                        out.push('<');
                    }
                },
                '\'' => {
                    self.bump();
                    match self.peek() {
                        // '' is a literal apostrophe
                        Some('\'') => {
                            self.bump();
                            out.push('\'');
                        }
                        // quote a run containing syntax characters
                        Some('{' | '}' | '#' | '<') => loop {
                            match self.bump() {
                                // unterminated quote: rest is literal
                                None => break,
                                Some('\'') => {
                                    if self.peek() == Some('\'') {
                                        self.bump();
                                        out.push('\'');
                                    } else {
                                        break;
                                    }
                                }
                                Some(quoted) => out.push(quoted),
                            }
                        },
                        // lone apostrophe before plain text is literal
                        _ => out.push('\''),
                    }
                }
                _ => {
                    self.bump();
                    out.push(c);
                }
            }
        }
        out
    }

    fn parse_argument(&mut self, depth: usize, in_plural: bool) -> Result<MessageElement> {
        self.bump(); // '{'
        self.skip_ws();
        let name = self.read_name();
        if name.is_empty() {
            return Err(self.err_here("argument name"));
        }
        self.skip_ws();
        if self.eat('}') {
            return Ok(MessageElement::Argument { name });
        }
        self.expect(',', "',' or '}'")?;
        self.skip_ws();
        let type_off = self.pos;
        let arg_type = self.read_name();
        self.skip_ws();
        match arg_type.as_str() {
            "number" | "date" | "time" => {
                let style = if self.eat(',') {
                    self.skip_ws();
                    let raw = self.read_style()?;
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                } else {
                    None
                };
                self.expect('}', "'}'")?;
                Ok(match arg_type.as_str() {
                    "number" => MessageElement::Number { name, style },
                    "date" => MessageElement::Date { name, style },
                    _ => MessageElement::Time { name, style },
                })
            }
            "plural" | "selectordinal" | "select" => {
                // The comma between the type keyword and the branches.
                self.expect(',', "','")?;
                self.skip_ws();
                match arg_type.as_str() {
                    "plural" => self.parse_plural(name, PluralArgKind::Cardinal, depth),
                    "selectordinal" => self.parse_plural(name, PluralArgKind::Ordinal, depth),
                    _ => self.parse_select(name, depth, in_plural),
                }
            }
            "" => Err(self.err_here("argument type")),
            _ => Err(ParseError::UnknownArgType {
                offset: type_off,
                found: arg_type,
            }),
        }
    }

    /// Style token of a number/date/time argument: everything up to the
    /// closing `}` (not consumed). Styles never contain braces.
    fn read_style(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.err_here("'}'")),
                Some('}') => return Ok(out),
                Some('{') => return Err(self.err_here("'}'")),
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn parse_plural(
        &mut self,
        name: String,
        kind: PluralArgKind,
        depth: usize,
    ) -> Result<MessageElement> {
        let mut offset = 0i64;
        if self.src[self.pos..].starts_with("offset:") {
            self.pos += "offset:".len();
            self.skip_ws();
            let off_pos = self.pos;
            offset = self.read_int().ok_or(ParseError::BadOffset { offset: off_pos })?;
            self.skip_ws();
        }
        let mut branches: Vec<PluralBranch> = Vec::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                break;
            }
            let selector = if self.eat('=') {
                match self.read_int() {
                    Some(n) => PluralSelector::Exact(n),
                    None => return Err(self.err_here("number after '='")),
                }
            } else {
                let keyword = self.read_name();
                if keyword.is_empty() {
                    return Err(self.err_here("plural selector"));
                }
                PluralSelector::Keyword(keyword)
            };
            if branches.iter().any(|b| b.selector == selector) {
                let key = match &selector {
                    PluralSelector::Exact(n) => format!("={n}"),
                    PluralSelector::Keyword(k) => k.clone(),
                };
                return Err(ParseError::DuplicateBranch { name, key });
            }
            self.skip_ws();
            let brace_off = self.pos;
            self.expect('{', "'{'")?;
            if depth + 1 > MAX_NESTING_DEPTH {
                return Err(ParseError::TooDeep {
                    offset: brace_off,
                    max: MAX_NESTING_DEPTH,
                });
            }
            let message = self.parse_message(depth + 1, true, true, None)?;
            self.expect('}', "'}'")?;
            branches.push(PluralBranch { selector, message });
        }
        let has_other = branches
            .iter()
            .any(|b| b.selector == PluralSelector::Keyword("other".into()));
        if !has_other {
            return Err(ParseError::MissingOther { name });
        }
        Ok(MessageElement::Plural {
            name,
            kind,
            offset,
            branches,
        })
    }

    fn parse_select(
        &mut self,
        name: String,
        depth: usize,
        in_plural: bool,
    ) -> Result<MessageElement> {
        let mut branches: Vec<SelectBranch> = Vec::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                break;
            }
            let key = self.read_select_key();
            if key.is_empty() {
                return Err(self.err_here("select key"));
            }
            if branches.iter().any(|b| b.key == key) {
                return Err(ParseError::DuplicateBranch { name, key });
            }
            self.skip_ws();
            let brace_off = self.pos;
            self.expect('{', "'{'")?;
            if depth + 1 > MAX_NESTING_DEPTH {
                return Err(ParseError::TooDeep {
                    offset: brace_off,
                    max: MAX_NESTING_DEPTH,
                });
            }
            // '#' keeps referring to the nearest enclosing plural.
            let message = self.parse_message(depth + 1, in_plural, true, None)?;
            self.expect('}', "'}'")?;
            branches.push(SelectBranch { key, message });
        }
        if !branches.iter().any(|b| b.key == "other") {
            return Err(ParseError::MissingOther { name });
        }
        Ok(MessageElement::Select { name, branches })
    }

    fn parse_tag(&mut self, depth: usize, in_plural: bool) -> Result<MessageElement> {
        let open_off = self.pos;
        self.bump(); // '<'
        let name = self.read_tag_name();
        self.skip_ws();
        if self.eat('/') {
            self.expect('>', "'>'")?;
            return Ok(MessageElement::Tag {
                name,
                children: Vec::new(),
            });
        }
        self.expect('>', "'>' or '/>'")?;
        if depth + 1 > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                offset: open_off,
                max: MAX_NESTING_DEPTH,
            });
        }
        let children = self.parse_message(depth + 1, in_plural, false, Some(&name))?;
        Ok(MessageElement::Tag { name, children })
    }
}
