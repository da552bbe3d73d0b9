//! Allow-list HTML sanitizer for user-authored rich text.
//!
//! Input is tokenized into text runs and tags, every token is checked against
//! a [`SanitizationPolicy`] and the survivors are serialized again:
//!
//! * tags outside the allow-list are escaped, so they show up as literal text
//!   and their content is kept;
//! * kept tags lose every attribute the policy does not name, `on*` handlers
//!   included, and link attributes lose values with a foreign scheme;
//! * the output is balanced: end tags that close nothing are escaped or
//!   dropped, and anything left open is closed at the end.
//!
//! Sanitizing the output again returns it unchanged.

mod entities;
mod policy;
mod scheme;
mod tokenizer;

use std::fmt;

use serde::Serialize;

pub use policy::{PolicyKind, SanitizationPolicy};
use tokenizer::{StartTag, Token};

use crate::utils::html;

/// Elements that never take an end tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "wbr"];

/// Start tags nested deeper than this are escaped as text.
const MAX_DEPTH: usize = 64;

/// Markup that came out of [`sanitize`] and can be embedded as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The text a reader sees: tags left out, character references decoded.
    pub fn text_content(&self) -> String {
        tokenizer::tokenize(&self.0)
            .into_iter()
            .filter_map(|token| match token {
                Token::Text(text) => Some(entities::decode(&text).into_owned()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cleans `input` against `policy`. Never fails: whatever cannot be read as
/// an allowed tag ends up as escaped text.
pub fn sanitize(input: &str, policy: &SanitizationPolicy) -> SafeHtml {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    let mut open: Vec<String> = Vec::new();

    for token in tokenizer::tokenize(input) {
        match token {
            Token::Text(text) => entities::escape_text_into(&mut out, &text),
            Token::StartTag(tag) => {
                let void = VOID_ELEMENTS.contains(&tag.name.as_str());
                if !policy.allows_tag(&tag.name) || (!void && open.len() >= MAX_DEPTH) {
                    entities::escape_text_into(&mut out, &tag.literal);
                    continue;
                }
                write_start_tag(&mut out, &tag, policy);
                if !void {
                    open.push(tag.name);
                }
            }
            Token::EndTag(name) => match open.iter().rposition(|open_name| *open_name == name) {
                Some(idx) => {
                    for name in open.drain(idx..).rev() {
                        write_end_tag(&mut out, &name);
                    }
                }
                None => entities::escape_text_into(&mut out, &format!("</{name}>")),
            },
        }
    }

    for name in open.iter().rev() {
        write_end_tag(&mut out, name);
    }

    SafeHtml(out)
}

fn write_start_tag(out: &mut String, tag: &StartTag, policy: &SanitizationPolicy) {
    out.push('<');
    out.push_str(&tag.name);

    // Browsers honour the first occurrence of a repeated attribute.
    let mut seen: Vec<&str> = Vec::with_capacity(tag.attributes.len());
    for attribute in &tag.attributes {
        let name = attribute.name.as_str();
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);

        if !policy.allows_attribute(&tag.name, name) {
            continue;
        }
        if !policy.allows_value(name, &attribute.value) {
            continue;
        }

        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html::escape(&attribute.value));
        out.push('"');
    }

    out.push('>');
}

fn write_end_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
