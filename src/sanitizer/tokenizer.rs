//! Lexes input with `lol_html` and records what it reports, in order.
//!
//! Only the recorded tokens are used. The rewriter's own output is thrown
//! away, so anything it would pass through untouched (an end tag with no
//! open element, for one) never reaches the sanitized result.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::html_content::{Attribute as SourceAttribute, EndTag};
use lol_html::{
    HandlerResult, RewriteStrSettings, doc_comments, doc_text, doctype, element, rewrite_str,
};

use super::entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Decoded value; empty for a bare attribute like `<input disabled>`.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lowercased tag name, read up to whitespace, `/` or `>`.
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// The tag written back out as source, for when it is shown as text.
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Source text, character references still encoded.
    Text(String),
    StartTag(StartTag),
    /// Lowercased name of an end tag that closed an open element.
    EndTag(String),
}

type Recorder = Rc<RefCell<Vec<Token>>>;

/// Tokenizes `input` as an HTML fragment. Comments and doctypes come back as
/// text. Input the lexer gives up on comes back as one text token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens = Recorder::default();
    let (on_element, on_text, on_comment, on_doctype) = (
        Rc::clone(&tokens),
        Rc::clone(&tokens),
        Rc::clone(&tokens),
        Rc::clone(&tokens),
    );

    let settings = RewriteStrSettings {
        element_content_handlers: vec![element!("*", move |el| {
            let tag = start_tag(el.tag_name(), el.attributes(), el.is_self_closing());
            on_element.borrow_mut().push(Token::StartTag(tag));

            if let Some(handlers) = el.end_tag_handlers() {
                let on_end = Rc::clone(&on_element);
                let on_end_tag: lol_html::EndTagHandler<'static> =
                    Box::new(move |end: &mut EndTag<'_>| -> HandlerResult {
                        on_end.borrow_mut().push(Token::EndTag(end.name()));
                        Ok(())
                    });
                handlers.push(on_end_tag);
            }
            Ok(())
        })],
        document_content_handlers: vec![
            doc_text!(move |chunk| {
                push_text(&on_text, chunk.as_str());
                Ok(())
            }),
            doc_comments!(move |comment| {
                push_text(&on_comment, &format!("<!--{}-->", comment.text()));
                Ok(())
            }),
            doctype!(move |decl| {
                let name = decl.name().unwrap_or_default();
                push_text(&on_doctype, &format!("<!DOCTYPE {name}>"));
                Ok(())
            }),
        ],
        ..RewriteStrSettings::new()
    };

    match rewrite_str(input, settings) {
        Ok(_) => tokens.take(),
        Err(err) => {
            tracing::debug!("Treating unparseable markup as text: {}", err);
            vec![Token::Text(input.to_string())]
        }
    }
}

/// Appends to the previous text token when there is one, so a character
/// reference split across chunks stays whole.
fn push_text(tokens: &Recorder, text: &str) {
    if text.is_empty() {
        return;
    }
    let mut tokens = tokens.borrow_mut();
    match tokens.last_mut() {
        Some(Token::Text(last)) => last.push_str(text),
        _ => tokens.push(Token::Text(text.to_string())),
    }
}

fn start_tag(name: String, source: &[SourceAttribute], self_closing: bool) -> StartTag {
    let mut literal = format!("<{name}");
    let mut attributes = Vec::with_capacity(source.len());

    for attribute in source {
        let (attr_name, raw) = (attribute.name(), attribute.value());
        literal.push(' ');
        literal.push_str(&attr_name);
        if !raw.is_empty() {
            literal.push_str(&format!("=\"{raw}\""));
        }
        attributes.push(Attribute {
            name: attr_name,
            value: entities::decode(&raw).into_owned(),
        });
    }

    literal.push_str(if self_closing { " />" } else { ">" });
    StartTag {
        name,
        attributes,
        literal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn first_start_tag(input: &str) -> StartTag {
        match tokenize(input).into_iter().next() {
            Some(Token::StartTag(tag)) => tag,
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn splits_text_and_tags() {
        let toks = tokenize("hi <B>there</b >!");
        assert_eq!(toks.len(), 5);
        assert_eq!(toks[0], text("hi "));
        match &toks[1] {
            Token::StartTag(tag) => {
                assert_eq!(tag.name, "b");
                assert_eq!(tag.literal, "<b>");
            }
            other => panic!("expected start tag, got {other:?}"),
        }
        assert_eq!(toks[2], text("there"));
        assert_eq!(toks[3], Token::EndTag("b".to_string()));
        assert_eq!(toks[4], text("!"));
    }

    #[test]
    fn reads_every_attribute_style() {
        let tag = first_start_tag(r#"<a HREF="/x" title='it' target=_blank download>"#);
        assert_eq!(
            tag.attributes,
            vec![
                attr("href", "/x"),
                attr("title", "it"),
                attr("target", "_blank"),
                attr("download", ""),
            ]
        );
    }

    #[test]
    fn decodes_attribute_values() {
        let tag = first_start_tag(r#"<a href="&#106;avascript&colon;x">"#);
        assert_eq!(tag.attributes[0].value, "javascript:x");
    }

    #[test]
    fn tag_names_run_to_whitespace_slash_or_bracket() {
        assert_eq!(first_start_tag("<b.x>y</b.x>").name, "b.x");
        assert_eq!(first_start_tag("<p:evil>z").name, "p:evil");
        assert_eq!(first_start_tag("<bé>").name, "bé");
        assert_eq!(
            tokenize("<b.x>y</b.x>").last(),
            Some(&Token::EndTag("b.x".to_string()))
        );
    }

    #[test]
    fn literal_rebuilds_the_tag() {
        assert_eq!(
            first_start_tag("<IMG src=x onerror=alert(1)>").literal,
            r#"<img src="x" onerror="alert(1)">"#
        );
        assert_eq!(first_start_tag("<br/>").literal, "<br />");
    }

    #[test]
    fn end_tags_without_an_open_element_are_not_reported() {
        assert_eq!(tokenize("a</b>c"), vec![text("ac")]);
    }

    #[test]
    fn comments_and_stray_brackets_are_text() {
        assert_eq!(tokenize("<!-- c -->"), vec![text("<!-- c -->")]);
        assert_eq!(tokenize("1 < 2 > 0"), vec![text("1 < 2 > 0")]);
    }
}
