//! Article body text extraction from rendered Wikipedia pages

use crate::error::{Error, ParseError, Result};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

/// Tags whose entire subtree is invisible and must not contribute words
const SKIP_TAGS: [&str; 3] = ["script", "style", "noscript"];

// The selector literal is valid; parsing it cannot fail.
#[allow(clippy::expect_used)]
fn content_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| {
        Selector::parse("div.mw-parser-output").expect("static selector is valid")
    })
}

/// Extract the visible body text of a rendered Wikipedia page
///
/// Locates the main content container (`div.mw-parser-output`), concatenates
/// the text of its subtree with `script`/`style`/`noscript` content stripped,
/// and collapses whitespace runs to single spaces. Pure and idempotent:
/// re-extracting the same markup yields identical text.
///
/// Fails with [`ParseError::ContentRootMissing`] when the document has no
/// content container.
pub fn article_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    let root = document
        .select(content_selector())
        .next()
        .ok_or(Error::Parse(ParseError::ContentRootMissing))?;

    let mut parts: Vec<&str> = Vec::new();
    collect_visible_text(root, &mut parts);

    Ok(collapse_whitespace(&parts.join(" ")))
}

/// Recursively collect text nodes, skipping invisible subtrees
fn collect_visible_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t);
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
