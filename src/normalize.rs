//! Markup normalizer: turns a passage fragment into clean plain text.
//!
//! Footnote markers (`sup`) and inline chapter numbers (`span.chapternum`) are
//! dropped with their whole subtree, `i`/`em` become `*text*`, and whitespace
//! runs collapse to one space. The walk only reads the tree.

use crate::document::{Child, DocumentNode};
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Marker placed on each side of emphasized text.
pub const EMPHASIS_MARKER: char = '*';

const CHAPTER_NUMBER_CLASS: &str = "chapternum";

/// Runs of two or more whitespace characters (compiled once).
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s{2,}").expect("WHITESPACE_RUN: hardcoded regex is valid")
});

/// Normalize an element and its subtree to plain text.
pub fn normalize_node<'a, N: DocumentNode<'a>>(node: N) -> String {
    let mut raw = String::new();
    render(node, &mut raw);
    collapse_whitespace(&raw)
}

/// Parse `html` as a fragment and normalize it. Empty or malformed input yields "".
pub fn normalize_fragment(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    normalize_node(fragment.root_element())
}

/// Replace each run of 2+ whitespace characters with a single space, then trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

fn is_decorative<'a, N: DocumentNode<'a>>(node: &N) -> bool {
    match node.tag_name() {
        "sup" => true,
        "span" => node.has_class(CHAPTER_NUMBER_CLASS),
        _ => false,
    }
}

fn is_emphasis<'a, N: DocumentNode<'a>>(node: &N) -> bool {
    matches!(node.tag_name(), "i" | "em")
}

fn render<'a, N: DocumentNode<'a>>(node: N, out: &mut String) {
    if is_decorative(&node) {
        return;
    }
    if is_emphasis(&node) {
        out.push(EMPHASIS_MARKER);
        push_undecorated_text(node, out);
        out.push(EMPHASIS_MARKER);
        return;
    }
    for child in node.child_nodes() {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(el) => render(el, out),
        }
    }
}

/// Text of the subtree with decorative nodes skipped; nested emphasis is not re-marked.
fn push_undecorated_text<'a, N: DocumentNode<'a>>(node: N, out: &mut String) {
    for child in node.child_nodes() {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(el) if !is_decorative(&el) => push_undecorated_text(el, out),
            Child::Element(_) => {}
        }
    }
}
