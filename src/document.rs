//! Read-only view over parsed markup.
//!
//! The normalizer and extractor walk the tree only through [DocumentNode]; the
//! scraper-backed implementation is [scraper::ElementRef]. Nothing here mutates the tree.

use scraper::{ElementRef, Node};
use std::ops::Deref;

/// One child of an element, in document order. Comments, doctypes and
/// processing instructions are not exposed.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a, N> {
    Text(&'a str),
    Element(N),
}

/// Capability interface over an element of a parsed document.
pub trait DocumentNode<'a>: Copy {
    /// Lower-case element name (e.g. `span`, `h3`).
    fn tag_name(&self) -> &'a str;

    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// Parent element, or None at the root.
    fn parent_element(&self) -> Option<Self>;

    /// Text runs and child elements in document order.
    fn child_nodes(&self) -> Vec<Child<'a, Self>>;

    /// True if the whitespace-separated `class` attribute contains `class`.
    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|value| value.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// All descendant text concatenated, depth-first.
    fn plain_text(&self) -> String {
        let mut out = String::new();
        push_text(*self, &mut out);
        out
    }

    /// Each descendant text run trimmed, empty runs dropped, then concatenated.
    fn stripped_text(&self) -> String {
        let mut out = String::new();
        push_stripped_text(*self, &mut out);
        out
    }

    /// Descendant elements in document order, excluding `self`.
    fn descendant_elements(&self) -> Vec<Self> {
        let mut out = Vec::new();
        push_descendants(*self, &mut out);
        out
    }

    /// First descendant element (document order) matching `pred`.
    fn find_descendant<P>(&self, pred: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.descendant_elements().into_iter().find(|n| pred(n))
    }

    /// True if any strict ancestor matches `pred`.
    fn has_ancestor<P>(&self, pred: P) -> bool
    where
        P: Fn(&Self) -> bool,
    {
        let mut current = self.parent_element();
        while let Some(node) = current {
            if pred(&node) {
                return true;
            }
            current = node.parent_element();
        }
        false
    }
}

fn push_text<'a, N: DocumentNode<'a>>(node: N, out: &mut String) {
    for child in node.child_nodes() {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(el) => push_text(el, out),
        }
    }
}

fn push_stripped_text<'a, N: DocumentNode<'a>>(node: N, out: &mut String) {
    for child in node.child_nodes() {
        match child {
            Child::Text(text) => out.push_str(text.trim()),
            Child::Element(el) => push_stripped_text(el, out),
        }
    }
}

fn push_descendants<'a, N: DocumentNode<'a>>(node: N, out: &mut Vec<N>) {
    for child in node.child_nodes() {
        if let Child::Element(el) = child {
            out.push(el);
            push_descendants(el, out);
        }
    }
}

impl<'a> DocumentNode<'a> for ElementRef<'a> {
    fn tag_name(&self) -> &'a str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        Deref::deref(self).parent().and_then(ElementRef::wrap)
    }

    fn child_nodes(&self) -> Vec<Child<'a, Self>> {
        Deref::deref(self)
            .children()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(Child::Text(text.deref())),
                Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
                _ => None,
            })
            .collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }
}
