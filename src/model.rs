//! Output data model: a chapter is an ordered sequence of subtitles and verses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified unit of a chapter, in reading order.
///
/// Serializes as `{"type":"subtitle","text":...}` or
/// `{"type":"verse","verse_number":...,"text":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Subtitle {
        text: String,
    },
    Verse {
        verse_number: String,
        text: String,
    },
}

impl Element {
    pub fn subtitle(text: impl Into<String>) -> Self {
        Element::Subtitle { text: text.into() }
    }

    pub fn verse(verse_number: impl Into<String>, text: impl Into<String>) -> Self {
        Element::Verse {
            verse_number: verse_number.into(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Element::Subtitle { text } | Element::Verse { text, .. } => text,
        }
    }

    /// Short label used in verbose summaries: `Subtitle` or `Verse <n>`.
    pub fn label(&self) -> String {
        match self {
            Element::Subtitle { .. } => "Subtitle".to_string(),
            Element::Verse { verse_number, .. } => format!("Verse {}", verse_number),
        }
    }
}

/// Display line: `SUBTITLE: <text>` or `VERSE <n>: <text>`.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Subtitle { text } => write!(f, "SUBTITLE: {}", text),
            Element::Verse { verse_number, text } => write!(f, "VERSE {}: {}", verse_number, text),
        }
    }
}

/// Full ordered output for one requested passage. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chapter {
    elements: Vec<Element>,
}

impl Chapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append `" " + continuation` to the last element's text if it is a verse.
    /// Returns false (and changes nothing) when the chapter is empty or ends in a subtitle.
    pub fn append_to_last_verse(&mut self, continuation: &str) -> bool {
        let Some(last) = self.elements.len().checked_sub(1) else {
            return false;
        };
        match &mut self.elements[last] {
            Element::Verse { text, .. } => {
                text.push(' ');
                text.push_str(continuation);
                true
            }
            Element::Subtitle { .. } => false,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn verse_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Verse { .. }))
            .count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

impl From<Vec<Element>> for Chapter {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl<'c> IntoIterator for &'c Chapter {
    type Item = &'c Element;
    type IntoIter = std::slice::Iter<'c, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn chapter_serializes_to_tagged_array() -> Result<(), Box<dyn Error>> {
        let chapter = Chapter::from(vec![
            Element::subtitle("Heading"),
            Element::verse("1", "In the beginning..."),
        ]);
        let value = serde_json::to_value(&chapter)?;
        assert_eq!(
            value,
            serde_json::json!([
                {"type": "subtitle", "text": "Heading"},
                {"type": "verse", "verse_number": "1", "text": "In the beginning..."}
            ])
        );
        Ok(())
    }

    #[test]
    fn display_lines() {
        assert_eq!(Element::subtitle("The Creation").to_string(), "SUBTITLE: The Creation");
        assert_eq!(
            Element::verse("3", "Then God said").to_string(),
            "VERSE 3: Then God said"
        );
    }

    #[test]
    fn append_to_last_verse_extends_in_place() {
        let mut chapter = Chapter::from(vec![Element::verse("3", "Then")]);
        assert!(chapter.append_to_last_verse("and God said"));
        assert_eq!(chapter.len(), 1);
        assert_eq!(chapter.elements()[0].text(), "Then and God said");
    }

    #[test]
    fn append_after_subtitle_or_empty_is_refused() {
        let mut empty = Chapter::new();
        assert!(!empty.append_to_last_verse("x"));
        assert!(empty.is_empty());

        let mut chapter = Chapter::from(vec![Element::verse("1", "a"), Element::subtitle("b")]);
        assert!(!chapter.append_to_last_verse("c"));
        assert_eq!(chapter.elements()[0].text(), "a");
        assert_eq!(chapter.elements()[1].text(), "b");
    }

    #[test]
    fn labels_and_counts() {
        let chapter = Chapter::from(vec![Element::subtitle("s"), Element::verse("12", "v")]);
        let labels: Vec<String> = chapter.iter().map(Element::label).collect();
        assert_eq!(labels, vec!["Subtitle", "Verse 12"]);
        assert_eq!(chapter.verse_count(), 1);
    }
}
