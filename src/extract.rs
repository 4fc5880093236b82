//! Chapter extractor. Walks the passage's `.text` nodes in document order and
//! classifies each as a subtitle, a new verse, or continuation of the last verse.

use crate::document::DocumentNode;
use crate::model::{Chapter, Element};
use crate::normalize::normalize_node;
use scraper::Html;

const TEXT_CLASS: &str = "text";
const PASSAGE_CONTENT_CLASS: &str = "passage-content";
const HEADING_TAG: &str = "h3";
const VERSE_NUMBER_CLASS: &str = "versenum";

/// Number given to a first verse that carries no marker of its own.
pub const IMPLICIT_FIRST_VERSE: &str = "1";

/// Parse a full HTML document and extract its chapter. Never fails; unexpected markup yields fewer elements.
pub fn parse_chapter(html: &str) -> Chapter {
    let document = Html::parse_document(html);
    extract_chapter(document.root_element())
}

/// Extract the chapter below `root`.
pub fn extract_chapter<'a, N: DocumentNode<'a>>(root: N) -> Chapter {
    let mut chapter = Chapter::new();
    let mut first_verse_found = false;

    for node in select_content_nodes(root) {
        if is_heading_text(&node) {
            chapter.push(Element::subtitle(normalize_node(node)));
            continue;
        }

        let cleaned = normalize_node(node);
        match node.find_descendant(|n| n.has_class(VERSE_NUMBER_CLASS)) {
            Some(marker) => {
                let verse_number = marker.stripped_text();
                let text = cleaned
                    .strip_prefix(verse_number.as_str())
                    .unwrap_or(&cleaned)
                    .trim()
                    .to_string();
                chapter.push(Element::verse(verse_number, text));
                first_verse_found = true;
            }
            None if !first_verse_found => {
                chapter.push(Element::verse(IMPLICIT_FIRST_VERSE, cleaned));
                first_verse_found = true;
            }
            None => {
                // Continuation that directly follows a subtitle has no verse to join; it is dropped.
                if !chapter.append_to_last_verse(&cleaned) {
                    tracing::debug!(text = %cleaned, "Dropped continuation text with no preceding verse");
                }
            }
        }
    }

    chapter
}

/// `.passage-content .text, h3 .text` in document order, each node once.
fn select_content_nodes<'a, N: DocumentNode<'a>>(root: N) -> Vec<N> {
    root.descendant_elements()
        .into_iter()
        .filter(|node| {
            node.has_class(TEXT_CLASS)
                && (node.has_ancestor(|a| a.has_class(PASSAGE_CONTENT_CLASS))
                    || node.has_ancestor(|a| a.tag_name() == HEADING_TAG))
        })
        .collect()
}

/// A `span` directly inside a section heading.
fn is_heading_text<'a, N: DocumentNode<'a>>(node: &N) -> bool {
    node.tag_name() == "span"
        && node
            .parent_element()
            .map(|parent| parent.tag_name() == HEADING_TAG)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(body: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><body><div class="passage-text"><div class="passage-content">{}</div></div></body></html>"#,
            body
        )
    }

    #[test]
    fn heading_then_marked_verse() {
        let html = passage(
            r#"<h3><span class="text">Heading</span></h3><span class="text"><sup>a</sup><span class="versenum">1</span>In the beginning...</span>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(
            chapter.elements(),
            &[
                Element::subtitle("Heading"),
                Element::verse("1", "In the beginning..."),
            ]
        );
    }

    #[test]
    fn heading_outside_passage_content_is_still_selected() {
        let html = r#"<html><body><h3><span class="text">The Creation</span></h3>
<div class="passage-content"><p><span class="text"><span class="versenum">1 </span>In the beginning</span></p></div></body></html>"#;
        let chapter = parse_chapter(html);
        assert_eq!(chapter.len(), 2);
        assert_eq!(chapter.elements()[0], Element::subtitle("The Creation"));
    }

    #[test]
    fn unmarked_first_node_becomes_verse_one_once() {
        let html = passage(
            r#"<p><span class="text"><span class="chapternum">1 </span>In the beginning God created</span></p>
<p><span class="text"><span class="versenum">1</span>Again one</span></p>
<p><span class="text"><span class="versenum">2</span>The earth was</span></p>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(
            chapter.elements(),
            &[
                Element::verse("1", "In the beginning God created"),
                Element::verse("1", "Again one"),
                Element::verse("2", "The earth was"),
            ]
        );
        let implicit = chapter
            .iter()
            .filter(|e| e.text() == "In the beginning God created")
            .count();
        assert_eq!(implicit, 1);
    }

    #[test]
    fn explicit_marker_on_first_node_is_not_doubled() {
        let html = passage(r#"<span class="text"><span class="versenum">5</span>Five</span>"#);
        let chapter = parse_chapter(&html);
        assert_eq!(chapter.elements(), &[Element::verse("5", "Five")]);
    }

    #[test]
    fn continuation_appends_to_previous_verse() {
        let html = passage(
            r#"<p><span class="text"><span class="versenum">3</span>Then</span></p>
<p class="line"><span class="text">and God said</span></p>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(chapter.len(), 1);
        let text = chapter.elements()[0].text();
        assert!(text.ends_with(" and God said"), "{:?}", text);
        assert_eq!(text, "Then and God said");
    }

    #[test]
    fn continuation_after_subtitle_only_is_dropped() {
        let html = passage(
            r#"<span class="text"><span class="versenum">1</span>One</span>
<h3><span class="text">Poetry</span></h3>
<span class="text">lost line</span>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(
            chapter.elements(),
            &[Element::verse("1", "One"), Element::subtitle("Poetry")]
        );
    }

    #[test]
    fn emphasis_inside_verse_uses_asterisks() {
        let html = passage(
            r#"<span class="text"><span class="versenum">3</span>They sing. <em>Selah</em></span>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(chapter.elements(), &[Element::verse("3", "They sing. *Selah*")]);
    }

    #[test]
    fn marker_not_at_start_leaves_text_unchanged() {
        let html = passage(r#"<span class="text">Word <span class="versenum">7</span>rest</span>"#);
        let chapter = parse_chapter(&html);
        assert_eq!(chapter.elements(), &[Element::verse("7", "Word 7rest")]);
    }

    #[test]
    fn marker_with_nbsp_is_trimmed_and_stripped() {
        let html = passage("<span class=\"text\"><span class=\"versenum\">2&nbsp;</span>The earth</span>");
        let chapter = parse_chapter(&html);
        assert_eq!(chapter.elements(), &[Element::verse("2", "The earth")]);
    }

    #[test]
    fn empty_cleaned_text_still_produces_elements() {
        let html = passage(
            r#"<h3><span class="text"><sup>x</sup></span></h3><span class="text"><span class="versenum">4</span></span>"#,
        );
        let chapter = parse_chapter(&html);
        assert_eq!(
            chapter.elements(),
            &[Element::subtitle(""), Element::verse("4", "")]
        );
    }

    #[test]
    fn text_outside_regions_is_ignored() {
        let html = r#"<html><body><span class="text">footer</span><div class="passage-content"><span class="text"><span class="versenum">1</span>Inside</span></div></body></html>"#;
        let chapter = parse_chapter(html);
        assert_eq!(chapter.elements(), &[Element::verse("1", "Inside")]);
    }

    #[test]
    fn print_layout_psalm_with_poetry_lines() {
        let html = r##"<!DOCTYPE html><html><body>
<div class="passage-text"><div class="passage-content passage-class-0"><div class="version-NKJV result-text-style-normal text-html">
<h3><span id="en-NKJV-14343" class="text Ps-3-1">A Morning Prayer of Trust in God</span></h3>
<h4>A Psalm of David when he fled from Absalom his son.</h4>
<div class="poetry"><p class="line"><span id="en-NKJV-14344" class="text Ps-3-1"><span class="chapternum">3&nbsp;</span>Lord, how they have increased who trouble me!</span><br /><span class="text Ps-3-1">Many are they who rise up against me.</span></p>
<p class="line"><span id="en-NKJV-14345" class="text Ps-3-2"><sup class="versenum">2&nbsp;</sup>Many are they who say of me,</span><br /><span class="text Ps-3-2">“There is no help for him in God.”<sup data-fn="#fen-NKJV-14345a" class="footnote">[<a href="#fen-NKJV-14345a">a</a>]</sup> <i>Selah</i></span></p></div>
</div></div></div></body></html>"##;
        let chapter = parse_chapter(html);
        assert_eq!(
            chapter.elements(),
            &[
                Element::subtitle("A Morning Prayer of Trust in God"),
                Element::verse(
                    "1",
                    "Lord, how they have increased who trouble me! Many are they who rise up against me."
                ),
                Element::verse(
                    "2",
                    "Many are they who say of me, “There is no help for him in God.” *Selah*"
                ),
            ]
        );
    }

    #[test]
    fn empty_or_malformed_document_yields_empty_chapter() {
        assert!(parse_chapter("").is_empty());
        assert!(parse_chapter("<div class=\"passage-content\"><p>no text spans</p>").is_empty());
        assert!(parse_chapter("<<<>>> not html").is_empty());
    }
}
