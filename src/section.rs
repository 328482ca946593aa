use serde::{Deserialize, Serialize};

use crate::scan::heading_matches;

/// Distinguishes sections born from `== ... ==` markup from sections
/// synthesized out of loose text between or before headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Heading,
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub kind: SectionKind,
    pub content: String,
    pub subsections: Vec<Section>,
}

impl Section {
    /// Heading-born section. Content is assigned when the section closes.
    fn heading(title: String) -> Self {
        Section {
            title,
            kind: SectionKind::Heading,
            content: String::new(),
            subsections: Vec::new(),
        }
    }

    /// Loose text nested under an open section. Untitled.
    fn fragment(text: &str) -> Self {
        Section {
            title: String::new(),
            kind: SectionKind::Fragment,
            content: text.trim().to_string(),
            subsections: Vec::new(),
        }
    }

    /// Loose text at the top level of the document.
    fn introduction(text: &str) -> Self {
        Section {
            title: "Introduction".to_string(),
            kind: SectionKind::Fragment,
            content: text.trim().to_string(),
            subsections: Vec::new(),
        }
    }
}

/// A section whose closing boundary has not been seen yet. `content_start`
/// is the byte offset where its body begins.
struct OpenSection {
    level: u8,
    section: Section,
    content_start: usize,
}

/// Builds the nested section forest for a wikitext document.
///
/// A document without headings becomes a single `Introduction` section
/// holding the trimmed text. Otherwise each heading opens a section; a
/// heading at an equal or shallower level closes every deeper open section,
/// assigning it the trimmed text between its heading and the closing one
/// (nested markup included). Text before or between headings turns into
/// fragment subsections. Trailing text after the last heading is appended
/// to the innermost open section as `"\n" + trimmed text`; sections still
/// open at the end of the document otherwise keep empty content.
pub fn parse_sections(wikitext: &str) -> Vec<Section> {
    let matches = heading_matches(wikitext);
    if matches.is_empty() {
        return vec![Section::introduction(wikitext)];
    }

    let mut roots: Vec<Section> = Vec::new();
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut cursor = 0;

    for m in matches {
        // Loose text since the last consumed offset. Raw-offset test, so a
        // whitespace-only gap still yields an empty fragment.
        if cursor < m.start {
            let gap = &wikitext[cursor..m.start];
            match stack.last_mut() {
                Some(open) => open.section.subsections.push(Section::fragment(gap)),
                None => roots.push(Section::introduction(gap)),
            }
        }

        while stack.last().is_some_and(|open| open.level >= m.level) {
            if let Some(open) = stack.pop() {
                let closed = close_section(open, wikitext, m.start);
                attach(closed, &mut stack, &mut roots);
            }
        }

        stack.push(OpenSection {
            level: m.level,
            section: Section::heading(m.title),
            content_start: m.end,
        });
        cursor = m.end;
    }

    if cursor < wikitext.len() {
        let trailing = wikitext[cursor..].trim();
        match stack.last_mut() {
            Some(open) => {
                open.section.content.push('\n');
                open.section.content.push_str(trailing);
            }
            None => roots.push(Section::introduction(trailing)),
        }
    }

    while let Some(open) = stack.pop() {
        attach(open.section, &mut stack, &mut roots);
    }

    roots
}

fn close_section(mut open: OpenSection, wikitext: &str, until: usize) -> Section {
    open.section.content = wikitext[open.content_start..until].trim().to_string();
    open.section
}

fn attach(section: Section, stack: &mut Vec<OpenSection>, roots: &mut Vec<Section>) {
    match stack.last_mut() {
        Some(parent) => parent.section.subsections.push(section),
        None => roots.push(section),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headings_single_introduction() {
        let sections = parse_sections("Just a plain paragraph.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Introduction");
        assert_eq!(sections[0].kind, SectionKind::Fragment);
        assert_eq!(sections[0].content, "Just a plain paragraph.");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn no_headings_input_is_trimmed() {
        let sections = parse_sections("  padded text \n");
        assert_eq!(sections[0].content, "padded text");
    }

    #[test]
    fn empty_input_single_empty_introduction() {
        let sections = parse_sections("");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Introduction");
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn whitespace_only_input() {
        let sections = parse_sections("  \n\t ");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn intro_then_nested_tree() {
        let text = "intro\n== A ==\ntextA\n=== B ===\ntextB\n== C ==\ntextC";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 3);

        let intro = &sections[0];
        assert_eq!(intro.title, "Introduction");
        assert_eq!(intro.kind, SectionKind::Fragment);
        assert_eq!(intro.content, "intro");

        let a = &sections[1];
        assert_eq!(a.title, "A");
        assert_eq!(a.kind, SectionKind::Heading);
        assert_eq!(a.content, "textA\n=== B ===\ntextB");
        assert_eq!(a.subsections.len(), 2);

        let frag = &a.subsections[0];
        assert_eq!(frag.title, "");
        assert_eq!(frag.kind, SectionKind::Fragment);
        assert_eq!(frag.content, "textA");

        let b = &a.subsections[1];
        assert_eq!(b.title, "B");
        assert_eq!(b.content, "textB");
        assert_eq!(b.subsections.len(), 1);
        assert_eq!(b.subsections[0].content, "textB");

        let c = &sections[2];
        assert_eq!(c.title, "C");
        assert_eq!(c.content, "\ntextC");
        assert!(c.subsections.is_empty());
    }

    #[test]
    fn sibling_headings() {
        let sections = parse_sections("== A ==\nx\n== B ==\ny");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[0].content, "x");
        assert_eq!(sections[0].subsections.len(), 1);
        assert_eq!(sections[0].subsections[0].content, "x");
        assert_eq!(sections[1].title, "B");
        assert_eq!(sections[1].content, "\ny");
    }

    #[test]
    fn adjacent_headings_empty_fragment() {
        let sections = parse_sections("== A ==\n== B ==\nz");
        let a = &sections[0];
        assert_eq!(a.content, "");
        assert_eq!(a.subsections.len(), 1);
        assert_eq!(a.subsections[0].kind, SectionKind::Fragment);
        assert_eq!(a.subsections[0].content, "");
    }

    #[test]
    fn first_heading_at_offset_zero() {
        let sections = parse_sections("== A ==\nx");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[0].content, "\nx");
    }

    #[test]
    fn level_up_down_up() {
        let text =
            "== A ==\n=== B ===\nb\n==== C ====\nc\n=== D ===\nd\n== E ==\nend";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 2);

        let a = &sections[0];
        assert_eq!(a.title, "A");
        assert_eq!(a.subsections.len(), 3);
        assert_eq!(a.subsections[0].content, "");
        assert_eq!(a.subsections[1].title, "B");
        assert_eq!(a.subsections[2].title, "D");

        let b = &a.subsections[1];
        assert_eq!(b.content, "b\n==== C ====\nc");
        assert_eq!(b.subsections.len(), 2);
        assert_eq!(b.subsections[0].content, "b");
        assert_eq!(b.subsections[1].title, "C");
        assert_eq!(b.subsections[1].content, "c");

        let d = &a.subsections[2];
        assert_eq!(d.content, "d");
        assert_eq!(d.subsections.len(), 1);

        let e = &sections[1];
        assert_eq!(e.title, "E");
        assert_eq!(e.content, "\nend");
    }

    #[test]
    fn mismatched_marker_stays_in_content() {
        let sections = parse_sections("== A ==\nx\n=== B ==\ny");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].content.contains("=== B =="));
    }

    #[test]
    fn whitespace_tail_is_absorbed_by_last_heading() {
        let sections = parse_sections("== A ==\n\n  \n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn duplicate_titles_kept_in_order() {
        let sections = parse_sections("== A ==\nfirst\n== A ==\nsecond");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[1].title, "A");
        assert_eq!(sections[0].content, "first");
        assert_eq!(sections[1].content, "\nsecond");
    }

    #[test]
    fn section_serialization_roundtrip() {
        let sections = parse_sections("intro\n== A ==\ntextA\n=== B ===\ntextB");
        let json = serde_json::to_string(&sections).unwrap();
        let deserialized: Vec<Section> = serde_json::from_str(&json).unwrap();
        assert_eq!(sections, deserialized);
    }
}
