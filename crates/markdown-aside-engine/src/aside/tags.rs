//! `{aside}` / `{blurb, class: tip}` opening tags and their `{/...}` closers.

use super::{
    cursor::LineView,
    kind::{ConstructKind, StyleClass},
};
use crate::parsing::span::Span;

const CLASS_KEY: &str = "class:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    pub kind: ConstructKind,
    pub class: Option<StyleClass>,
    pub line: usize,
    pub span: Span,
    /// Nothing follows the tag on its line.
    pub alone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndTag {
    pub line: usize,
    pub span: Span,
    /// The tag is the whole content of its line.
    pub alone: bool,
}

/// Recognizes an opening tag at the start of the line's content.
///
/// Only `{blurb}` takes a `, class: NAME` clause. Anything that does not
/// parse as a complete tag is not a tag.
pub fn find_start_tag(view: &LineView<'_>) -> Option<StartTag> {
    let bytes = view.text.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }

    let name_len = bytes[1..]
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    let kind = ConstructKind::from_tag(&view.text[1..1 + name_len])?;

    let mut close = view.start + 1 + name_len;
    let mut class = None;

    if kind.accepts_class() {
        let pos = view.skip_spaces(close);
        if view.byte(pos) == Some(b',') {
            let pos = view.skip_spaces(pos + 1);
            if !view.rest(pos).starts_with(CLASS_KEY) {
                return None;
            }
            let value_start = view.skip_spaces(pos + CLASS_KEY.len());
            let value = view.rest(value_start);
            let value_len = value.find('}').unwrap_or(value.len());
            let name = value[..value_len].trim_end();
            if !name.is_empty() {
                class = Some(StyleClass::new(name));
            }
            close = value_start + value_len;
        }
    }

    if view.byte(close) != Some(b'}') {
        return None;
    }
    let end = close + 1;

    Some(StartTag {
        kind,
        class,
        line: view.line,
        span: Span::new(view.start, end),
        alone: end == view.end,
    })
}

/// Finds the closing tag for `kind` anywhere in the line, at or after `from`.
pub fn find_end_tag(view: &LineView<'_>, kind: ConstructKind, from: usize) -> Option<EndTag> {
    let needle = kind.close_tag();
    let offset = view.rest(from).find(&needle)?;
    let start = from.max(view.start) + offset;
    let end = start + needle.len();

    Some(EndTag {
        line: view.line,
        span: Span::new(start, end),
        alone: start == view.start && end == view.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aside::cursor::line_of;
    use rstest::rstest;

    fn start_tag(src: &str) -> Option<StartTag> {
        find_start_tag(&line_of(src))
    }

    fn end_tag(src: &str, kind: ConstructKind) -> Option<EndTag> {
        let view = line_of(src);
        find_end_tag(&view, kind, view.start)
    }

    #[test]
    fn bare_aside_tag() {
        let tag = start_tag("{aside}").unwrap();
        assert_eq!(tag.kind, ConstructKind::Note);
        assert_eq!(tag.class, None);
        assert_eq!(tag.span, Span::new(0, 7));
        assert!(tag.alone);
    }

    #[test]
    fn tag_followed_by_content() {
        let tag = start_tag("{blurb} text").unwrap();
        assert_eq!(tag.kind, ConstructKind::Callout);
        assert_eq!(tag.span, Span::new(0, 7));
        assert!(!tag.alone);
    }

    #[rstest]
    #[case("{blurb, class: tip}", "tip", 19)]
    #[case("{blurb,class:warning}", "warning", 21)]
    #[case("{blurb , class:  tip  }", "tip", 23)]
    fn blurb_class_clause(#[case] src: &str, #[case] class: &str, #[case] end: usize) {
        let tag = start_tag(src).unwrap();
        assert_eq!(tag.class, Some(StyleClass::new(class)));
        assert_eq!(tag.span.end, end);
        assert!(tag.alone);
    }

    #[test]
    fn empty_class_is_no_class() {
        let tag = start_tag("{blurb, class: }").unwrap();
        assert_eq!(tag.class, None);
    }

    #[rstest]
    #[case("{aside, class: tip}")]
    #[case("{blurb, style: tip}")]
    #[case("{blurb, class: tip")]
    #[case("{Aside}")]
    #[case("{sidebar}")]
    #[case("{aside")]
    #[case("{aside }")]
    #[case("x {aside}")]
    fn malformed_tags_are_not_recognized(#[case] src: &str) {
        assert_eq!(start_tag(src), None);
    }

    #[test]
    fn end_tag_alone() {
        let tag = end_tag("{/aside}", ConstructKind::Note).unwrap();
        assert_eq!(tag.span, Span::new(0, 8));
        assert!(tag.alone);
    }

    #[test]
    fn end_tag_after_text() {
        let tag = end_tag("the end.{/blurb}", ConstructKind::Callout).unwrap();
        assert_eq!(tag.span, Span::new(8, 16));
        assert!(!tag.alone);
    }

    #[test]
    fn end_tag_must_match_kind() {
        assert_eq!(end_tag("{/aside}", ConstructKind::Callout), None);
    }

    #[test]
    fn end_tag_search_starts_at_offset() {
        let view = line_of("{/aside} x {/aside}");
        let tag = find_end_tag(&view, ConstructKind::Note, 1).unwrap();
        assert_eq!(tag.span.start, 11);
    }
}
