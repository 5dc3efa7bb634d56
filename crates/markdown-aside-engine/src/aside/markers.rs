//! Line-prefix sigils (`A>`, `T>`, ...) and the scanner that recognizes them.

use super::{
    cursor::{LineView, is_space},
    kind::ConstructKind,
};
use crate::parsing::span::Span;

/// Width of every sigil in bytes.
pub const SIGIL_LEN: usize = 2;

/// One row of the sigil table.
#[derive(Debug, PartialEq, Eq)]
pub struct MarkerEntry {
    pub sigil: &'static str,
    pub kind: ConstructKind,
    /// Style class the sigil implies, for blurbs.
    pub class: Option<&'static str>,
}

const fn entry(sigil: &'static str, kind: ConstructKind, class: Option<&'static str>) -> MarkerEntry {
    MarkerEntry { sigil, kind, class }
}

pub static MARKERS: [MarkerEntry; 10] = [
    entry("A>", ConstructKind::Note, None),
    entry("B>", ConstructKind::Callout, None),
    entry("C>", ConstructKind::Callout, Some("center")),
    entry("D>", ConstructKind::Callout, Some("discussion")),
    entry("E>", ConstructKind::Callout, Some("error")),
    entry("I>", ConstructKind::Callout, Some("information")),
    entry("Q>", ConstructKind::Callout, Some("question")),
    entry("T>", ConstructKind::Callout, Some("tip")),
    entry("W>", ConstructKind::Callout, Some("warning")),
    entry("X>", ConstructKind::Callout, Some("exercise")),
];

pub fn lookup(sigil: &[u8]) -> Option<&'static MarkerEntry> {
    MARKERS.iter().find(|m| m.sigil.as_bytes() == sigil)
}

/// A recognized sigil at the start of a line's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub entry: &'static MarkerEntry,
    pub line: usize,
    /// Sigil plus the single space or tab after it, if any.
    pub span: Span,
    pub space_after: bool,
}

impl BlockHeader {
    /// Two headers continue the same block when they use the same sigil.
    pub fn continues(&self, other: &BlockHeader) -> bool {
        std::ptr::eq(self.entry, other.entry)
    }
}

/// Recognizes a sigil at the start of the line's content.
pub fn find_block_header(view: &LineView<'_>) -> Option<BlockHeader> {
    let bytes = view.text.as_bytes();
    let entry = lookup(bytes.get(..SIGIL_LEN)?)?;
    let space_after = bytes.get(SIGIL_LEN).copied().is_some_and(is_space);

    Some(BlockHeader {
        entry,
        line: view.line,
        span: Span::new(view.start, view.start + SIGIL_LEN + usize::from(space_after)),
        space_after,
    })
}
