//! # Asides and blurbs
//!
//! Markua's sidebar constructs, added to markdown-it's block grammar as one
//! rule:
//!
//! ```text
//! A> An aside, one line-prefix per line.
//!
//! T> A blurb styled as a tip. B> is an unstyled blurb.
//!
//! {aside}
//! An aside delimited by tags.
//! {/aside}
//!
//! {blurb, class: warning}
//! A blurb with an explicit style class.
//! {/blurb}
//! ```
//!
//! The rule sits ahead of the paragraph rule and may interrupt paragraphs,
//! block quotes and lists. Each construct becomes an [`AsideNode`] holding
//! ordinary block nodes, rendered as an `<aside>` element.
//!
//! Unknown style classes are kept as written and reported as
//! [`Diagnostic`]s once the document is parsed.

pub mod cursor;
pub mod kind;
pub mod markers;
pub mod quote_block;
pub mod render;
pub mod tag_block;
pub mod tags;

pub use kind::{BlockSpan, ConstructKind, KNOWN_CLASSES, StyleClass};
pub use render::AsideNode;

use markdown_it::{
    MarkdownIt, Node, NodeValue,
    parser::{
        block::{BlockRule, BlockState},
        extset::MarkdownItExt,
    },
    plugins::cmark::block::paragraph::ParagraphScanner,
};

use crate::parsing::diagnostic::{Diagnostic, DiagnosticKind};
use cursor::LineView;
use markers::{BlockHeader, find_block_header};
use tags::{StartTag, find_start_tag};

/// Indentation, in columns, at which a line is code rather than a construct.
pub const CODE_INDENT: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsideOptions {
    /// Style classes accepted without a diagnostic, on top of [`KNOWN_CLASSES`].
    pub extra_classes: Vec<String>,
    pub warn_unknown_classes: bool,
}

impl Default for AsideOptions {
    fn default() -> Self {
        Self {
            extra_classes: Vec::new(),
            warn_unknown_classes: true,
        }
    }
}

impl MarkdownItExt for AsideOptions {}

impl AsideOptions {
    /// One diagnostic per span whose style class is unknown.
    pub fn diagnose(&self, spans: &[BlockSpan]) -> Vec<Diagnostic> {
        if !self.warn_unknown_classes {
            return Vec::new();
        }
        spans
            .iter()
            .filter_map(|span| {
                let class = span.class.as_ref()?;
                if class.is_known(&self.extra_classes) {
                    return None;
                }
                let diagnostic = Diagnostic {
                    line: span.start_line,
                    kind: DiagnosticKind::UnknownStyleClass {
                        class: class.to_string(),
                    },
                };
                log::debug!("{diagnostic}");
                Some(diagnostic)
            })
            .collect()
    }
}

/// How a construct opens on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Opening {
    Marker(BlockHeader),
    Tag(StartTag),
}

fn opening(state: &BlockState) -> Option<Opening> {
    // Indented four or more: code, not a construct.
    if state.line_indent(state.line) >= CODE_INDENT {
        return None;
    }
    let view = LineView::of(state, state.line);
    find_block_header(&view)
        .map(Opening::Marker)
        .or_else(|| find_start_tag(&view).map(Opening::Tag))
}

/// Block rule recognizing both the sigil and the tag forms.
pub struct AsideScanner;

impl BlockRule for AsideScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        opening(state).map(|_| ())
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let start_line = state.line;
        let (mut node, span) = match opening(state)? {
            Opening::Marker(header) => quote_block::parse_marker_block(state, header),
            Opening::Tag(tag) => tag_block::parse_tag_block(state, tag),
        };
        log::debug!(
            "{} on lines {}..={} (class {:?}, single line: {})",
            span.kind.tag(),
            span.start_line + 1,
            span.end_line,
            span.class.as_ref().map(StyleClass::as_str),
            span.single_line
        );
        node.srcmap = state.get_map(start_line, span.end_line - 1);
        Some((node, span.end_line - start_line))
    }
}

/// Stand-in parent while a construct's content is tokenized.
#[derive(Debug)]
struct Content;

impl NodeValue for Content {}

/// Runs the block tokenizer over `state.line..state.line_max` and returns
/// the nodes it produced, leaving `state.line` where it stopped.
pub(crate) fn tokenize_content(state: &mut BlockState) -> Vec<Node> {
    let md = state.md;
    let parent = std::mem::replace(&mut state.node, Node::new(Content));
    md.block.tokenize(state);
    let mut content = std::mem::replace(&mut state.node, parent);
    std::mem::take(&mut content.children)
}

/// Adds asides and blurbs with default options.
pub fn add(md: &mut MarkdownIt) {
    add_with(md, AsideOptions::default());
}

/// Adds asides and blurbs with `options`. A parser that already has them
/// keeps its first options.
pub fn add_with(md: &mut MarkdownIt, options: AsideOptions) {
    if md.ext.get::<AsideOptions>().is_some() {
        log::warn!("asides are already enabled on this parser");
        return;
    }
    md.ext.insert(options);
    md.block
        .add_rule::<AsideScanner>()
        .before::<ParagraphScanner>();
}

/// Options `md` was set up with, if asides are enabled.
pub fn options(md: &MarkdownIt) -> Option<&AsideOptions> {
    md.ext.get::<AsideOptions>()
}

/// Spans of every aside and blurb in `ast`, outer blocks first.
pub fn spans(ast: &Node) -> Vec<BlockSpan> {
    fn walk(node: &Node, spans: &mut Vec<BlockSpan>) {
        if let Some(aside) = node.cast::<AsideNode>() {
            spans.push(aside.span.clone());
        }
        for child in &node.children {
            walk(child, spans);
        }
    }

    let mut spans = Vec::new();
    walk(ast, &mut spans);
    spans
}
