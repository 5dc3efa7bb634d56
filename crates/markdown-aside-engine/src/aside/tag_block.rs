//! Blocks delimited by `{aside}` ... `{/aside}` or `{blurb}` ... `{/blurb}`.

use markdown_it::{Node, parser::block::BlockState};

use super::{
    cursor::LineView,
    kind::BlockSpan,
    render::AsideNode,
    tags::{EndTag, StartTag, find_end_tag},
    tokenize_content,
};
use crate::parsing::scope::LineScope;

/// Line range a tag block covers once its closing tag has been located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extent {
    /// First line of content.
    from: usize,
    /// One past the last line of content.
    to: usize,
    /// Where the parent tokenizer resumes.
    next: usize,
}

impl Extent {
    fn new(open: &StartTag, close: Option<&EndTag>, ceiling: usize) -> Self {
        let from = if open.alone { open.line + 1 } else { open.line };
        match close {
            Some(close) if close.alone => Self {
                from,
                to: close.line,
                next: close.line + 1,
            },
            Some(close) => Self {
                from,
                to: close.line + 1,
                next: close.line + 1,
            },
            // Unclosed: runs to the end of what the enclosing block owns.
            None => Self {
                from,
                to: ceiling,
                next: ceiling,
            },
        }
    }
}

/// First line after `open_line` that the enclosing container does not own.
///
/// Lazy continuation lines of a sigil block are outdented; they belong to
/// the enclosing paragraph, never to a tag block opened inside the sigil
/// block.
fn content_ceiling(state: &BlockState, open_line: usize) -> usize {
    (open_line + 1..state.line_max)
        .find(|&line| !LineView::of(state, line).is_blank() && state.line_indent(line) < 0)
        .unwrap_or(state.line_max)
}

/// Finds the closing tag for `open`, after it on its own line or on any
/// later line before `ceiling`.
fn find_close<'a>(
    open: &StartTag,
    ceiling: usize,
    view: impl Fn(usize) -> LineView<'a>,
) -> Option<EndTag> {
    if let Some(tag) = find_end_tag(&view(open.line), open.kind, open.span.end) {
        return Some(tag);
    }
    (open.line + 1..ceiling).find_map(|line| {
        let line = view(line);
        find_end_tag(&line, open.kind, line.start)
    })
}

/// Parses the tag block opened by `open` into an aside node.
///
/// Text sharing a line with either tag is part of the content. Text after the
/// closing tag on its line is dropped. The span never reaches past a line the
/// inner tokenizer left unconsumed.
pub fn parse_tag_block(state: &mut BlockState, open: StartTag) -> (Node, BlockSpan) {
    let kind = open.kind;
    let lines: &BlockState = state;
    let ceiling = content_ceiling(lines, open.line);
    let close = find_close(&open, ceiling, |line| LineView::of(lines, line));
    let extent = Extent::new(&open, close.as_ref(), ceiling);

    if close.is_none() {
        log::debug!(
            "unclosed `{}` on line {}; closing at line {ceiling}",
            kind.open_tag(),
            open.line + 1
        );
    }

    let mut scope = LineScope::new(state);

    if !open.alone {
        let after = LineView::of(&scope, open.line).skip_spaces(open.span.end);
        let indent = scope.blk_indent + (after - open.span.end);
        scope.edit(open.line, |b| {
            b.line_start = open.span.end;
            b.first_nonspace = after;
            b.indent_nonspace = indent as i32;
        });
    }
    if let Some(close) = close.filter(|c| !c.alone) {
        scope.edit(close.line, |b| b.line_end = close.span.start);
    }

    scope.line_max = extent.to;
    scope.line = extent.from;
    let children = tokenize_content(&mut scope);
    let consumed = scope.line;
    drop(scope);

    let next = if consumed < extent.to {
        log::debug!(
            "`{}` on line {} stopped at line {}",
            kind.open_tag(),
            open.line + 1,
            consumed + 1
        );
        consumed.max(open.line + 1)
    } else {
        extent.next
    };

    let span = BlockSpan {
        kind,
        class: open.class,
        start_line: open.line,
        end_line: next,
        single_line: close.is_some_and(|c| c.line == open.line),
    };
    let mut node = Node::new(AsideNode {
        span: span.clone(),
        markup: kind.open_tag(),
    });
    node.children = children;
    (node, span)
}
