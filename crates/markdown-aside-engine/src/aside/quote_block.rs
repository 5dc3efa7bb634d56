//! Blocks made of consecutive `A>` / `T>` / ... lines.
//!
//! Works like a block quote with a two-byte marker: every line carrying the
//! same sigil is stripped of it and the remainder is tokenized as nested
//! blocks. A line without a sigil continues the block lazily. Blank lines
//! and constructs that interrupt a block quote end it, and so does any
//! sigil-less line after an empty sigil line.

use markdown_it::{Node, parser::block::BlockState};

use super::{
    cursor::{LineView, TAB_STOP, is_space},
    kind::{BlockSpan, StyleClass},
    markers::{BlockHeader, SIGIL_LEN, find_block_header},
    render::AsideNode,
    tokenize_content,
};
use crate::parsing::scope::{LineBounds, LineScope};

/// Where a continued line's content sits once its sigil is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stripped {
    /// Start of the content, after the sigil and the space it owns.
    content_start: usize,
    first_nonspace: usize,
    /// Columns of whitespace before `first_nonspace`, measured from the
    /// column after the sigil's space.
    indent: i32,
}

/// Strips the sigil at `sigil_at` (visual column `column`) from a line ending at `end`.
///
/// One space after the sigil belongs to it. A tab only gives up one column;
/// the rest of its width stays indentation.
fn strip_sigil(bytes: &[u8], sigil_at: usize, column: i32, end: usize) -> Stripped {
    let mut pos = sigil_at + SIGIL_LEN;
    let mut column = column + SIGIL_LEN as i32;
    let mut origin = column;

    match bytes.get(pos) {
        Some(b' ') if pos < end => {
            pos += 1;
            column += 1;
            origin = column;
        }
        Some(b'\t') if pos < end => {
            origin = column + 1;
            column += TAB_STOP - column % TAB_STOP;
            pos += 1;
        }
        _ => {}
    }
    let content_start = pos;

    while pos < end {
        match bytes[pos] {
            b'\t' => column += TAB_STOP - column % TAB_STOP,
            b if is_space(b) => column += 1,
            _ => break,
        }
        pos += 1;
    }

    Stripped {
        content_start,
        first_nonspace: pos,
        indent: column - origin,
    }
}

/// Parses the sigil block starting at `header.line` into an aside node.
///
/// The returned span ends where the inner tokenizer stopped, so a lazy line
/// it could not place is left for the enclosing tokenizer.
pub fn parse_marker_block(state: &mut BlockState, header: BlockHeader) -> (Node, BlockSpan) {
    let start_line = header.line;
    let entry = header.entry;
    let kind = entry.kind;

    let mut scope = LineScope::new(state);
    let end_line = scope.line_max;
    let mut last_line_empty = false;
    let mut next_line = start_line;

    while next_line < end_line {
        let is_outdented = scope.line_indent(next_line) < 0;
        let view = LineView::of(&scope, next_line);
        if view.is_blank() {
            break;
        }

        let continued = find_block_header(&view).filter(|h| h.continues(&header));
        let end = view.end;

        if let Some(found) = continued
            && !is_outdented
        {
            let original = LineBounds::of(&scope, next_line);
            let stripped = strip_sigil(
                scope.src.as_bytes(),
                found.span.start,
                original.indent_nonspace,
                end,
            );
            scope.edit(next_line, |b| {
                b.line_start = stripped.content_start;
                b.first_nonspace = stripped.first_nonspace;
                b.indent_nonspace = stripped.indent;
            });
            last_line_empty = stripped.first_nonspace >= end;
            next_line += 1;
            continue;
        }

        if last_line_empty {
            break;
        }

        scope.line = next_line;
        if scope.test_rules_at_line() {
            break;
        }

        scope.edit(next_line, |b| b.indent_nonspace = -1);
        next_line += 1;
    }

    log::trace!(
        "{} block `{}` on lines {start_line}..{next_line}",
        kind.tag(),
        entry.sigil
    );

    scope.blk_indent = 0;
    scope.line_max = next_line;
    scope.line = start_line;
    let children = tokenize_content(&mut scope);
    let consumed = scope.line.clamp(start_line + 1, next_line.max(start_line + 1));
    drop(scope);

    let span = BlockSpan {
        kind,
        class: entry.class.map(StyleClass::new),
        start_line,
        end_line: consumed,
        single_line: false,
    };
    let mut node = Node::new(AsideNode {
        span: span.clone(),
        markup: entry.sigil.to_string(),
    });
    node.children = children;
    (node, span)
}
