//! # Scoped line-state edits
//!
//! Container rules rewrite markdown-it's per-line offsets so the content they
//! hand to the block tokenizer starts after their own syntax. Siblings parsed
//! later re-read the same table, so every edit must be undone.
//!
//! A [`LineScope`] makes that pairing structural: it records a line's original
//! [`LineBounds`] the moment the line is edited through it, snapshots the
//! global cursor fields (`line`, `line_max`, `blk_indent`) when it is acquired,
//! and puts everything back when it is dropped. Early `break`s and `return`s
//! cannot skip the restore.
//!
//! The scope dereferences to `BlockState`, so the tokenizer can be re-entered
//! through it while the edits are live:
//!
//! ```ignore
//! let mut scope = LineScope::new(state);
//! scope.edit(line, |b| b.line_start = after_marker);
//! scope.blk_indent = 0;
//! md.block.tokenize(&mut scope);
//! // dropped here: line table and globals restored
//! ```

use std::ops::{Deref, DerefMut};

use markdown_it::parser::block::BlockState;

/// The offsets of one line a container may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBounds {
    /// Where the line's content begins once container syntax is stripped.
    pub line_start: usize,
    /// End of the line's content, before the newline.
    pub line_end: usize,
    pub first_nonspace: usize,
    /// Column of `first_nonspace`; negative marks a lazy continuation line.
    pub indent_nonspace: i32,
}

impl LineBounds {
    pub fn of(state: &BlockState, line: usize) -> Self {
        let offsets = &state.line_offsets[line];
        Self {
            line_start: offsets.line_start,
            line_end: offsets.line_end,
            first_nonspace: offsets.first_nonspace,
            indent_nonspace: offsets.indent_nonspace,
        }
    }

    fn write(self, state: &mut BlockState, line: usize) {
        let offsets = &mut state.line_offsets[line];
        offsets.line_start = self.line_start;
        offsets.line_end = self.line_end;
        offsets.first_nonspace = self.first_nonspace;
        offsets.indent_nonspace = self.indent_nonspace;
    }
}

/// Cursor fields of the state as they were when the scope was acquired.
#[derive(Debug, Clone, Copy)]
struct Globals {
    line: usize,
    line_max: usize,
    blk_indent: usize,
}

pub struct LineScope<'s, 'a, 'b> {
    state: &'s mut BlockState<'a, 'b>,
    /// Original bounds in edit order. Restored in reverse so a line edited
    /// twice ends up with its first recorded value.
    saved_lines: Vec<(usize, LineBounds)>,
    saved: Globals,
}

impl<'s, 'a, 'b> LineScope<'s, 'a, 'b> {
    pub fn new(state: &'s mut BlockState<'a, 'b>) -> Self {
        let saved = Globals {
            line: state.line,
            line_max: state.line_max,
            blk_indent: state.blk_indent,
        };
        Self {
            state,
            saved_lines: Vec::new(),
            saved,
        }
    }

    /// Records the line's bounds, then lets `change` rewrite them.
    pub fn edit(&mut self, line: usize, change: impl FnOnce(&mut LineBounds)) {
        let original = LineBounds::of(self.state, line);
        self.saved_lines.push((line, original));
        let mut bounds = original;
        change(&mut bounds);
        bounds.write(self.state, line);
    }
}

impl<'a, 'b> Deref for LineScope<'_, 'a, 'b> {
    type Target = BlockState<'a, 'b>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<'a, 'b> DerefMut for LineScope<'_, 'a, 'b> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for LineScope<'_, '_, '_> {
    fn drop(&mut self) {
        for (line, original) in self.saved_lines.drain(..).rev() {
            original.write(self.state, line);
        }
        self.state.line = self.saved.line;
        self.state.line_max = self.saved.line_max;
        self.state.blk_indent = self.saved.blk_indent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_it::{
        MarkdownIt, Node, parser::block::BlockRule,
        plugins::cmark::block::paragraph::ParagraphScanner,
    };
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    thread_local! {
        static RESTORED: Cell<usize> = const { Cell::new(0) };
    }

    fn table(state: &BlockState) -> Vec<LineBounds> {
        (0..state.line_offsets.len())
            .map(|line| LineBounds::of(state, line))
            .collect()
    }

    /// Edits the line it is asked about, drops the scope and checks nothing leaked.
    struct EditThenRestore;

    impl BlockRule for EditThenRestore {
        fn check(_: &mut BlockState) -> Option<()> {
            None
        }

        fn run(state: &mut BlockState) -> Option<(Node, usize)> {
            let before = table(state);
            let (line, line_max, blk_indent) = (state.line, state.line_max, state.blk_indent);

            {
                let mut scope = LineScope::new(state);
                scope.edit(line, |b| {
                    b.first_nonspace = b.line_end;
                    b.indent_nonspace = -1;
                });
                scope.edit(line, |b| b.line_start = b.line_end);
                scope.blk_indent = 7;
                scope.line_max = line + 1;
                scope.line = line + 1;

                assert_eq!(scope.blk_indent, 7);
                assert_eq!(scope.line_offsets[line].indent_nonspace, -1);
                assert_eq!(
                    scope.line_offsets[line].line_start,
                    scope.line_offsets[line].line_end
                );
            }

            assert_eq!(table(state), before);
            assert_eq!(state.line, line);
            assert_eq!(state.line_max, line_max);
            assert_eq!(state.blk_indent, blk_indent);
            RESTORED.with(|count| count.set(count.get() + 1));
            None
        }
    }

    #[test]
    fn restores_lines_and_globals_on_drop() {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        md.block
            .add_rule::<EditThenRestore>()
            .before::<ParagraphScanner>();

        let html = md.parse("  one\n\ntwo\n").render();

        assert_eq!(html, "<p>one</p>\n<p>two</p>\n");
        assert_eq!(RESTORED.with(Cell::get), 2);
    }
}
