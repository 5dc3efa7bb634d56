use markdown_it::parser::block::BlockState;

/// Columns between tab stops.
pub const TAB_STOP: i32 = 4;

pub fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Read-only view of one line's content, as the current line table sees it.
///
/// `start` and `end` are absolute offsets into the source. A line whose
/// markers were stripped by an enclosing container shows only what is left.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'a> {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    src: &'a str,
}

impl<'a> LineView<'a> {
    pub fn new(src: &'a str, line: usize, start: usize, end: usize) -> Self {
        let end = end.min(src.len());
        let start = start.min(end);
        Self {
            line,
            start,
            end,
            text: src.get(start..end).unwrap_or(""),
            src,
        }
    }

    pub fn of(state: &'a BlockState, line: usize) -> Self {
        let src = &state.src[..];
        match state.line_offsets.get(line) {
            Some(offsets) => Self::new(src, line, offsets.first_nonspace, offsets.line_end),
            None => Self::new(src, line, src.len(), src.len()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte at absolute `pos`, if it lies inside the view.
    pub fn byte(&self, pos: usize) -> Option<u8> {
        if pos < self.start || pos >= self.end {
            return None;
        }
        self.src.as_bytes().get(pos).copied()
    }

    /// First position at or after `pos` that is not a space or tab, capped at `end`.
    pub fn skip_spaces(&self, mut pos: usize) -> usize {
        while self.byte(pos).is_some_and(is_space) {
            pos += 1;
        }
        pos.max(self.start).min(self.end)
    }

    /// Text from absolute `pos` to the end of the view.
    pub fn rest(&self, pos: usize) -> &'a str {
        self.src.get(pos.max(self.start)..self.end).unwrap_or("")
    }
}

/// Splits `src` into views the way a fresh line table would: content starts
/// after leading spaces and tabs.
#[cfg(test)]
pub(crate) fn lines_of(src: &str) -> Vec<LineView<'_>> {
    let mut views = Vec::new();
    let mut line_start = 0;
    for (line, text) in src.split('\n').enumerate() {
        let end = line_start + text.len();
        let start = line_start + text.bytes().take_while(|b| is_space(*b)).count();
        views.push(LineView::new(src, line, start, end));
        line_start = end + 1;
    }
    views
}

#[cfg(test)]
pub(crate) fn line_of(src: &str) -> LineView<'_> {
    lines_of(src)[0]
}
