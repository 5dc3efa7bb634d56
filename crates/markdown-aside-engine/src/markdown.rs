use markdown_it::{MarkdownIt, Node};

use crate::{
    aside::{self, BlockSpan},
    parsing::diagnostic::Diagnostic,
};

/// A CommonMark parser, extended by plugins.
///
/// ```
/// use markdown_aside_engine::{Markdown, aside};
///
/// let mut md = Markdown::new();
/// md.use_plugin(aside::add);
/// let out = md.render_html("T> Mind the gap.\n");
/// assert_eq!(out.html, "<aside class=\"blurb tip\">\n<p>Mind the gap.</p>\n</aside>\n");
/// ```
pub struct Markdown {
    pub parser: MarkdownIt,
    /// Render void elements as `<br />` rather than `<br>`.
    pub xhtml_out: bool,
}

/// Syntax tree, aside spans and diagnostics of one parse.
#[derive(Debug)]
pub struct ParsedDocument {
    pub ast: Node,
    pub spans: Vec<BlockSpan>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Markdown {
    pub fn new() -> Self {
        let mut parser = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut parser);
        Self {
            parser,
            xhtml_out: false,
        }
    }

    pub fn use_plugin(&mut self, plugin: impl FnOnce(&mut MarkdownIt)) -> &mut Self {
        plugin(&mut self.parser);
        self
    }

    pub fn parse(&self, src: &str) -> ParsedDocument {
        let ast = self.parser.parse(src);
        let spans = aside::spans(&ast);
        let diagnostics = aside::options(&self.parser)
            .map(|options| options.diagnose(&spans))
            .unwrap_or_default();
        ParsedDocument {
            ast,
            spans,
            diagnostics,
        }
    }

    pub fn render(&self, ast: &Node) -> String {
        if self.xhtml_out {
            ast.xrender()
        } else {
            ast.render()
        }
    }

    pub fn render_html(&self, src: &str) -> Rendered {
        let doc = self.parse(src);
        Rendered {
            html: self.render(&doc.ast),
            diagnostics: doc.diagnostics,
        }
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn without_plugin_sigils_are_text() {
        let md = Markdown::new();
        let doc = md.parse("T> tip\n");
        assert_eq!(md.render(&doc.ast), "<p>T&gt; tip</p>\n");
        assert!(doc.spans.is_empty());
    }

    #[test]
    fn plugin_renders_asides() {
        let mut md = Markdown::new();
        md.use_plugin(aside::add);
        let out = md.render_html("A> note\n\n{blurb, class: warning}\nCareful.\n{/blurb}\n");
        assert_eq!(
            out.html,
            "<aside>\n<p>note</p>\n</aside>\n<aside class=\"blurb warning\">\n<p>Careful.</p>\n</aside>\n"
        );
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn diagnostics_are_returned_with_html() {
        let mut md = Markdown::new();
        md.use_plugin(aside::add);
        let out = md.render_html("{blurb, class: shiny}x{/blurb}\n");
        assert_eq!(out.html, "<aside class=\"blurb shiny\">\n<p>x</p>\n</aside>\n");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].to_string(), "line 1: unknown blurb class `shiny`");
    }

    #[test]
    fn xhtml_output_closes_void_elements() {
        let mut md = Markdown::new();
        md.use_plugin(aside::add);
        md.xhtml_out = true;
        assert_eq!(
            md.render_html("{aside}\n***\n{/aside}\n").html,
            "<aside>\n<hr />\n</aside>\n"
        );
        md.xhtml_out = false;
        assert_eq!(
            md.render_html("{aside}\n***\n{/aside}\n").html,
            "<aside>\n<hr>\n</aside>\n"
        );
    }
}
