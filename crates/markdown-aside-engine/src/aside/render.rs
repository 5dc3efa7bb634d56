use markdown_it::{Node, NodeValue, Renderer};

use super::kind::{BlockSpan, ConstructKind};

/// Element both constructs render as.
pub const ELEMENT: &str = "aside";

/// Class every blurb element carries, ahead of its style class.
pub const BLURB_CLASS: &str = "blurb";

/// An aside or blurb in the syntax tree. Its children are ordinary blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsideNode {
    pub span: BlockSpan,
    /// The sigil or opening tag as written, e.g. `T>` or `{blurb}`.
    pub markup: String,
}

impl AsideNode {
    /// `blurb` plus the style class for blurbs; nothing for plain asides.
    fn class_attr(&self) -> Option<String> {
        match (self.span.kind, &self.span.class) {
            (ConstructKind::Note, _) => None,
            (ConstructKind::Callout, Some(class)) => Some(format!("{BLURB_CLASS} {class}")),
            (ConstructKind::Callout, None) => Some(BLURB_CLASS.to_string()),
        }
    }
}

impl NodeValue for AsideNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let mut attrs = node.attrs.clone();
        if let Some(class) = self.class_attr() {
            match attrs.iter_mut().find(|(name, _)| *name == "class") {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(&class);
                }
                None => attrs.push(("class", class)),
            }
        }

        fmt.cr();
        fmt.open(ELEMENT, &attrs);
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close(ELEMENT);
        fmt.cr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aside::kind::StyleClass;
    use pretty_assertions::assert_eq;

    fn node(kind: ConstructKind, class: Option<&str>) -> Node {
        Node::new(AsideNode {
            span: BlockSpan {
                kind,
                class: class.map(StyleClass::new),
                start_line: 0,
                end_line: 1,
                single_line: false,
            },
            markup: kind.open_tag(),
        })
    }

    #[test]
    fn note_renders_as_aside() {
        assert_eq!(node(ConstructKind::Note, None).render(), "<aside>\n</aside>\n");
    }

    #[test]
    fn blurb_gets_classes() {
        assert_eq!(
            node(ConstructKind::Callout, Some("tip")).render(),
            "<aside class=\"blurb tip\">\n</aside>\n"
        );
    }

    #[test]
    fn blurb_without_class() {
        assert_eq!(
            node(ConstructKind::Callout, None).render(),
            "<aside class=\"blurb\">\n</aside>\n"
        );
    }

    #[test]
    fn existing_class_is_extended() {
        let mut node = node(ConstructKind::Callout, Some("warning"));
        node.attrs.push(("class", "wide".into()));
        let html = node.render();
        assert!(html.starts_with("<aside class=\"wide blurb warning\">"));
        assert_eq!(node.attrs, [("class", "wide".to_string())]);
    }
}
