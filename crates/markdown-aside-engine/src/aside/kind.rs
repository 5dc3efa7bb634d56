use std::fmt;

use serde::Serialize;

/// Style classes the renderer's stylesheet is expected to know about.
///
/// Other classes are accepted and rendered unchanged; they only produce a
/// diagnostic.
pub const KNOWN_CLASSES: &[&str] = &[
    "center",
    "discussion",
    "error",
    "information",
    "tip",
    "warning",
    "exercise",
    "question",
];

/// The two block constructs this module adds to the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstructKind {
    /// `A>` lines or `{aside}` tags. Never styled.
    Note,
    /// `B>`..`X>` lines or `{blurb}` tags, optionally with a style class.
    Callout,
}

impl ConstructKind {
    /// Name used in bracket tags.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Note => "aside",
            Self::Callout => "blurb",
        }
    }

    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "aside" => Some(Self::Note),
            "blurb" => Some(Self::Callout),
            _ => None,
        }
    }

    /// Literal opening bracket tag, e.g. `{blurb}`.
    pub fn open_tag(self) -> String {
        format!("{{{}}}", self.tag())
    }

    /// Literal closing bracket tag, e.g. `{/blurb}`.
    pub fn close_tag(self) -> String {
        format!("{{/{}}}", self.tag())
    }

    pub fn accepts_class(self) -> bool {
        self == Self::Callout
    }
}

/// A blurb's style class, as written in the source or implied by its marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StyleClass(String);

impl StyleClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the class is in [`KNOWN_CLASSES`] or in `extra`.
    pub fn is_known(&self, extra: &[String]) -> bool {
        KNOWN_CLASSES.contains(&self.0.as_str()) || extra.iter().any(|e| *e == self.0)
    }
}

/// Extent of one construct occurrence, as consumed by its extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSpan {
    pub kind: ConstructKind,
    pub class: Option<StyleClass>,
    pub start_line: usize,
    /// First line after the block.
    pub end_line: usize,
    /// Open and close tags share one line. Never set for sigil blocks.
    pub single_line: bool,
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_names() {
        for kind in [ConstructKind::Note, ConstructKind::Callout] {
            assert_eq!(ConstructKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ConstructKind::from_tag("Aside"), None);
    }

    #[test]
    fn bracket_tags() {
        assert_eq!(ConstructKind::Callout.open_tag(), "{blurb}");
        assert_eq!(ConstructKind::Note.close_tag(), "{/aside}");
    }

    #[test]
    fn known_classes_include_extras() {
        let class = StyleClass::new("sidebar");
        assert!(!class.is_known(&[]));
        assert!(class.is_known(&["sidebar".to_string()]));
        assert!(StyleClass::new("tip").is_known(&[]));
    }
}
