use std::fmt;

use serde::Serialize;

/// A non-fatal observation made while parsing. Parsing always proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Zero-based source line.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A blurb named a style class outside the known set. It is rendered as given.
    UnknownStyleClass { class: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownStyleClass { class } => {
                write!(f, "line {}: unknown blurb class `{class}`", self.line + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_one_based_lines() {
        let d = Diagnostic {
            line: 2,
            kind: DiagnosticKind::UnknownStyleClass {
                class: "bogus".into(),
            },
        };
        assert_eq!(d.to_string(), "line 3: unknown blurb class `bogus`");
    }
}
