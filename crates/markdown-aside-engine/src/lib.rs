pub mod aside;
pub mod io;
pub mod markdown;
pub mod parsing;

// Re-export key types for easier usage
pub use aside::{AsideNode, AsideOptions, BlockSpan, ConstructKind, StyleClass};
pub use io::*;
pub use markdown::{Markdown, ParsedDocument, Rendered};
pub use parsing::diagnostic::{Diagnostic, DiagnosticKind};
