//! Plumbing shared by the aside extractors.
//!
//! Block parsing itself is markdown-it's: its `BlockState` indexes the
//! source into lines and its block tokenizer walks them. Container rules
//! rewrite a line's bounds through a [`LineScope`](scope::LineScope) so the
//! content they hand back to the tokenizer looks as if their own syntax were
//! not there.

pub mod diagnostic;
pub mod scope;
pub mod span;
