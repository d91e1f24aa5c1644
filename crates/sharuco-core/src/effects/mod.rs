//! Data-layer interfaces
//!
//! Pure signatures only; in-memory handlers live in `sharuco-effects`.

pub mod source;

pub use source::{ProfileSource, SnapshotStream, SnippetSource};
