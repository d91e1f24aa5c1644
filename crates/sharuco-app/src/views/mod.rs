//! View state, its combinator and the render projections

pub mod combinator;
pub mod header;
pub mod ordering;
pub mod state;

pub use combinator::{combine, LoaderUpdate, ViewCombinator};
pub use header::{ProfileHeader, SnippetCard};
pub use ordering::{newest_first, order_snippets, sort_newest_first};
pub use state::{SnippetsState, ViewState, ViewUpdate, EMPTY_SNIPPETS_PLACEHOLDER};
