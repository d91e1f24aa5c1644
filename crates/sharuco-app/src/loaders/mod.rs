//! Live loaders
//!
//! Each loader turns one data-layer subscription into a lazy stream of
//! snapshots. The first snapshot is always the loader's loading state.
//! Dropping the stream releases the subscription.

mod profile;
mod snippets;
mod upstream;

pub use profile::{ProfileLoader, ProfileSnapshot};
pub use snippets::{SnippetLoader, SnippetSnapshot};
