//! Live Source Traits
//!
//! Read-only subscriptions to the profile store and the snippet store.
//!
//! # Contract
//!
//! - Subscribing never blocks. Values are pushed through the returned
//!   [`SnapshotStream`] as the store resolves and changes.
//! - Each item fully supersedes the previous one; item N+1 is at least as
//!   fresh as item N.
//! - `Err` reports a retrieval fault. Consumers treat it as terminal for the
//!   subscription.
//! - Dropping the stream releases the subscription. No value is delivered
//!   afterwards and the handler frees its per-subscriber resources.

use futures::stream::BoxStream;
use std::sync::Arc;

use crate::domain::{CodeSnippet, UserProfile};
use crate::errors::FetchError;
use crate::identifiers::ProfileKey;
use crate::query::SnippetQuery;

/// Live stream of upstream results.
pub type SnapshotStream<T> = BoxStream<'static, Result<T, FetchError>>;

/// Subscription to single profile records.
pub trait ProfileSource: Send + Sync {
    /// Subscribe to the record at `key`.
    ///
    /// `Ok(None)` means the key resolves to no record.
    fn subscribe_profile(&self, key: &ProfileKey) -> SnapshotStream<Option<UserProfile>>;
}

/// Subscription to filtered snippet collections.
pub trait SnippetSource: Send + Sync {
    /// Subscribe to every snippet matching `query`.
    ///
    /// An owner with no matching snippets yields `Ok(vec![])`, never an error.
    fn subscribe_snippets(&self, query: &SnippetQuery) -> SnapshotStream<Vec<CodeSnippet>>;
}

/// Blanket implementation for Arc<T> where T: ProfileSource
impl<T: ProfileSource + ?Sized> ProfileSource for Arc<T> {
    fn subscribe_profile(&self, key: &ProfileKey) -> SnapshotStream<Option<UserProfile>> {
        (**self).subscribe_profile(key)
    }
}

/// Blanket implementation for Arc<T> where T: SnippetSource
impl<T: SnippetSource + ?Sized> SnippetSource for Arc<T> {
    fn subscribe_snippets(&self, query: &SnippetQuery) -> SnapshotStream<Vec<CodeSnippet>> {
        (**self).subscribe_snippets(query)
    }
}
