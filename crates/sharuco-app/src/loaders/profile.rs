//! Profile loader

use futures::stream::{self, BoxStream};
use futures::{future, StreamExt};
use sharuco_core::{DataSource, FetchError, ProfileKey, ProfileSource, UserProfile};
use std::sync::Arc;
use std::time::Duration;

use super::upstream::live_results;

/// One state of the profile subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSnapshot {
    /// Waiting for the first value
    Loading,
    /// No key was supplied; no lookup was made
    NoKey,
    /// The key resolved to no record
    Missing,
    /// The key resolved to a record
    Found(UserProfile),
    /// The subscription failed; terminal
    Failed(FetchError),
}

impl ProfileSnapshot {
    /// Whether the profile is still unresolved.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the subscription failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Whether a record is present.
    pub fn exists(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The record, when present.
    pub fn record(&self) -> Option<&UserProfile> {
        match self {
            Self::Found(profile) => Some(profile),
            _ => None,
        }
    }

    /// The fault, when the subscription failed.
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Subscribes to exactly one profile record by key.
#[derive(Clone)]
pub struct ProfileLoader {
    source: Arc<dyn ProfileSource>,
    first_snapshot_timeout: Option<Duration>,
}

impl ProfileLoader {
    /// Create a loader over `source` with no first-snapshot limit.
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self {
            source,
            first_snapshot_timeout: None,
        }
    }

    /// Report a `TimedOut` fault when no first value arrives within `limit`.
    pub fn with_first_snapshot_timeout(mut self, limit: Option<Duration>) -> Self {
        self.first_snapshot_timeout = limit;
        self
    }

    /// Snapshots for `key`.
    ///
    /// Without a key the stream yields [`ProfileSnapshot::NoKey`] once and
    /// ends. Otherwise it yields [`ProfileSnapshot::Loading`] and then one
    /// snapshot per upstream change. Nothing is looked up until the stream is
    /// polled.
    pub fn load(&self, key: Option<ProfileKey>) -> BoxStream<'static, ProfileSnapshot> {
        let Some(key) = key else {
            tracing::debug!("no profile key supplied; skipping lookup");
            return stream::once(future::ready(ProfileSnapshot::NoKey)).boxed();
        };

        let source = Arc::clone(&self.source);
        let lookup_key = key.clone();
        let results = live_results(DataSource::Profile, self.first_snapshot_timeout, move || {
            source.subscribe_profile(&lookup_key)
        });

        let snapshots = results.map(move |result| match result {
            Ok(Some(profile)) => ProfileSnapshot::Found(profile),
            Ok(None) => {
                tracing::debug!(key = %key, "profile not found");
                ProfileSnapshot::Missing
            }
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "profile fetch failed");
                ProfileSnapshot::Failed(error)
            }
        });

        stream::once(future::ready(ProfileSnapshot::Loading))
            .chain(snapshots)
            .boxed()
    }
}

impl std::fmt::Debug for ProfileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileLoader")
            .field("first_snapshot_timeout", &self.first_snapshot_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharuco_effects::MemoryProfileStore;
    use sharuco_testkit::{key, ProfileBuilder};

    fn loader(store: &Arc<MemoryProfileStore>) -> ProfileLoader {
        ProfileLoader::new(Arc::clone(store) as Arc<dyn ProfileSource>)
    }

    #[tokio::test]
    async fn absent_key_never_looks_up() {
        let store = Arc::new(MemoryProfileStore::new());
        let snapshots: Vec<_> = loader(&store).load(None).collect().await;

        assert_eq!(snapshots, vec![ProfileSnapshot::NoKey]);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn loading_then_found() {
        let alice = ProfileBuilder::new("alice").build();
        let store = Arc::new(MemoryProfileStore::with_profiles([alice.clone()]));
        let mut snapshots = loader(&store).load(Some(key("alice")));

        assert_eq!(store.lookup_count(), 0);
        assert_eq!(snapshots.next().await, Some(ProfileSnapshot::Loading));
        let found = snapshots.next().await.unwrap();
        assert!(found.exists());
        assert_eq!(found.record(), Some(&alice));
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn unknown_key_is_missing_not_error() {
        let store = Arc::new(MemoryProfileStore::new());
        let mut snapshots = loader(&store).load(Some(key("ghost")));
        snapshots.next().await;

        let missing = snapshots.next().await.unwrap();
        assert_eq!(missing, ProfileSnapshot::Missing);
        assert!(!missing.is_loading());
        assert!(!missing.is_error());
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn fault_is_attributed_to_profile() {
        let store = Arc::new(MemoryProfileStore::new());
        store.fail(&key("carol"), FetchError::backend(DataSource::Snippets, "down"));
        let snapshots: Vec<_> = loader(&store)
            .load(Some(key("carol")))
            .take(2)
            .collect()
            .await;

        let error = snapshots[1].error().unwrap();
        assert_eq!(error.origin, DataSource::Profile);
    }

    #[tokio::test]
    async fn later_changes_supersede() {
        let store = Arc::new(MemoryProfileStore::with_profiles([
            ProfileBuilder::new("alice").build(),
        ]));
        let mut snapshots = loader(&store).load(Some(key("alice")));
        snapshots.next().await;
        snapshots.next().await;

        store.upsert(ProfileBuilder::new("alice").certified().build());
        let updated = snapshots.next().await.unwrap();
        assert!(updated.record().unwrap().is_certified);
    }
}
