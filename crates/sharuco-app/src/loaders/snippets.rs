//! Snippet collection loader

use futures::stream::{self, BoxStream};
use futures::{future, StreamExt};
use sharuco_core::{
    CodeSnippet, DataSource, FetchError, ProfileKey, SnippetQuery, SnippetSet, SnippetSource,
};
use std::sync::Arc;
use std::time::Duration;

use super::upstream::live_results;

/// One state of the snippet subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetSnapshot {
    /// Waiting for the first value
    Loading,
    /// The public snippets of the requested owner; possibly empty
    Loaded(SnippetSet),
    /// The subscription failed; terminal
    Failed(FetchError),
}

impl SnippetSnapshot {
    /// Whether the collection is still unresolved.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the subscription failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The resolved records.
    pub fn records(&self) -> Option<&SnippetSet> {
        match self {
            Self::Loaded(records) => Some(records),
            _ => None,
        }
    }
}

/// Subscribes to the public snippets of one profile.
#[derive(Clone)]
pub struct SnippetLoader {
    source: Arc<dyn SnippetSource>,
    first_snapshot_timeout: Option<Duration>,
}

impl SnippetLoader {
    /// Create a loader over `source` with no first-snapshot limit.
    pub fn new(source: Arc<dyn SnippetSource>) -> Self {
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

    /// Snapshots of the public snippets owned by `owner`.
    ///
    /// Every delivered set satisfies [`SnippetQuery::public_by`]; records the
    /// data layer returns outside the predicate are dropped.
    pub fn load(&self, owner: ProfileKey) -> BoxStream<'static, SnippetSnapshot> {
        let query = SnippetQuery::public_by(owner);
        let source = Arc::clone(&self.source);
        let upstream_query = query.clone();
        let results = live_results(
            DataSource::Snippets,
            self.first_snapshot_timeout,
            move || source.subscribe_snippets(&upstream_query),
        );

        let snapshots = results.map(move |result| match result {
            Ok(rows) => {
                let records = admit(&query, rows);
                if records.is_empty() {
                    tracing::debug!(query = %query, "no public snippets");
                }
                SnippetSnapshot::Loaded(records)
            }
            Err(error) => {
                tracing::warn!(query = %query, error = %error, "snippet fetch failed");
                SnippetSnapshot::Failed(error)
            }
        });

        stream::once(future::ready(SnippetSnapshot::Loading))
            .chain(snapshots)
            .boxed()
    }
}

fn admit(query: &SnippetQuery, rows: Vec<CodeSnippet>) -> SnippetSet {
    rows.into_iter()
        .filter(|snippet| {
            let admitted = query.matches(snippet);
            if !admitted {
                tracing::debug!(query = %query, id = %snippet.id, "dropping snippet outside query");
            }
            admitted
        })
        .collect()
}

impl std::fmt::Debug for SnippetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetLoader")
            .field("first_snapshot_timeout", &self.first_snapshot_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharuco_core::SnapshotStream;
    use sharuco_effects::MemorySnippetStore;
    use sharuco_testkit::{key, SnippetBuilder};

    /// A data layer that ignores the query and returns every row it holds.
    struct Leaky(Vec<CodeSnippet>);

    impl SnippetSource for Leaky {
        fn subscribe_snippets(&self, _query: &SnippetQuery) -> SnapshotStream<Vec<CodeSnippet>> {
            stream::once(future::ready(Ok(self.0.clone()))).boxed()
        }
    }

    #[tokio::test]
    async fn zero_public_snippets_is_an_empty_set() {
        let store = Arc::new(MemorySnippetStore::with_snippets([
            SnippetBuilder::new("p1", "bob").private().build(),
        ]));
        let loader = SnippetLoader::new(store);
        let snapshots: Vec<_> = loader.load(key("bob")).take(2).collect().await;

        assert_eq!(snapshots[0], SnippetSnapshot::Loading);
        assert_eq!(snapshots[1], SnippetSnapshot::Loaded(SnippetSet::new()));
    }

    #[tokio::test]
    async fn records_outside_the_query_are_dropped() {
        let leaky = Leaky(vec![
            SnippetBuilder::new("a1", "alice").build(),
            SnippetBuilder::new("a2", "alice").private().build(),
            SnippetBuilder::new("b1", "bob").build(),
        ]);
        let loader = SnippetLoader::new(Arc::new(leaky));
        let snapshots: Vec<_> = loader.load(key("alice")).collect().await;

        let records = snapshots[1].records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.contains(&"a1".into()));
    }

    #[tokio::test]
    async fn fault_is_attributed_to_snippets() {
        let store = Arc::new(MemorySnippetStore::new());
        store.fail(&key("bob"), FetchError::transport(DataSource::Profile, "reset"));
        let loader = SnippetLoader::new(store);
        let snapshots: Vec<_> = loader.load(key("bob")).take(2).collect().await;

        assert!(snapshots[1].is_error());
        assert_matches::assert_matches!(
            &snapshots[1],
            SnippetSnapshot::Failed(FetchError { origin: DataSource::Snippets, .. })
        );
    }
}
