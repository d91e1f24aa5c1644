//! In-memory snippet store
//!
//! Snippets are partitioned by owner key. A query always names an owner, so a
//! subscription watches exactly one partition and is woken only by changes to
//! that owner's snippets. The visibility part of the predicate is evaluated on
//! every delivery.

use futures::{future, StreamExt};
use parking_lot::RwLock;
use sharuco_core::{
    CodeSnippet, FetchError, ProfileKey, SnapshotStream, SnippetId, SnippetQuery, SnippetSet,
    SnippetSource,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::slot::Delivery;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Partition {
    delivery: Delivery,
    rows: Arc<SnippetSet>,
}

impl Default for Partition {
    fn default() -> Self {
        Self {
            delivery: Delivery::Live,
            rows: Arc::new(SnippetSet::new()),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    partitions: HashMap<ProfileKey, watch::Sender<Partition>>,
    owners: HashMap<SnippetId, ProfileKey>,
}

impl Tables {
    /// The owner's partition, created on first use.
    ///
    /// Creating one first drops every partition that has no rows, no delivery
    /// override and no subscribers.
    fn partition(&mut self, owner: &ProfileKey) -> &watch::Sender<Partition> {
        if !self.partitions.contains_key(owner) {
            self.partitions
                .retain(|_, tx| tx.receiver_count() > 0 || *tx.borrow() != Partition::default());
        }
        self.partitions
            .entry(owner.clone())
            .or_insert_with(|| watch::channel(Partition::default()).0)
    }
}

/// Snippet records held in memory.
#[derive(Debug, Default)]
pub struct MemorySnippetStore {
    tables: RwLock<Tables>,
    lookups: AtomicU64,
}

impl MemorySnippetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `snippets`.
    pub fn with_snippets(snippets: impl IntoIterator<Item = CodeSnippet>) -> Self {
        let store = Self::new();
        for snippet in snippets {
            store.upsert(snippet);
        }
        store
    }

    /// Insert or replace a snippet.
    ///
    /// A snippet re-inserted under another owner moves partitions.
    pub fn upsert(&self, snippet: CodeSnippet) {
        let mut tables = self.tables.write();

        let previous_owner = tables.owners.insert(snippet.id.clone(), snippet.owner_key.clone());
        if let Some(previous) = previous_owner.filter(|owner| *owner != snippet.owner_key) {
            let id = snippet.id.clone();
            tables.partition(&previous).send_if_modified(|partition| {
                Arc::make_mut(&mut partition.rows).remove(&id).is_some()
            });
        }

        let owner = snippet.owner_key.clone();
        tables.partition(&owner).send_if_modified(|partition| {
            if partition.rows.get(&snippet.id) == Some(&snippet) {
                return false;
            }
            Arc::make_mut(&mut partition.rows).insert(snippet);
            true
        });
    }

    /// Delete a snippet. Returns whether it existed.
    pub fn remove(&self, id: &SnippetId) -> bool {
        let mut tables = self.tables.write();
        let Some(owner) = tables.owners.remove(id) else {
            return false;
        };
        tables.partition(&owner).send_if_modified(|partition| {
            Arc::make_mut(&mut partition.rows).remove(id).is_some()
        })
    }

    /// Report `error` to current and future subscribers of `owner`'s snippets.
    pub fn fail(&self, owner: &ProfileKey, error: FetchError) {
        self.set_delivery(owner, Delivery::Failed(error));
    }

    /// Stop delivering `owner`'s snippets until [`Self::resume`].
    pub fn hold(&self, owner: &ProfileKey) {
        self.set_delivery(owner, Delivery::Held);
    }

    /// Resume normal delivery for `owner`.
    pub fn resume(&self, owner: &ProfileKey) {
        self.set_delivery(owner, Delivery::Live);
    }

    /// Every snippet of `owner`, public or not, ignoring delivery status.
    pub fn owned_by(&self, owner: &ProfileKey) -> SnippetSet {
        self.tables
            .read()
            .partitions
            .get(owner)
            .map(|tx| SnippetSet::clone(&tx.borrow().rows))
            .unwrap_or_default()
    }

    /// Number of live subscriptions to `owner`'s partition.
    pub fn subscriber_count(&self, owner: &ProfileKey) -> usize {
        self.tables
            .read()
            .partitions
            .get(owner)
            .map_or(0, watch::Sender::receiver_count)
    }

    /// Total number of subscriptions ever opened.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    fn set_delivery(&self, owner: &ProfileKey, delivery: Delivery) {
        let mut tables = self.tables.write();
        tables.partition(owner).send_if_modified(|partition| {
            if partition.delivery == delivery {
                return false;
            }
            partition.delivery = delivery;
            true
        });
    }
}

impl SnippetSource for MemorySnippetStore {
    fn subscribe_snippets(&self, query: &SnippetQuery) -> SnapshotStream<Vec<CodeSnippet>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let rx = self.tables.write().partition(&query.owner_key).subscribe();
        tracing::trace!(query = %query, "snippet subscription opened");

        let query = query.clone();
        WatchStream::new(rx)
            .filter_map(move |partition| {
                let delivered = partition.delivery.deliver(|| {
                    partition
                        .rows
                        .iter()
                        .filter(|snippet| query.matches(snippet))
                        .cloned()
                        .collect::<Vec<_>>()
                });
                future::ready(delivered)
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharuco_core::DataSource;
    use sharuco_testkit::fixtures::{key, SnippetBuilder};
    use std::collections::BTreeSet;
    use std::time::Duration;

    async fn next_ids(stream: &mut SnapshotStream<Vec<CodeSnippet>>) -> Result<BTreeSet<String>, FetchError> {
        let item = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("no snapshot delivered")
            .expect("stream ended");
        item.map(|rows| rows.into_iter().map(|s| s.id.to_string()).collect())
    }

    fn ids(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn delivers_only_public_snippets_of_owner() {
        let store = MemorySnippetStore::with_snippets([
            SnippetBuilder::new("a1", "alice").build(),
            SnippetBuilder::new("a2", "alice").private().build(),
            SnippetBuilder::new("b1", "bob").build(),
        ]);
        let mut stream = store.subscribe_snippets(&SnippetQuery::public_by(key("alice")));

        assert_eq!(next_ids(&mut stream).await, Ok(ids(&["a1"])));
        assert_eq!(store.owned_by(&key("alice")).len(), 2);
    }

    #[tokio::test]
    async fn owner_without_snippets_gets_empty_list() {
        let store = MemorySnippetStore::new();
        let mut stream = store.subscribe_snippets(&SnippetQuery::public_by(key("dave")));
        assert_eq!(next_ids(&mut stream).await, Ok(BTreeSet::new()));
    }

    #[tokio::test]
    async fn streams_inserts_and_removals() {
        let store = MemorySnippetStore::new();
        let mut stream = store.subscribe_snippets(&SnippetQuery::public_by(key("alice")));
        assert_eq!(next_ids(&mut stream).await, Ok(BTreeSet::new()));

        store.upsert(SnippetBuilder::new("a1", "alice").build());
        assert_eq!(next_ids(&mut stream).await, Ok(ids(&["a1"])));

        store.upsert(SnippetBuilder::new("a2", "alice").build());
        assert_eq!(next_ids(&mut stream).await, Ok(ids(&["a1", "a2"])));

        assert!(store.remove(&SnippetId::from("a1")));
        assert_eq!(next_ids(&mut stream).await, Ok(ids(&["a2"])));
        assert!(!store.remove(&SnippetId::from("a1")));
    }

    #[tokio::test]
    async fn changing_owner_moves_partition() {
        let store = MemorySnippetStore::with_snippets([SnippetBuilder::new("s1", "alice").build()]);
        let mut alice = store.subscribe_snippets(&SnippetQuery::public_by(key("alice")));
        assert_eq!(next_ids(&mut alice).await, Ok(ids(&["s1"])));

        store.upsert(SnippetBuilder::new("s1", "bob").build());
        assert_eq!(next_ids(&mut alice).await, Ok(BTreeSet::new()));
        assert_eq!(store.owned_by(&key("bob")).len(), 1);
    }

    #[tokio::test]
    async fn other_owners_do_not_wake_subscription() {
        let store = MemorySnippetStore::new();
        let mut stream = store.subscribe_snippets(&SnippetQuery::public_by(key("alice")));
        assert!(next_ids(&mut stream).await.is_ok());

        store.upsert(SnippetBuilder::new("b1", "bob").build());
        let woke = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
        assert!(woke.is_err());
    }

    #[tokio::test]
    async fn failure_and_release() {
        let store = MemorySnippetStore::new();
        let err = FetchError::transport(DataSource::Snippets, "socket closed");
        store.fail(&key("bob"), err.clone());

        let mut stream = store.subscribe_snippets(&SnippetQuery::public_by(key("bob")));
        assert_eq!(next_ids(&mut stream).await, Err(err));
        assert_eq!(store.subscriber_count(&key("bob")), 1);

        drop(stream);
        assert_eq!(store.subscriber_count(&key("bob")), 0);
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn idle_partitions_are_pruned() {
        let store = MemorySnippetStore::with_snippets([SnippetBuilder::new("a1", "alice").build()]);
        store.fail(&key("bob"), FetchError::backend(DataSource::Snippets, "down"));

        for i in 0..1000 {
            let query = SnippetQuery::public_by(key(&format!("ghost{i}")));
            drop(store.subscribe_snippets(&query));
        }
        assert_eq!(store.tables.read().partitions.len(), 3);

        assert!(store.remove(&SnippetId::from("a1")));
        drop(store.subscribe_snippets(&SnippetQuery::public_by(key("dave"))));
        let mut left: Vec<_> = store
            .tables
            .read()
            .partitions
            .keys()
            .map(ToString::to_string)
            .collect();
        left.sort();
        assert_eq!(left, ["bob", "dave"]);
    }
}
