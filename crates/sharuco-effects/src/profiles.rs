//! In-memory profile store

use futures::{future, StreamExt};
use parking_lot::RwLock;
use sharuco_core::{FetchError, ProfileKey, ProfileSource, SnapshotStream, UserProfile};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::slot::Delivery;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileSlot {
    delivery: Delivery,
    record: Option<UserProfile>,
}

impl Default for ProfileSlot {
    fn default() -> Self {
        Self {
            delivery: Delivery::Live,
            record: None,
        }
    }
}

/// Profile records held in memory, one watch channel per key.
///
/// Channels are created on first use, so subscribing to an unknown key
/// immediately delivers `Ok(None)`. Idle channels are pruned whenever a new
/// one is created.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    slots: RwLock<HashMap<ProfileKey, watch::Sender<ProfileSlot>>>,
    lookups: AtomicU64,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `profiles`.
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let store = Self::new();
        for profile in profiles {
            store.upsert(profile);
        }
        store
    }

    /// Insert or replace a profile record.
    pub fn upsert(&self, profile: UserProfile) {
        let key = profile.key.clone();
        self.modify(&key, |slot| {
            if slot.record.as_ref() == Some(&profile) {
                return false;
            }
            slot.record = Some(profile);
            true
        });
    }

    /// Delete the record at `key`; subscribers then observe `Ok(None)`.
    pub fn remove(&self, key: &ProfileKey) {
        self.modify(key, |slot| slot.record.take().is_some());
    }

    /// Report `error` to current and future subscribers of `key`.
    pub fn fail(&self, key: &ProfileKey, error: FetchError) {
        self.set_delivery(key, Delivery::Failed(error));
    }

    /// Stop delivering values for `key` until [`Self::resume`].
    pub fn hold(&self, key: &ProfileKey) {
        self.set_delivery(key, Delivery::Held);
    }

    /// Resume normal delivery for `key`.
    pub fn resume(&self, key: &ProfileKey) {
        self.set_delivery(key, Delivery::Live);
    }

    /// Current record at `key`, ignoring delivery status.
    pub fn get(&self, key: &ProfileKey) -> Option<UserProfile> {
        self.slots
            .read()
            .get(key)
            .and_then(|tx| tx.borrow().record.clone())
    }

    /// Number of live subscriptions to `key`.
    pub fn subscriber_count(&self, key: &ProfileKey) -> usize {
        self.slots
            .read()
            .get(key)
            .map_or(0, watch::Sender::receiver_count)
    }

    /// Total number of subscriptions ever opened.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    fn set_delivery(&self, key: &ProfileKey, delivery: Delivery) {
        self.modify(key, |slot| {
            if slot.delivery == delivery {
                return false;
            }
            slot.delivery = delivery;
            true
        });
    }

    /// Apply `f` to the slot at `key`, notifying subscribers if it reports a change.
    fn modify(&self, key: &ProfileKey, f: impl FnOnce(&mut ProfileSlot) -> bool) {
        self.with_sender(key, |tx| {
            tx.send_if_modified(f);
        });
    }

    fn with_sender<R>(
        &self,
        key: &ProfileKey,
        f: impl FnOnce(&watch::Sender<ProfileSlot>) -> R,
    ) -> R {
        {
            let slots = self.slots.read();
            if let Some(tx) = slots.get(key) {
                return f(tx);
            }
        }
        let mut slots = self.slots.write();
        prune_idle(&mut slots);
        let tx = slots
            .entry(key.clone())
            .or_insert_with(|| watch::channel(ProfileSlot::default()).0);
        f(tx)
    }
}

/// Drop channels nobody watches that hold no record and no delivery override.
fn prune_idle(slots: &mut HashMap<ProfileKey, watch::Sender<ProfileSlot>>) {
    slots.retain(|_, tx| tx.receiver_count() > 0 || *tx.borrow() != ProfileSlot::default());
}

impl ProfileSource for MemoryProfileStore {
    fn subscribe_profile(&self, key: &ProfileKey) -> SnapshotStream<Option<UserProfile>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let rx = self.with_sender(key, watch::Sender::subscribe);
        tracing::trace!(key = %key, "profile subscription opened");

        WatchStream::new(rx)
            .filter_map(|slot| future::ready(slot.delivery.deliver(|| slot.record.clone())))
            .boxed()
    }
}
