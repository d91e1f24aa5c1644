//! # Profile View
//!
//! Drives one public profile page. [`ProfileView::open`] starts both loaders
//! for a key and spawns a driver task that recombines their snapshots and
//! publishes the result on a watch channel.
//!
//! A profile error is final for the navigation: the driver stops and releases
//! the snippet subscription as soon as it is published.
//!
//! Opening another key first cancels the previous key's subscriptions and
//! waits for them to be released. The output then resets to
//! [`ViewState::Loading`] under a new epoch, so nothing from the previous key
//! is ever shown next to the new profile.

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use sharuco_core::{ProfileKey, ProfileSource, SnippetSource};
use std::sync::Arc;
use tokio::sync::watch;

use super::scope::SubscriptionScope;
use crate::config::ProfileViewConfig;
use crate::loaders::{ProfileLoader, ProfileSnapshot, SnippetLoader, SnippetSnapshot};
use crate::views::{LoaderUpdate, ViewCombinator, ViewState, ViewUpdate};

/// Live public profile view.
///
/// Must be opened from within a tokio runtime.
pub struct ProfileView {
    profiles: ProfileLoader,
    snippets: SnippetLoader,
    output: Arc<watch::Sender<ViewUpdate>>,
    scope: Option<SubscriptionScope>,
    epoch: u64,
}

impl ProfileView {
    /// Create a closed view over the two data-layer sources.
    pub fn new(
        profiles: Arc<dyn ProfileSource>,
        snippets: Arc<dyn SnippetSource>,
        config: &ProfileViewConfig,
    ) -> Self {
        let limit = config.first_snapshot_timeout();
        let (output, _) = watch::channel(ViewUpdate::initial());
        Self {
            profiles: ProfileLoader::new(profiles).with_first_snapshot_timeout(limit),
            snippets: SnippetLoader::new(snippets).with_first_snapshot_timeout(limit),
            output: Arc::new(output),
            scope: None,
            epoch: 0,
        }
    }

    /// Receive every published update.
    pub fn subscribe(&self) -> watch::Receiver<ViewUpdate> {
        self.output.subscribe()
    }

    /// The latest published update.
    pub fn current(&self) -> ViewUpdate {
        self.output.borrow().clone()
    }

    /// Epoch of the latest open; 0 if never opened.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether subscriptions for the current key are still running.
    pub fn is_open(&self) -> bool {
        self.scope
            .as_ref()
            .is_some_and(|scope| scope.live_tasks() > 0)
    }

    /// Open the view for the key carried by a navigation parameter.
    ///
    /// An absent or blank parameter resolves to [`ViewState::NotFound`]
    /// without any lookup. Returns the epoch of the new navigation.
    pub async fn open(&mut self, route_param: Option<&str>) -> u64 {
        self.release().await;

        self.epoch += 1;
        let epoch = self.epoch;
        let key = ProfileKey::from_route(route_param);
        self.output.send_replace(ViewUpdate {
            epoch,
            key: key.clone(),
            state: ViewState::Loading,
        });

        let profile = self.profiles.load(key.clone());
        let snippets = match &key {
            Some(owner) => self.snippets.load(owner.clone()),
            None => stream::empty().boxed(),
        };
        tracing::debug!(epoch, key = ?key.as_ref().map(ProfileKey::as_str), "opening profile view");

        let scope = SubscriptionScope::new();
        scope.spawn_cancellable(drive(epoch, profile, snippets, Arc::clone(&self.output)));
        self.scope = Some(scope);
        epoch
    }

    /// Cancel the current subscriptions and wait for their release.
    ///
    /// The last published update stays in place.
    pub async fn close(&mut self) {
        self.release().await;
    }

    async fn release(&mut self) {
        if let Some(scope) = self.scope.take() {
            tracing::debug!(epoch = self.epoch, "releasing profile view subscriptions");
            scope.close().await;
        }
    }
}

impl std::fmt::Debug for ProfileView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileView")
            .field("epoch", &self.epoch)
            .field("open", &self.scope.is_some())
            .finish_non_exhaustive()
    }
}

async fn drive(
    epoch: u64,
    profile: BoxStream<'static, ProfileSnapshot>,
    snippets: BoxStream<'static, SnippetSnapshot>,
    output: Arc<watch::Sender<ViewUpdate>>,
) {
    let mut combinator = ViewCombinator::new();
    let mut updates = stream::select(
        profile.map(LoaderUpdate::Profile),
        snippets.map(LoaderUpdate::Snippets),
    );

    while let Some(update) = updates.next().await {
        let state = combinator.apply(update);
        let terminal = matches!(state, ViewState::Error { .. });
        publish(&output, epoch, state);
        if terminal {
            // Nothing can replace a page-level error; drop the snippet subscription.
            tracing::debug!(epoch, "profile failed, releasing loaders");
            return;
        }
    }
    tracing::trace!(epoch, "profile view loaders finished");
}

/// Replace the published state if it belongs to `epoch` and differs.
fn publish(output: &watch::Sender<ViewUpdate>, epoch: u64, state: ViewState) -> bool {
    let label = state.label();
    let changed = output.send_if_modified(|current| {
        if current.epoch != epoch || current.state == state {
            return false;
        }
        current.state = state;
        true
    });
    if changed {
        tracing::debug!(epoch, state = label, "profile view updated");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharuco_testkit::ProfileBuilder;

    #[test]
    fn publish_ignores_stale_epochs_and_repeats() {
        let (tx, rx) = watch::channel(ViewUpdate {
            epoch: 2,
            key: None,
            state: ViewState::Loading,
        });

        assert!(!publish(&tx, 1, ViewState::NotFound));
        assert!(!publish(&tx, 2, ViewState::Loading));
        assert!(publish(&tx, 2, ViewState::NotFound));
        assert_eq!(rx.borrow().state, ViewState::NotFound);
    }

    #[test]
    fn publish_replaces_ready_state() {
        let (tx, rx) = watch::channel(ViewUpdate::initial());
        let ready = ViewState::Ready {
            profile: ProfileBuilder::new("alice").build(),
            snippets: crate::views::SnippetsState::Empty,
        };

        assert!(publish(&tx, 0, ready.clone()));
        assert_eq!(rx.borrow().state, ready);
    }
}
