//! Subscription scope
//!
//! Owns the tasks of one navigation. Closing the scope signals shutdown,
//! aborts every task and waits until each has dropped its subscriptions.
//! Dropping the scope signals and aborts without waiting.

use parking_lot::Mutex;
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Tasks spawned for one navigation.
///
/// [`SubscriptionScope::close`] awaits every aborted handle instead of only
/// aborting it: the next navigation must not subscribe while the previous
/// one's streams are still held by a task that has not yet unwound.
#[derive(Debug)]
pub(crate) struct SubscriptionScope {
    shutdown_tx: watch::Sender<bool>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl SubscriptionScope {
    pub(crate) fn new() -> Self {
        let (shutdown_tx, _shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Run `fut` until it completes or the scope shuts down.
    pub(crate) fn spawn_cancellable<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = shutdown_rx.changed() => {}
                _ = fut => {}
            }
        });
        self.handles.lock().push(handle);
    }

    /// Number of tasks that have not finished.
    pub(crate) fn live_tasks(&self) -> usize {
        self.handles
            .lock()
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Shut down and wait for every task to release what it holds.
    pub(crate) async fn close(self) {
        self.shutdown_tx.send_replace(true);
        let handles = std::mem::take(&mut *self.handles.lock());
        for handle in handles {
            handle.abort();
            if let Err(error) = handle.await {
                if !error.is_cancelled() {
                    tracing::warn!(error = %error, "subscription task failed");
                }
            }
        }
    }

    fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.shutdown();
    }
}
