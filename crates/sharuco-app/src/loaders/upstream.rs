//! Upstream subscription adapter
//!
//! Wraps a data-layer [`SnapshotStream`] with the rules both loaders share:
//! - the subscription is opened on first poll, not on construction
//! - a missing first value within the configured window is a `TimedOut` fault
//! - an upstream that ends before its first value is a `Closed` fault
//! - a fault is terminal and is attributed to the loader's own source
//! - an upstream that ends after delivering leaves the last value standing

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use sharuco_core::{DataSource, FetchError, SnapshotStream};
use std::time::Duration;

type Opener<T> = Box<dyn FnOnce() -> SnapshotStream<T> + Send>;

enum Phase<T> {
    Unopened(Opener<T>),
    Live {
        upstream: SnapshotStream<T>,
        delivered: bool,
    },
    Finished,
}

/// Results of the subscription created by `open`, under the shared rules.
pub(crate) fn live_results<T, F>(
    origin: DataSource,
    first_timeout: Option<Duration>,
    open: F,
) -> BoxStream<'static, Result<T, FetchError>>
where
    T: Send + 'static,
    F: FnOnce() -> SnapshotStream<T> + Send + 'static,
{
    let opener: Opener<T> = Box::new(open);
    stream::unfold(Phase::Unopened(opener), move |phase| async move {
        let (mut upstream, delivered) = match phase {
            Phase::Unopened(open) => {
                tracing::debug!(source = %origin, "opening subscription");
                (open(), false)
            }
            Phase::Live {
                upstream,
                delivered,
            } => (upstream, delivered),
            Phase::Finished => return None,
        };

        let next = match first_timeout.filter(|_| !delivered) {
            Some(limit) => match tokio::time::timeout(limit, upstream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    return Some((Err(FetchError::timed_out(origin, limit)), Phase::Finished));
                }
            },
            None => upstream.next().await,
        };

        match next {
            Some(Ok(value)) => Some((
                Ok(value),
                Phase::Live {
                    upstream,
                    delivered: true,
                },
            )),
            Some(Err(error)) => Some((Err(error.with_origin(origin)), Phase::Finished)),
            None if delivered => {
                tracing::trace!(source = %origin, "upstream ended");
                None
            }
            None => Some((Err(FetchError::closed(origin)), Phase::Finished)),
        }
    })
    .boxed()
}
