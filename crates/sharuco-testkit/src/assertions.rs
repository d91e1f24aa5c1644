//! Async assertions over reactive state

use std::time::Duration;
use tokio::sync::watch;

/// Default deadline for [`wait_for`].
pub const WAIT_DEADLINE: Duration = Duration::from_secs(2);

/// Wait until the watched value satisfies `predicate` and return a copy.
///
/// Panics with the last observed value if the deadline passes or the sender
/// is dropped first.
pub async fn wait_for<T, F>(rx: &mut watch::Receiver<T>, mut predicate: F) -> T
where
    T: Clone + std::fmt::Debug,
    F: FnMut(&T) -> bool,
{
    // The guard from `wait_for` must be gone before `rx` is borrowed again.
    let failure = match tokio::time::timeout(WAIT_DEADLINE, rx.wait_for(|value| predicate(value)))
        .await
    {
        Ok(Ok(value)) => return value.clone(),
        Ok(Err(_)) => "sender dropped",
        Err(_) => "timed out waiting",
    };
    panic!("{failure}; last value: {:?}", *rx.borrow());
}
