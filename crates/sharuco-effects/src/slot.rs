//! Delivery status shared by both stores.

use sharuco_core::FetchError;

/// Whether a partition currently delivers values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Delivery {
    /// Values are delivered as they change
    Live,
    /// Subscribers see nothing until the partition resumes
    Held,
    /// Subscribers receive this fault
    Failed(FetchError),
}

impl Delivery {
    /// Resolve what a subscriber observes for `value` under this status.
    ///
    /// `None` means nothing is delivered yet.
    pub(crate) fn deliver<T>(&self, value: impl FnOnce() -> T) -> Option<Result<T, FetchError>> {
        match self {
            Self::Live => Some(Ok(value())),
            Self::Held => None,
            Self::Failed(err) => Some(Err(err.clone())),
        }
    }
}
