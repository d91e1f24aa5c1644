//! Categorized view failures
//!
//! The rendering layer never shows raw fetch messages. It asks the view state
//! for its [`ErrorCategory`] and picks the copy to display from that.

use sharuco_core::{FetchError, FetchFailure};
use std::fmt;

/// Text shown for any failure that is a fault.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// High-level classification of what the view could not show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The requested profile does not exist (expected, not a fault)
    NotFound,
    /// Transport failures, closed subscriptions and timeouts
    Network,
    /// The backend rejected or failed the read
    Operation,
}

impl ErrorCategory {
    /// Whether this category is a fault that should be logged.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "Not Found",
            Self::Network => "Network",
            Self::Operation => "Operation",
        }
    }

    /// Text the renderer shows for this category.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "User not found",
            Self::Network | Self::Operation => GENERIC_FAILURE,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&FetchError> for ErrorCategory {
    fn from(error: &FetchError) -> Self {
        match error.kind {
            FetchFailure::Backend => Self::Operation,
            FetchFailure::Transport | FetchFailure::Closed | FetchFailure::TimedOut => {
                Self::Network
            }
        }
    }
}
