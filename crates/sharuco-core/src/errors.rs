//! Unified error system for Sharuco
//!
//! [`SharucoError`] is the one error type returned by fallible operations.
//! [`FetchError`] is the fault a live subscription reports; it always names
//! the [`DataSource`] it came from so a profile failure can never be mistaken
//! for a snippet failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unified error type for all Sharuco operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SharucoError {
    /// Invalid input
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// A live subscription failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl SharucoError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Which live subscription produced a value or a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// The single profile record
    Profile,
    /// The public snippet collection
    Snippets,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profile => write!(f, "profile"),
            Self::Snippets => write!(f, "snippets"),
        }
    }
}

/// Why a subscription failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailure {
    /// The backend rejected or failed the read
    Backend,
    /// The connection to the backend failed
    Transport,
    /// The subscription ended before producing any value
    Closed,
    /// No first value arrived within the configured window
    TimedOut,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "backend error"),
            Self::Transport => write!(f, "transport error"),
            Self::Closed => write!(f, "subscription closed"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// A fault reported by one live subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{origin} fetch failed ({kind}): {message}")]
pub struct FetchError {
    /// Subscription that failed
    pub origin: DataSource,
    /// Failure kind
    pub kind: FetchFailure,
    /// Detail from the data layer
    pub message: String,
}

impl FetchError {
    /// Create a fetch error of the given kind.
    pub fn new(origin: DataSource, kind: FetchFailure, message: impl Into<String>) -> Self {
        Self {
            origin,
            kind,
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(origin: DataSource, message: impl Into<String>) -> Self {
        Self::new(origin, FetchFailure::Backend, message)
    }

    /// Create a transport error
    pub fn transport(origin: DataSource, message: impl Into<String>) -> Self {
        Self::new(origin, FetchFailure::Transport, message)
    }

    /// The upstream ended before its first value.
    pub fn closed(origin: DataSource) -> Self {
        Self::new(
            origin,
            FetchFailure::Closed,
            "subscription ended before the first snapshot",
        )
    }

    /// No first value arrived within `limit`.
    pub fn timed_out(origin: DataSource, limit: Duration) -> Self {
        Self::new(
            origin,
            FetchFailure::TimedOut,
            format!("no snapshot within {}ms", limit.as_millis()),
        )
    }

    /// Re-attribute the error to another source.
    ///
    /// Data-layer handlers do not always know which loader they serve; the
    /// loader stamps its own source on every fault it forwards.
    pub fn with_origin(mut self, origin: DataSource) -> Self {
        self.origin = origin;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_its_source() {
        let err = FetchError::backend(DataSource::Snippets, "quota exceeded");
        assert_eq!(
            err.to_string(),
            "snippets fetch failed (backend error): quota exceeded"
        );
    }

    #[test]
    fn fetch_error_converts_into_unified_error() {
        let err: SharucoError = FetchError::closed(DataSource::Profile).into();
        assert!(matches!(
            err,
            SharucoError::Fetch(FetchError {
                origin: DataSource::Profile,
                kind: FetchFailure::Closed,
                ..
            })
        ));
    }

    #[test]
    fn timed_out_reports_window() {
        let err = FetchError::timed_out(DataSource::Profile, Duration::from_millis(250));
        assert_eq!(err.kind, FetchFailure::TimedOut);
        assert!(err.message.contains("250ms"));
    }

    #[test]
    fn with_origin_restamps() {
        let err = FetchError::transport(DataSource::Profile, "reset").with_origin(DataSource::Snippets);
        assert_eq!(err.origin, DataSource::Snippets);
        assert_eq!(err.kind, FetchFailure::Transport);
    }
}
