//! Sharuco Core - Profile and Snippet Foundation
//!
//! This crate holds the records, identifiers and interfaces shared by every
//! other Sharuco crate. It has no runtime and no storage of its own.
//!
//! # Layout
//!
//! ## Records
//! - [`UserProfile`]: the identity summary shown at the top of a profile page
//! - [`CodeSnippet`]: one shared snippet, with tags and favorites
//! - [`SnippetSet`]: an id-keyed set of snippets, compared as a value
//!
//! ## Queries
//! - [`SnippetQuery`]: the owner/visibility predicate handed to the data layer
//!
//! ## Data-Layer Interfaces
//! - [`ProfileSource`]: live subscription to one profile record
//! - [`SnippetSource`]: live subscription to the snippets matching a query
//!
//! Both return a [`SnapshotStream`], a boxed stream of upstream results.
//! Dropping the stream releases the subscription.

#![forbid(unsafe_code)]

/// Configuration loading and validation traits
pub mod config;

/// Profile and snippet records
pub mod domain;

/// Live data-layer interfaces
pub mod effects;

/// Unified error handling
pub mod errors;

/// Profile and snippet identifiers
pub mod identifiers;

/// Snippet query predicate
pub mod query;

pub use config::SharucoConfig;
pub use domain::{CodeSnippet, SnippetSet, UserProfile};
pub use effects::{ProfileSource, SnapshotStream, SnippetSource};
pub use errors::{DataSource, FetchError, FetchFailure, SharucoError};
pub use identifiers::{ProfileKey, SnippetId};
pub use query::SnippetQuery;

/// Timestamp type used by every record.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Standard result type for Sharuco operations.
pub type SharucoResult<T> = Result<T, SharucoError>;
