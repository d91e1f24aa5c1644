//! Sharuco Testing Infrastructure
//!
//! Common fixtures for the Sharuco test suites: record builders with
//! day-granular timestamps, proptest strategies for snippet collections, and
//! helpers for awaiting reactive state.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! sharuco-testkit = { path = "../sharuco-testkit" }
//! ```
//!
//! ```rust,no_run
//! use sharuco_testkit::fixtures::{day, ProfileBuilder, SnippetBuilder};
//!
//! let alice = ProfileBuilder::new("alice").certified().build();
//! let snippet = SnippetBuilder::new("s1", "alice").created_at(day(3)).build();
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod assertions;
pub mod fixtures;
pub mod strategies;

pub use assertions::wait_for;
pub use fixtures::{day, key, ProfileBuilder, SnippetBuilder};
