//! Sharuco App - Public Profile View
//!
//! Headless core of the public profile page: the identity summary of one
//! user plus a live list of that user's public snippets.
//!
//! # Layout
//!
//! ## Loaders
//! - [`ProfileLoader`]: one profile record by key
//! - [`SnippetLoader`]: the public snippets of one owner
//!
//! ## Views
//! - [`combine`] / [`ViewCombinator`]: the precedence rules that merge both
//!   loaders into one [`ViewState`]
//! - [`order_snippets`]: newest-first presentation order
//! - [`ProfileHeader`], [`SnippetCard`]: render projections
//!
//! ## Runtime
//! - [`ProfileView`]: owns the subscriptions of the current key and publishes
//!   epoch-tagged [`ViewUpdate`]s on a watch channel
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut view = ProfileView::new(profiles, snippets, &ProfileViewConfig::default());
//! let mut updates = view.subscribe();
//! view.open(Some("alice")).await;
//! while updates.changed().await.is_ok() {
//!     render(&updates.borrow().state);
//! }
//! ```

#![forbid(unsafe_code)]

/// View configuration
pub mod config;

/// Failure categories for rendering
pub mod errors;

/// Live profile and snippet loaders
pub mod loaders;

/// View runtime
pub mod runtime;

/// View state, combinator, ordering and projections
pub mod views;

pub use config::ProfileViewConfig;
pub use errors::ErrorCategory;
pub use loaders::{ProfileLoader, ProfileSnapshot, SnippetLoader, SnippetSnapshot};
pub use runtime::ProfileView;
pub use views::{
    combine, order_snippets, LoaderUpdate, ProfileHeader, SnippetCard, SnippetsState,
    ViewCombinator, ViewState, ViewUpdate,
};
