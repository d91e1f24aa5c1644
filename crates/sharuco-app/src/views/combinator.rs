//! View state combinator
//!
//! Re-evaluates the full decision on every update from either loader, in
//! strict precedence:
//! 1. profile loading -> [`ViewState::Loading`]
//! 2. profile failed -> [`ViewState::Error`]
//! 3. no key or no record -> [`ViewState::NotFound`]
//! 4. profile found -> [`ViewState::Ready`] with the snippet section decided
//!    on its own: loading, error, empty or listed newest first
//!
//! The snippet snapshot is not looked at until step 4.

use crate::loaders::{ProfileSnapshot, SnippetSnapshot};

use super::ordering::order_snippets;
use super::state::{SnippetsState, ViewState};

/// Decide the view state from the latest snapshot of each loader.
pub fn combine(profile: &ProfileSnapshot, snippets: &SnippetSnapshot) -> ViewState {
    match profile {
        ProfileSnapshot::Loading => ViewState::Loading,
        ProfileSnapshot::Failed(error) => ViewState::Error {
            error: error.clone(),
        },
        ProfileSnapshot::NoKey | ProfileSnapshot::Missing => ViewState::NotFound,
        ProfileSnapshot::Found(record) => ViewState::Ready {
            profile: record.clone(),
            snippets: snippet_section(snippets),
        },
    }
}

fn snippet_section(snippets: &SnippetSnapshot) -> SnippetsState {
    match snippets {
        SnippetSnapshot::Loading => SnippetsState::Loading,
        SnippetSnapshot::Failed(error) => SnippetsState::Error {
            error: error.clone(),
        },
        SnippetSnapshot::Loaded(records) if records.is_empty() => SnippetsState::Empty,
        SnippetSnapshot::Loaded(records) => SnippetsState::Listed {
            snippets: order_snippets(records),
        },
    }
}

/// An update from one of the two loaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderUpdate {
    /// New profile snapshot
    Profile(ProfileSnapshot),
    /// New snippet snapshot
    Snippets(SnippetSnapshot),
}

/// Holds the latest snapshot of each loader and recombines on every update.
///
/// A later snapshot from a loader always replaces the earlier one.
#[derive(Debug, Clone)]
pub struct ViewCombinator {
    profile: ProfileSnapshot,
    snippets: SnippetSnapshot,
}

impl Default for ViewCombinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCombinator {
    /// Both loaders loading.
    pub fn new() -> Self {
        Self {
            profile: ProfileSnapshot::Loading,
            snippets: SnippetSnapshot::Loading,
        }
    }

    /// Record `update` and return the recombined state.
    pub fn apply(&mut self, update: LoaderUpdate) -> ViewState {
        match update {
            LoaderUpdate::Profile(snapshot) => self.profile = snapshot,
            LoaderUpdate::Snippets(snapshot) => self.snippets = snapshot,
        }
        self.state()
    }

    /// The current combined state.
    pub fn state(&self) -> ViewState {
        combine(&self.profile, &self.snippets)
    }
}
