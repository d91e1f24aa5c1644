//! Combined view state
//!
//! [`ViewState`] is the one value the renderer consumes. The page-level
//! variants are mutually exclusive; once a profile is shown, the snippet
//! section carries its own [`SnippetsState`].

use serde::Serialize;
use sharuco_core::{CodeSnippet, DataSource, FetchError, ProfileKey, UserProfile};

use super::header::{ProfileHeader, SnippetCard};
use crate::errors::{ErrorCategory, GENERIC_FAILURE};

/// Text shown under the header when the profile has no public snippets.
pub const EMPTY_SNIPPETS_PLACEHOLDER: &str = "This user has not shared any code yet";

/// State of the snippet section under a resolved profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnippetsState {
    /// Nested loading indicator
    Loading,
    /// Nested error indicator
    Error {
        /// The snippet fault
        error: FetchError,
    },
    /// "No snippets yet" placeholder
    Empty,
    /// At least one snippet, newest first
    Listed {
        /// Ordered snippets
        snippets: Vec<CodeSnippet>,
    },
}

impl SnippetsState {
    /// Whether the section is still waiting for its first value.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The ordered snippets; empty unless listed.
    pub fn snippets(&self) -> &[CodeSnippet] {
        match self {
            Self::Listed { snippets } => snippets,
            _ => &[],
        }
    }

    /// Card projections of the ordered snippets.
    pub fn cards(&self) -> Vec<SnippetCard> {
        self.snippets().iter().map(SnippetCard::from).collect()
    }

    /// Text shown in place of the list, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(EMPTY_SNIPPETS_PLACEHOLDER),
            Self::Error { .. } => Some(GENERIC_FAILURE),
            Self::Loading | Self::Listed { .. } => None,
        }
    }
}

/// Renderable decision produced from both loaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    /// The profile is unresolved
    Loading,
    /// The profile subscription failed; full-page error
    Error {
        /// The profile fault
        error: FetchError,
    },
    /// No key, or the key resolved to no record
    NotFound,
    /// The profile header plus the snippet section
    Ready {
        /// The resolved profile
        profile: UserProfile,
        /// The snippet section
        snippets: SnippetsState,
    },
}

impl ViewState {
    /// Header projection, when a profile is shown.
    pub fn header(&self) -> Option<ProfileHeader> {
        match self {
            Self::Ready { profile, .. } => Some(ProfileHeader::from(profile)),
            _ => None,
        }
    }

    /// Snippet section, when a profile is shown.
    pub fn snippets(&self) -> Option<&SnippetsState> {
        match self {
            Self::Ready { snippets, .. } => Some(snippets),
            _ => None,
        }
    }

    /// The fault being displayed, page-level or nested.
    pub fn failure(&self) -> Option<&FetchError> {
        match self {
            Self::Error { error }
            | Self::Ready {
                snippets: SnippetsState::Error { error },
                ..
            } => Some(error),
            _ => None,
        }
    }

    /// Which subscription the displayed fault came from.
    pub fn failed_source(&self) -> Option<DataSource> {
        self.failure().map(|error| error.origin)
    }

    /// Category of what could not be shown, if anything.
    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::NotFound => Some(ErrorCategory::NotFound),
            _ => self.failure().map(ErrorCategory::from),
        }
    }

    /// Text the page shows instead of content: the page-level message, or the
    /// snippet section's when a profile is shown.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Loading => None,
            Self::Ready { snippets, .. } => snippets.notice(),
            Self::Error { .. } | Self::NotFound => {
                self.error_category().map(|category| category.user_message())
            }
        }
    }

    /// Whether neither loader is still waiting for its first value.
    pub fn is_settled(&self) -> bool {
        match self {
            Self::Loading => false,
            Self::Ready { snippets, .. } => !snippets.is_loading(),
            Self::Error { .. } | Self::NotFound => true,
        }
    }

    /// Short name of the state, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error { .. } => "error",
            Self::NotFound => "not_found",
            Self::Ready { snippets, .. } => match snippets {
                SnippetsState::Loading => "ready/loading",
                SnippetsState::Error { .. } => "ready/error",
                SnippetsState::Empty => "ready/empty",
                SnippetsState::Listed { .. } => "ready/listed",
            },
        }
    }
}

/// A published view state, tagged with the navigation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUpdate {
    /// Incremented on every open; 0 before the first
    pub epoch: u64,
    /// Key of the navigation, `None` when absent or blank
    pub key: Option<ProfileKey>,
    /// The combined state
    pub state: ViewState,
}

impl ViewUpdate {
    /// State before any key has been opened.
    pub fn initial() -> Self {
        Self {
            epoch: 0,
            key: None,
            state: ViewState::Loading,
        }
    }
}
