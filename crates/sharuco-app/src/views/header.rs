//! Render projections
//!
//! What the renderer needs from each record, in the shape it consumes.
//! Date formatting and syntax highlighting stay with the renderer.

use serde::Serialize;
use sharuco_core::{CodeSnippet, ProfileKey, SnippetId, Timestamp, UserProfile};

/// Identity summary shown at the top of a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileHeader {
    /// Profile key
    pub key: ProfileKey,
    /// Name shown as the page title
    pub display_name: String,
    /// Avatar image, when the user has one
    pub avatar_url: Option<String>,
    /// Shown in place of the avatar image when it is missing or fails to load
    pub avatar_fallback: String,
    /// Whether to show the certified badge
    pub is_certified: bool,
    /// "Joined" date
    pub joined_at: Timestamp,
    /// "Last seen" date
    pub last_seen_at: Timestamp,
}

impl From<&UserProfile> for ProfileHeader {
    fn from(profile: &UserProfile) -> Self {
        Self {
            key: profile.key.clone(),
            display_name: profile.display_name.clone(),
            avatar_url: profile.avatar_url.clone(),
            avatar_fallback: profile.display_name.clone(),
            is_certified: profile.is_certified,
            joined_at: profile.created_at,
            last_seen_at: profile.last_login_at,
        }
    }
}

/// One snippet card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetCard {
    /// Snippet id
    pub id: SnippetId,
    /// Owner of the snippet
    pub author_key: ProfileKey,
    /// Highlighting language tag
    pub language: String,
    /// Raw source text
    pub code: String,
    /// Free-form description
    pub description: String,
    /// Tags in lexical order
    pub tags: Vec<String>,
    /// Identities that favorited the snippet, in lexical order
    pub favorite_keys: Vec<String>,
    /// Number of favorites
    pub favorite_count: usize,
    /// Creation time
    pub created_at: Timestamp,
}

impl From<&CodeSnippet> for SnippetCard {
    fn from(snippet: &CodeSnippet) -> Self {
        Self {
            id: snippet.id.clone(),
            author_key: snippet.owner_key.clone(),
            language: snippet.language.clone(),
            code: snippet.code.clone(),
            description: snippet.description.clone(),
            tags: snippet.tags.iter().cloned().collect(),
            favorite_keys: snippet.favorite_keys.iter().cloned().collect(),
            favorite_count: snippet.favorite_keys.len(),
            created_at: snippet.created_at,
        }
    }
}
