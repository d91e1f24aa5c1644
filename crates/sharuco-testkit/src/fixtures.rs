//! Record builders
//!
//! Timestamps are expressed as days of January 2024 so scenarios read the
//! way they are described ("created Jan 3").

use chrono::{Duration, TimeZone, Utc};
use sharuco_core::{CodeSnippet, ProfileKey, SnippetId, Timestamp, UserProfile};
use std::collections::BTreeSet;

/// Midnight UTC on the given day of January 2024.
///
/// Days past 31 roll into February and beyond.
pub fn day(n: u32) -> Timestamp {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    base + Duration::days(i64::from(n) - 1)
}

/// Parse a profile key, panicking on blank input.
pub fn key(raw: &str) -> ProfileKey {
    ProfileKey::parse(raw).expect("fixture keys are never blank")
}

/// Builder for [`UserProfile`] fixtures.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    profile: UserProfile,
}

impl ProfileBuilder {
    /// A profile named after its key, joined Jan 1 and last seen Jan 10.
    pub fn new(raw_key: &str) -> Self {
        Self {
            profile: UserProfile {
                key: key(raw_key),
                display_name: raw_key.to_string(),
                avatar_url: None,
                is_certified: false,
                created_at: day(1),
                last_login_at: day(10),
            },
        }
    }

    /// Set the display name.
    pub fn display_name(mut self, name: &str) -> Self {
        self.profile.display_name = name.to_string();
        self
    }

    /// Set the avatar URL.
    pub fn avatar(mut self, url: &str) -> Self {
        self.profile.avatar_url = Some(url.to_string());
        self
    }

    /// Mark the profile as certified.
    pub fn certified(mut self) -> Self {
        self.profile.is_certified = true;
        self
    }

    /// Set the join and last-login timestamps.
    pub fn joined(mut self, created_at: Timestamp, last_login_at: Timestamp) -> Self {
        self.profile.created_at = created_at;
        self.profile.last_login_at = last_login_at;
        self
    }

    /// Finish the profile.
    pub fn build(self) -> UserProfile {
        self.profile
    }
}

/// Builder for [`CodeSnippet`] fixtures.
#[derive(Debug, Clone)]
pub struct SnippetBuilder {
    snippet: CodeSnippet,
}

impl SnippetBuilder {
    /// A public Rust snippet owned by `owner`, created Jan 1.
    pub fn new(id: &str, owner: &str) -> Self {
        Self {
            snippet: CodeSnippet {
                id: SnippetId::from(id),
                owner_key: key(owner),
                language: "rust".to_string(),
                code: format!("fn {}() {{}}", id.replace('-', "_")),
                description: format!("snippet {id}"),
                tags: BTreeSet::new(),
                favorite_keys: BTreeSet::new(),
                is_public: true,
                created_at: day(1),
            },
        }
    }

    /// Set the creation time.
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.snippet.created_at = at;
        self
    }

    /// Set the language tag.
    pub fn language(mut self, language: &str) -> Self {
        self.snippet.language = language.to_string();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.snippet.description = description.to_string();
        self
    }

    /// Add tags.
    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.snippet.tags.extend(tags.iter().map(|t| (*t).to_string()));
        self
    }

    /// Add identities that favorited the snippet.
    pub fn favorited_by(mut self, keys: &[&str]) -> Self {
        self.snippet
            .favorite_keys
            .extend(keys.iter().map(|k| (*k).to_string()));
        self
    }

    /// Make the snippet private.
    pub fn private(mut self) -> Self {
        self.snippet.is_public = false;
        self
    }

    /// Finish the snippet.
    pub fn build(self) -> CodeSnippet {
        self.snippet
    }
}
