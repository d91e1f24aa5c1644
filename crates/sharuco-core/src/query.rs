//! # Snippet Query Predicate
//!
//! The snippet collection is read through an explicit predicate value rather
//! than a storage-specific query string. Data-layer handlers translate it into
//! whatever their backend understands; in-memory handlers evaluate
//! [`SnippetQuery::matches`] directly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::CodeSnippet;
use crate::identifiers::ProfileKey;

/// Visibility constraint of a snippet query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only snippets with `is_public == true`
    PublicOnly,
    /// Any snippet regardless of its flag
    Any,
}

/// Predicate selecting the snippets of one owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetQuery {
    /// Required owner key
    pub owner_key: ProfileKey,
    /// Required visibility
    pub visibility: Visibility,
}

impl SnippetQuery {
    /// The public snippets of `owner`.
    pub fn public_by(owner: ProfileKey) -> Self {
        Self {
            owner_key: owner,
            visibility: Visibility::PublicOnly,
        }
    }

    /// Whether `snippet` satisfies the predicate.
    pub fn matches(&self, snippet: &CodeSnippet) -> bool {
        snippet.owner_key == self.owner_key
            && match self.visibility {
                Visibility::PublicOnly => snippet.is_public,
                Visibility::Any => true,
            }
    }
}

impl fmt::Display for SnippetQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ownerKey == {:?}", self.owner_key.as_str())?;
        if self.visibility == Visibility::PublicOnly {
            write!(f, " && isPublic == true")?;
        }
        Ok(())
    }
}
