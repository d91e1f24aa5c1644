//! Identifier types for profiles and snippets
//!
//! Both identifiers are opaque strings issued by the backing store. A profile
//! key is the only input the view receives from navigation, so it is also the
//! place where blank input is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::SharucoError;

/// Key of a user profile record.
///
/// Never blank: construction goes through [`ProfileKey::parse`] or
/// [`ProfileKey::from_route`], which reject empty and whitespace-only input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileKey(String);

impl ProfileKey {
    /// Parse a key, returning `None` when the input is blank.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Resolve the key carried by a navigation parameter.
    ///
    /// An absent parameter and a blank parameter both resolve to `None`.
    pub fn from_route(param: Option<&str>) -> Option<Self> {
        param.and_then(Self::parse)
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProfileKey {
    type Error = SharucoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            Err(SharucoError::invalid("profile key must not be blank"))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<ProfileKey> for String {
    fn from(key: ProfileKey) -> Self {
        key.0
    }
}

/// Identifier of a code snippet.
///
/// Ordered lexically; the ordering adapter uses it as the tie-break key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(String);

impl SnippetId {
    /// Wrap a raw snippet id.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnippetId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
