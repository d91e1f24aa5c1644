//! Code snippet record and the id-keyed snippet set

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};

use crate::identifiers::{ProfileKey, SnippetId};
use crate::Timestamp;

/// A shared code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    /// Unique snippet id
    pub id: SnippetId,
    /// Key of the owning profile (lookup only)
    pub owner_key: ProfileKey,
    /// Language tag used by the highlighter
    pub language: String,
    /// Raw source text
    pub code: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Tags, order irrelevant
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Identities that favorited the snippet, order irrelevant
    #[serde(default)]
    pub favorite_keys: BTreeSet<String>,
    /// Visibility flag
    pub is_public: bool,
    /// Creation time, used for ordering
    pub created_at: Timestamp,
}

/// A set of snippets keyed by id.
///
/// Two sets are equal when they hold the same snippets, whatever order the
/// snippets arrived in. Inserting a snippet whose id is already present
/// replaces the earlier record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    items: HashMap<SnippetId, CodeSnippet>,
}

impl SnippetSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from snippets; later duplicates replace earlier ones.
    pub fn from_snippets(snippets: impl IntoIterator<Item = CodeSnippet>) -> Self {
        snippets.into_iter().collect()
    }

    // ─── Queries ─────────────────────────────────────────────

    /// Get a snippet by id.
    pub fn get(&self, id: &SnippetId) -> Option<&CodeSnippet> {
        self.items.get(id)
    }

    /// Check if a snippet is present.
    pub fn contains(&self, id: &SnippetId) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over the snippets in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &CodeSnippet> {
        self.items.values()
    }

    /// Number of snippets.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Insert or replace a snippet. Returns the previous record if any.
    pub fn insert(&mut self, snippet: CodeSnippet) -> Option<CodeSnippet> {
        self.items.insert(snippet.id.clone(), snippet)
    }

    /// Remove a snippet, returning it if it was present.
    pub fn remove(&mut self, id: &SnippetId) -> Option<CodeSnippet> {
        self.items.remove(id)
    }

    /// Retain only snippets matching a predicate.
    pub fn retain(&mut self, mut f: impl FnMut(&CodeSnippet) -> bool) {
        self.items.retain(|_, snippet| f(snippet));
    }
}

impl FromIterator<CodeSnippet> for SnippetSet {
    fn from_iter<T: IntoIterator<Item = CodeSnippet>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }
}

impl IntoIterator for SnippetSet {
    type Item = CodeSnippet;
    type IntoIter = std::collections::hash_map::IntoValues<SnippetId, CodeSnippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

// ─── Serde Support ───────────────────────────────────────────

// Serialized as a list ordered by id so the encoding is stable.
impl Serialize for SnippetSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut items: Vec<&CodeSnippet> = self.items.values().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SnippetSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items: Vec<CodeSnippet> = Vec::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn snippet(id: &str, day: u32) -> CodeSnippet {
        CodeSnippet {
            id: SnippetId::from(id),
            owner_key: ProfileKey::parse("alice").unwrap(),
            language: "rust".to_string(),
            code: "fn main() {}".to_string(),
            description: String::new(),
            tags: BTreeSet::new(),
            favorite_keys: BTreeSet::new(),
            is_public: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn equality_ignores_arrival_order() {
        let forward = SnippetSet::from_snippets(vec![snippet("a", 1), snippet("b", 2)]);
        let backward = SnippetSet::from_snippets(vec![snippet("b", 2), snippet("a", 1)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn duplicate_ids_replace() {
        let mut set = SnippetSet::new();
        assert!(set.insert(snippet("a", 1)).is_none());
        let previous = set.insert(snippet("a", 5));
        assert_eq!(previous.map(|s| s.created_at.format("%d").to_string()), Some("01".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_and_retain() {
        let mut set = SnippetSet::from_snippets(vec![snippet("a", 1), snippet("b", 2), snippet("c", 3)]);
        assert!(set.remove(&SnippetId::from("a")).is_some());
        assert!(set.remove(&SnippetId::from("missing")).is_none());

        set.retain(|s| s.id.as_str() != "b");
        assert_eq!(set.len(), 1);
        assert!(set.contains(&SnippetId::from("c")));
    }

    #[test]
    fn serializes_sorted_by_id() {
        let set = SnippetSet::from_snippets(vec![snippet("b", 2), snippet("a", 1)]);
        let json = serde_json::to_value(&set).unwrap();
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        let restored: SnippetSet = serde_json::from_value(json).unwrap();
        assert_eq!(restored, set);
    }
}
