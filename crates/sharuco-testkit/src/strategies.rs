//! Property test strategies for Sharuco records
//!
//! Creation times are drawn from a narrow window so generated collections
//! regularly contain equal timestamps.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use sharuco_core::CodeSnippet;

use crate::fixtures::{day, SnippetBuilder};

/// Strategy for a creation time within the first ten days of 2024, at hour
/// granularity.
pub fn arb_created_at() -> impl Strategy<Value = sharuco_core::Timestamp> {
    (1u32..=10, 0i64..3).prop_map(|(d, hour)| day(d) + chrono::Duration::hours(hour))
}

/// Strategy for one public snippet of `owner` with the given id.
pub fn arb_snippet(id: String, owner: &'static str) -> impl Strategy<Value = CodeSnippet> {
    (arb_created_at(), "[a-z]{0,8}").prop_map(move |(created_at, language)| {
        SnippetBuilder::new(&id, owner)
            .created_at(created_at)
            .language(&language)
            .build()
    })
}

/// Strategy for up to `max` snippets of `owner` with distinct ids.
pub fn arb_snippet_set(
    owner: &'static str,
    max: usize,
) -> impl Strategy<Value = Vec<CodeSnippet>> {
    prop::collection::btree_set("[a-z0-9]{1,6}", 0..=max).prop_flat_map(move |ids| {
        ids.into_iter()
            .map(|id| arb_snippet(id, owner))
            .collect::<Vec<_>>()
    })
}
