//! Properties of the newest-first ordering and of the combinator precedence.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use sharuco_app::views::ordering::{newest_first, order_snippets, sort_newest_first};
use sharuco_app::{combine, ProfileSnapshot, SnippetSnapshot, ViewState};
use sharuco_core::{DataSource, FetchError, SnippetSet};
use sharuco_testkit::strategies::arb_snippet_set;
use sharuco_testkit::ProfileBuilder;
use std::cmp::Ordering;

fn arb_snippet_snapshot() -> impl Strategy<Value = SnippetSnapshot> {
    prop_oneof![
        Just(SnippetSnapshot::Loading),
        Just(SnippetSnapshot::Failed(FetchError::backend(
            DataSource::Snippets,
            "down"
        ))),
        arb_snippet_set("alice", 8)
            .prop_map(|rows| SnippetSnapshot::Loaded(SnippetSet::from_snippets(rows))),
    ]
}

proptest! {
    #[test]
    fn ordering_is_idempotent(rows in arb_snippet_set("alice", 24)) {
        let once = order_snippets(&SnippetSet::from_snippets(rows));
        let mut twice = once.clone();
        sort_newest_first(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn ordering_ignores_input_representation(
        rows in arb_snippet_set("alice", 24),
        seed in any::<u64>(),
    ) {
        let forward = order_snippets(&SnippetSet::from_snippets(rows.clone()));

        let mut shuffled = rows;
        let len = shuffled.len().max(1);
        shuffled.rotate_left((seed as usize) % len);
        shuffled.reverse();
        let reordered = order_snippets(&SnippetSet::from_snippets(shuffled));

        prop_assert_eq!(forward, reordered);
    }

    #[test]
    fn newer_always_precedes_older(rows in arb_snippet_set("alice", 24)) {
        let ordered = order_snippets(&SnippetSet::from_snippets(rows));
        for pair in ordered.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
            prop_assert_ne!(newest_first(&pair[0], &pair[1]), Ordering::Greater);
            if pair[0].created_at == pair[1].created_at {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn missing_profile_is_not_found_for_any_snippet_state(snippets in arb_snippet_snapshot()) {
        prop_assert_eq!(combine(&ProfileSnapshot::Missing, &snippets), ViewState::NotFound);
        prop_assert_eq!(combine(&ProfileSnapshot::NoKey, &snippets), ViewState::NotFound);
    }

    #[test]
    fn profile_error_wins_for_any_snippet_state(snippets in arb_snippet_snapshot()) {
        let error = FetchError::transport(DataSource::Profile, "offline");
        let state = combine(&ProfileSnapshot::Failed(error.clone()), &snippets);
        prop_assert_eq!(state, ViewState::Error { error });
    }

    #[test]
    fn found_profile_always_shows_header(snippets in arb_snippet_snapshot()) {
        let profile = ProfileSnapshot::Found(ProfileBuilder::new("alice").build());
        let state = combine(&profile, &snippets);
        prop_assert!(state.header().is_some());
        prop_assert_eq!(state.is_settled(), !snippets.is_loading());
    }
}
