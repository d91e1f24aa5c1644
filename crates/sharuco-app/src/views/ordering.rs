//! Presentation order of a resolved snippet set
//!
//! Newest first by `created_at`. Equal timestamps fall back to ascending
//! snippet id, so the result depends only on the set's contents.

use sharuco_core::{CodeSnippet, SnippetSet};
use std::cmp::Ordering;

/// Order two snippets newest-first, ties by ascending id.
pub fn newest_first(a: &CodeSnippet, b: &CodeSnippet) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort `snippets` in place, newest first.
///
/// The sort is stable, so entries that compare equal keep their relative
/// order and sorting an already sorted slice changes nothing.
pub fn sort_newest_first(snippets: &mut [CodeSnippet]) {
    snippets.sort_by(newest_first);
}

/// The snippets of `set` in presentation order.
pub fn order_snippets(set: &SnippetSet) -> Vec<CodeSnippet> {
    let mut ordered: Vec<CodeSnippet> = set.iter().cloned().collect();
    sort_newest_first(&mut ordered);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharuco_testkit::{day, SnippetBuilder};

    fn ids(snippets: &[CodeSnippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn newest_comes_first() {
        let set = SnippetSet::from_snippets([
            SnippetBuilder::new("jan3", "alice").created_at(day(3)).build(),
            SnippetBuilder::new("jan1", "alice").created_at(day(1)).build(),
            SnippetBuilder::new("jan2", "alice").created_at(day(2)).build(),
        ]);
        assert_eq!(ids(&order_snippets(&set)), ["jan3", "jan2", "jan1"]);
    }

    #[test]
    fn equal_timestamps_order_by_id() {
        let set = SnippetSet::from_snippets([
            SnippetBuilder::new("b", "alice").build(),
            SnippetBuilder::new("c", "alice").build(),
            SnippetBuilder::new("a", "alice").build(),
        ]);
        assert_eq!(ids(&order_snippets(&set)), ["a", "b", "c"]);
    }

    #[test]
    fn empty_set_orders_to_nothing() {
        assert!(order_snippets(&SnippetSet::new()).is_empty());
    }
}
