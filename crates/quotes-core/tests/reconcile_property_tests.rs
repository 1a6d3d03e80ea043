//! Property-based tests for the reconciler.
//!
//! Texts are drawn from a tiny alphabet so collisions between local and
//! incoming batches (and within a batch) are frequent.

use proptest::prelude::*;
use quotes_core::{Quote, QuoteCollection, import_append_all, merge_with_dedupe};
use std::collections::HashSet;

// =============================================================================
// Generators
// =============================================================================

fn arb_quote() -> impl Strategy<Value = Quote> {
    ("[abcA ]{1,3}", prop_oneof![Just("Life"), Just("Server"), Just("Work")])
        .prop_map(|(text, category)| Quote::new(text, category))
}

fn arb_quotes(max_count: usize) -> impl Strategy<Value = Vec<Quote>> {
    proptest::collection::vec(arb_quote(), 0..=max_count)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Merging an empty batch changes nothing.
    #[test]
    fn prop_merge_empty_is_identity(local in arb_quotes(20)) {
        let local = QuoteCollection::from(local);
        let out = merge_with_dedupe(local.clone(), Vec::new());
        prop_assert_eq!(out.merged, local);
        prop_assert_eq!(out.added_count, 0);
    }

    /// Every local element survives, in place, at the front of the result.
    #[test]
    fn prop_merge_never_loses_local(local in arb_quotes(20), incoming in arb_quotes(20)) {
        let local = QuoteCollection::from(local);
        let out = merge_with_dedupe(local.clone(), incoming);
        prop_assert!(out.merged.len() >= local.len());
        prop_assert_eq!(&out.merged.as_slice()[..local.len()], local.as_slice());
    }

    /// addedCount equals the incoming elements whose text had no prior match,
    /// counting earlier elements of the same batch as prior.
    #[test]
    fn prop_merge_added_count_matches_reference(
        local in arb_quotes(20),
        incoming in arb_quotes(20),
    ) {
        let mut seen: HashSet<String> = local.iter().map(|q| q.text.clone()).collect();
        let mut expected = Vec::new();
        for q in &incoming {
            if seen.insert(q.text.clone()) {
                expected.push(q.clone());
            }
        }

        let local = QuoteCollection::from(local);
        let n = local.len();
        let out = merge_with_dedupe(local, incoming);

        prop_assert_eq!(out.added_count, expected.len());
        prop_assert_eq!(&out.merged.as_slice()[n..], expected.as_slice());
    }

    /// Nothing appended by a merge duplicates a text already present.
    #[test]
    fn prop_merge_appended_texts_are_new(local in arb_quotes(20), incoming in arb_quotes(20)) {
        let local = QuoteCollection::from(local);
        let n = local.len();
        let out = merge_with_dedupe(local, incoming);

        let mut texts: HashSet<&str> = out.merged.as_slice()[..n]
            .iter()
            .map(|q| q.text.as_str())
            .collect();
        for q in &out.merged.as_slice()[n..] {
            prop_assert!(texts.insert(q.text.as_str()), "duplicate appended: {:?}", q.text);
        }
    }

    /// Same inputs, same output.
    #[test]
    fn prop_merge_is_deterministic(local in arb_quotes(20), incoming in arb_quotes(20)) {
        let local = QuoteCollection::from(local);
        let a = merge_with_dedupe(local.clone(), incoming.clone());
        let b = merge_with_dedupe(local, incoming);
        prop_assert_eq!(a, b);
    }

    /// Re-merging the same batch is a no-op.
    #[test]
    fn prop_merge_is_idempotent_per_batch(local in arb_quotes(20), incoming in arb_quotes(20)) {
        let once = merge_with_dedupe(QuoteCollection::from(local), incoming.clone());
        let twice = merge_with_dedupe(once.merged.clone(), incoming);
        prop_assert_eq!(twice.added_count, 0);
        prop_assert_eq!(twice.merged, once.merged);
    }

    /// Import appends the whole batch verbatim.
    #[test]
    fn prop_import_appends_everything(local in arb_quotes(20), incoming in arb_quotes(20)) {
        let local = QuoteCollection::from(local);
        let n = local.len();
        let out = import_append_all(local, incoming.clone());
        prop_assert_eq!(out.added_count, incoming.len());
        prop_assert_eq!(&out.merged.as_slice()[n..], incoming.as_slice());
    }
}
