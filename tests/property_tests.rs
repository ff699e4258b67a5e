//! Property-based tests for scoring, signing and ranking.
//!
//! These hold regardless of input:
//! - weighted Jaccard is symmetric, bounded, and 1 on itself
//! - signatures are reproducible from the seed
//! - an item always retrieves itself
//! - queries over a non-empty index never come back empty

use proptest::prelude::*;
use wlsh::hash::{BandIndex, HashFamily};
use wlsh::{weighted_jaccard, EngineConfig, LshIndex, SparseVector};

const DIM: u32 = 64;

prop_compose! {
    fn arb_vector()(entries in prop::collection::btree_map(0..DIM, 0.0f32..10.0, 0..16)) -> SparseVector {
        SparseVector::from_pairs(entries).expect("btree_map keys are unique")
    }
}

prop_compose! {
    fn arb_non_empty_vector()(entries in prop::collection::btree_map(0..DIM, 0.01f32..10.0, 1..16)) -> SparseVector {
        SparseVector::from_pairs(entries).expect("btree_map keys are unique")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn self_similarity_is_one(v in arb_non_empty_vector()) {
        prop_assert_eq!(weighted_jaccard(&v, &v), 1.0);
    }

    #[test]
    fn similarity_is_symmetric(a in arb_vector(), b in arb_vector()) {
        prop_assert_eq!(weighted_jaccard(&a, &b), weighted_jaccard(&b, &a));
    }

    #[test]
    fn similarity_is_bounded(a in arb_vector(), b in arb_vector()) {
        let s = weighted_jaccard(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s), "similarity out of range: {}", s);
    }

    #[test]
    fn signatures_reproducible_from_seed(v in arb_vector(), seed in any::<u64>()) {
        let f1 = HashFamily::with_seed(seed, 8, 4).expect("family");
        let f2 = HashFamily::with_seed(seed, 8, 4).expect("family");
        prop_assert_eq!(f1.sign(&v), f2.sign(&v));
    }

    #[test]
    fn item_retrieves_itself(
        vectors in prop::collection::vec(arb_vector(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let family = HashFamily::with_seed(42, 10, 3).expect("family");
        let mut index = BandIndex::new(10, 3).expect("index");
        let sigs: Vec<_> = vectors.iter().map(|v| family.sign(v)).collect();
        for (id, sig) in sigs.iter().enumerate() {
            index.add(id as u32, sig).expect("add");
        }
        let id = pick.index(sigs.len());
        prop_assert!(index.candidates(&sigs[id]).expect("candidates").contains(&(id as u32)));
    }

    #[test]
    fn query_is_non_empty_sorted_and_bounded(
        vectors in prop::collection::vec(arb_vector(), 1..20),
        query in arb_vector(),
        topk in 1usize..30,
    ) {
        let n = vectors.len();
        let config = EngineConfig::new(40, 10, 4).expect("config");
        let index = LshIndex::build(&config, DIM as usize, vectors.into_iter().map(|v| (v, ())))
            .expect("build");

        let hits = index.query_vector(&query, topk).expect("query");
        prop_assert!(!hits.is_empty());
        prop_assert!(hits.len() <= topk.min(n));
        for w in hits.windows(2) {
            prop_assert!(
                w[0].similarity > w[1].similarity
                    || (w[0].similarity == w[1].similarity && w[0].id < w[1].id)
            );
        }
    }
}
