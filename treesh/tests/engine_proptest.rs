/// Property-based tests for candidate filtering and story sweeps
///
/// These tests check the filter and expiry rules across randomly generated
/// pools and timelines.
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;
use treesh::arcade::{Candidate, DiscoveryFilters, filter_candidates};
use treesh::config::StoryConfig;
use treesh::stories::{StoryDraft, StoryEngine, progress_percent};

const INTERESTS: [&str; 5] = ["Travel", "Coffee", "Music", "Art", "Fitness"];

// Strategy to generate a candidate with a bounded age, distance and interest set
fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    (
        18u8..=60,
        0u32..=100,
        any::<bool>(),
        prop::collection::btree_set(0usize..INTERESTS.len(), 0..=3),
    )
        .prop_map(|(age, distance_km, verified, interests)| Candidate {
            id: format!("{age}-{distance_km}"),
            name: "Candidate".to_string(),
            age,
            bio: String::new(),
            location: "Denver, CO".to_string(),
            photos: vec![],
            distance_km,
            interests: interests
                .into_iter()
                .map(|i| INTERESTS[i].to_string())
                .collect::<BTreeSet<_>>(),
            verified,
            occupation: None,
        })
}

fn filters_strategy() -> impl Strategy<Value = DiscoveryFilters> {
    (
        18u8..=60,
        0u8..=20,
        0u32..=100,
        any::<bool>(),
        prop::collection::btree_set(0usize..INTERESTS.len(), 0..=2),
    )
        .prop_map(|(min_age, span, max_distance, verified_only, interests)| {
            let filters = DiscoveryFilters::any()
                .with_age_range(min_age, min_age.saturating_add(span))
                .with_max_distance(max_distance)
                .with_interests(interests.into_iter().map(|i| INTERESTS[i]));
            if verified_only {
                filters.verified_only()
            } else {
                filters
            }
        })
}

fn start() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
}

proptest! {
    #[test]
    fn test_filter_output_satisfies_every_filter(
        pool in prop::collection::vec(candidate_strategy(), 0..30),
        filters in filters_strategy(),
    ) {
        let kept = filter_candidates(&pool, &filters);

        for candidate in &kept {
            prop_assert!(candidate.age >= filters.min_age && candidate.age <= filters.max_age);
            prop_assert!(candidate.distance_km <= filters.max_distance_km);
            prop_assert!(!filters.verified_only || candidate.verified);
            prop_assert!(
                filters.interests.is_empty()
                    || !filters.interests.is_disjoint(&candidate.interests)
            );
        }

        // Nothing that passes is dropped
        let expected = pool.iter().filter(|c| filters.matches(c)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn test_filter_preserves_order(
        pool in prop::collection::vec(candidate_strategy(), 0..30),
        filters in filters_strategy(),
    ) {
        let kept = filter_candidates(&pool, &filters);
        let positions: Vec<usize> = kept
            .iter()
            .map(|k| pool.iter().position(|c| std::ptr::eq(c, *k)).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sweep_partitions_by_expiry(
        offsets in prop::collection::vec(0i64..(48 * 60), 1..20),
        sweep_at in 0i64..(96 * 60),
    ) {
        let mut engine = StoryEngine::new(&StoryConfig::default()).unwrap();
        for offset in &offsets {
            engine
                .create_story(StoryDraft::new("a.jpg"), start() + Duration::minutes(*offset))
                .unwrap();
        }

        let now = start() + Duration::minutes(sweep_at);
        let expired = engine.sweep(now);

        prop_assert_eq!(expired.len() + engine.stories().len(), offsets.len());
        prop_assert!(engine.stories().iter().all(|s| now < s.expires_at));

        // A second sweep at the same instant is a no-op
        prop_assert!(engine.sweep(now).is_empty());
    }

    #[test]
    fn test_progress_stays_in_bounds(offset in -10_000i64..10_000) {
        let mut engine = StoryEngine::new(&StoryConfig::default()).unwrap();
        let story = engine.create_story(StoryDraft::new("a.jpg"), start()).unwrap();

        let progress = progress_percent(&story, start() + Duration::minutes(offset));
        prop_assert!((0.0..=100.0).contains(&progress));
    }
}
