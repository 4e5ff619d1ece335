use chrono::{DateTime, Duration, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treesh::{
    ArcadeSession, EngineConfig, SequenceRandom, SwipeAction,
    arcade::{Candidate, DiscoveryFilters, filter_candidates},
    config::StoryConfig,
    stories::{StoryDraft, StoryEngine},
};

const INTERESTS: [&str; 6] = ["Travel", "Coffee", "Music", "Art", "Fitness", "Food"];

/// Helper to create a pool of N varied candidates
fn candidate_pool(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| Candidate {
            id: i.to_string(),
            name: format!("Candidate {i}"),
            age: 18 + (i % 30) as u8,
            bio: String::new(),
            location: "Austin, TX".to_string(),
            photos: vec![],
            distance_km: (i % 60) as u32,
            interests: [INTERESTS[i % 6], INTERESTS[(i / 6) % 6]]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            verified: i % 3 == 0,
            occupation: None,
        })
        .collect()
}

fn start() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default()
}

/// Benchmark filtering pools of increasing size
fn bench_filter_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_candidates");
    let filters = DiscoveryFilters::default()
        .verified_only()
        .with_interests(["Coffee", "Music"]);

    for size in [50, 500, 5000] {
        let pool = candidate_pool(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &pool, |b, pool| {
            b.iter(|| filter_candidates(black_box(pool), black_box(&filters)).len());
        });
    }
    group.finish();
}

/// Benchmark swiping through a whole pool, then resetting it
fn bench_swipe_and_reset(c: &mut Criterion) {
    let pool = candidate_pool(200);
    let now = start();

    c.bench_function("swipe_200_and_reset", |b| {
        b.iter(|| {
            let mut session = ArcadeSession::new(
                pool.clone(),
                &EngineConfig::default(),
                Box::new(SequenceRandom::with_fallback([], 0.3)),
            );
            for candidate in &pool {
                let _ = session.decide(&candidate.id, SwipeAction::SuperLike, now);
            }
            session.reset_swipe_history();
            black_box(session.stats())
        });
    });
}

/// Benchmark sweeping a story list where half the stories have expired
fn bench_story_sweep(c: &mut Criterion) {
    let mut engine = StoryEngine::new(&StoryConfig::default()).unwrap();
    for i in 0..1000 {
        let created = start() + Duration::minutes(i * 2);
        let _ = engine.create_story(StoryDraft::new("a.jpg"), created);
    }
    let sweep_at = start() + Duration::hours(24) + Duration::minutes(1000);

    c.bench_function("story_sweep_1000", |b| {
        b.iter_batched(
            || engine.clone(),
            |mut engine| engine.sweep(black_box(sweep_at)).len(),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(arcade_operations, bench_filter_candidates, bench_swipe_and_reset);

criterion_group!(story_operations, bench_story_sweep);

criterion_main!(arcade_operations, story_operations);
