//! Integration tests for discovery, match draws, blocks and resets.

use chrono::Utc;
use treesh::arcade::{ArcadeError, ArcadeSession, DiscoveryFilters, SwipeAction};
use treesh::service::demo_candidates;
use treesh::{EngineConfig, RandomSource, SequenceRandom, StdRandom};

fn session(rng: impl RandomSource + 'static) -> ArcadeSession {
    ArcadeSession::new(demo_candidates(), &EngineConfig::default(), Box::new(rng))
}

fn matched_names(session: &ArcadeSession) -> Vec<String> {
    session
        .engine()
        .matches()
        .iter()
        .map(|m| m.candidate.name.clone())
        .collect()
}

#[test]
fn test_like_all_five_with_scripted_draws() {
    let mut session = session(SequenceRandom::new([0.1, 0.5, 0.1, 0.9, 0.15]));
    let now = Utc::now();

    let ids: Vec<String> = session
        .engine()
        .visible_candidates()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    assert_eq!(ids.len(), 5);

    let matched: Vec<bool> = ids
        .iter()
        .map(|id| session.decide(id, SwipeAction::Like, now).unwrap().is_match())
        .collect();
    assert_eq!(matched, vec![true, false, true, false, true]);

    assert!(session.engine().is_exhausted());
    assert!(session.engine().next_candidate().is_none());
    assert_eq!(
        matched_names(&session),
        vec!["Jessica Kim", "Sarah Johnson", "Emma Wilson"]
    );

    // Every PIN is four ASCII digits
    for m in session.engine().matches() {
        assert_eq!(m.chat_pin.as_str().len(), 4);
        assert!(m.chat_pin.as_str().bytes().all(|b| b.is_ascii_digit()));
    }

    let stats = session.stats();
    assert_eq!(stats.total_likes, 5);
    assert_eq!(stats.total_matches, 3);
}

#[test]
fn test_seeded_outcomes_are_reproducible() {
    let run = |seed| {
        let mut session = session(StdRandom::seeded(seed));
        let now = Utc::now();
        for id in ["1", "2", "3", "4", "5"] {
            session.decide(id, SwipeAction::SuperLike, now).unwrap();
        }
        let pins: Vec<String> = session
            .engine()
            .matches()
            .iter()
            .map(|m| m.chat_pin.as_str().to_string())
            .collect();
        (matched_names(&session), pins)
    };

    assert_eq!(run(17), run(17));
}

#[test]
fn test_swiped_candidate_stays_gone_until_reset() {
    let mut session = session(SequenceRandom::new([]));
    let now = Utc::now();

    session.decide("2", SwipeAction::Dislike, now).unwrap();
    session.decide("4", SwipeAction::Pass, now).unwrap();

    for _ in 0..3 {
        let visible: Vec<_> = session
            .engine()
            .visible_candidates()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(visible, vec!["1", "3", "5"]);
        assert_eq!(
            session.decide("2", SwipeAction::Like, now).unwrap_err(),
            ArcadeError::CandidateNotFound("2".to_string())
        );
    }

    session.reset_swipe_history();
    session.reset_swipe_history();
    assert_eq!(session.engine().pool(), demo_candidates().as_slice());
    assert!(session.engine().interactions().is_empty());
}

#[test]
fn test_interaction_log_is_newest_first() {
    let mut session = session(SequenceRandom::new([0.9]));
    let now = Utc::now();

    session.decide("1", SwipeAction::Like, now).unwrap();
    session.decide("3", SwipeAction::Dislike, now).unwrap();

    let log: Vec<_> = session
        .engine()
        .interactions()
        .iter()
        .map(|d| (d.candidate_id.as_str(), d.action))
        .collect();
    assert_eq!(log, vec![("3", SwipeAction::Dislike), ("1", SwipeAction::Like)]);
}

#[test]
fn test_block_after_match() {
    let mut session = session(SequenceRandom::new([0.0]));
    let now = Utc::now();
    let match_id = session
        .decide("3", SwipeAction::Like, now)
        .unwrap()
        .matched
        .unwrap();

    session.open_chat(match_id).unwrap();
    session.block_user("3", now).unwrap();

    assert!(session.engine().matches().is_empty());
    assert_eq!(session.gate().open_thread(), None);
    assert!(session.engine().is_blocked("3"));
    assert_eq!(session.engine().interactions().len(), 1);
    assert_eq!(
        session.open_chat(match_id).unwrap_err(),
        ArcadeError::MatchNotFound(match_id)
    );

    // Blocking a candidate still in the pool removes it
    session.block_user("5", now).unwrap();
    assert!(
        session
            .engine()
            .visible_candidates()
            .iter()
            .all(|c| c.id != "5")
    );
}

#[test]
fn test_filtered_candidates() {
    let session = session(SequenceRandom::new([]));

    let verified_nearby = DiscoveryFilters::default()
        .verified_only()
        .with_max_distance(10);
    let names: Vec<_> = session
        .engine()
        .filtered_candidates(&verified_nearby)
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Emma Wilson", "Sarah Johnson"]);

    let coffee = DiscoveryFilters::any().with_interests(["Coffee"]);
    assert_eq!(
        session.engine().filtered_candidates(&coffee).unwrap().len(),
        2
    );

    let inverted = DiscoveryFilters::any().with_age_range(30, 20);
    assert!(session.engine().filtered_candidates(&inverted).is_err());
}
