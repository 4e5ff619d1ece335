//! Integration tests for the PIN gate and chat threads.

use chrono::{Duration, Utc};
use treesh::arcade::{ArcadeError, ArcadeSession, SwipeAction};
use treesh::chat::{ChatError, GateState, MessageSender};
use treesh::security::RateLimitConfig;
use treesh::service::demo_candidates;
use treesh::{EngineConfig, ErrorKind, SequenceRandom};

fn matched_session() -> (ArcadeSession, uuid::Uuid) {
    let config = EngineConfig {
        pin_attempts: RateLimitConfig {
            max_attempts: 3,
            window_secs: 300,
            lockout_secs: 60,
            exponential_backoff: true,
        },
        ..EngineConfig::default()
    };
    let mut session = ArcadeSession::new(
        demo_candidates(),
        &config,
        Box::new(SequenceRandom::new([0.0])),
    );
    let match_id = session
        .decide("1", SwipeAction::Like, Utc::now())
        .unwrap()
        .matched
        .unwrap();
    (session, match_id)
}

#[test]
fn test_thread_starts_locked_with_announcement() {
    let (mut session, match_id) = matched_session();

    assert_eq!(session.open_chat(match_id), Ok(GateState::Locked));
    let err = session.thread(match_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);

    let summary = &session.chats()[0];
    assert_eq!(
        summary.last_message.as_deref(),
        Some("You matched with Emma Wilson!")
    );
    assert_eq!(summary.unread_count, 0);
}

#[test]
fn test_only_exact_pin_unlocks() {
    let (mut session, match_id) = matched_session();
    let now = Utc::now();
    let pin = session
        .engine()
        .find_match(match_id)
        .unwrap()
        .chat_pin
        .as_str()
        .to_string();

    let too_long = format!("{pin}0");
    for attempt in [&pin[..3], "", "12a4", too_long.as_str()] {
        let err = session.submit_pin(match_id, attempt, now).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "attempt {attempt:?}");
    }

    assert_eq!(session.submit_pin(match_id, &pin, now), Ok(GateState::Unlocked));
    assert_eq!(session.thread(match_id).unwrap().len(), 1);
}

#[test]
fn test_lockout_backs_off() {
    let (mut session, match_id) = matched_session();
    let now = Utc::now();

    assert_eq!(
        session.submit_pin(match_id, "9999", now).unwrap_err(),
        ArcadeError::Chat(ChatError::IncorrectPin { remaining: 2 })
    );
    session.submit_pin(match_id, "9998", now).unwrap_err();
    let err = session.submit_pin(match_id, "9997", now).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimited);

    // Second lockout doubles
    let later = now + Duration::seconds(61);
    session.submit_pin(match_id, "9999", later).unwrap_err();
    session.submit_pin(match_id, "9998", later).unwrap_err();
    assert_eq!(
        session.submit_pin(match_id, "9997", later).unwrap_err(),
        ArcadeError::Chat(ChatError::TooManyAttempts {
            retry_after_secs: 120
        })
    );
}

#[test]
fn test_conversation_flow() {
    let (mut session, match_id) = matched_session();
    let now = Utc::now();

    session.submit_pin(match_id, "1000", now).unwrap();
    let sent = session.send_message(match_id, "Hey Emma!", now).unwrap();
    assert_eq!(sent.sender, MessageSender::Me);

    assert_eq!(session.deliver_due_replies(now + Duration::seconds(1)), 0);
    assert_eq!(session.deliver_due_replies(now + Duration::seconds(2)), 1);

    let thread = session.thread(match_id).unwrap();
    let senders: Vec<_> = thread.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![MessageSender::System, MessageSender::Me, MessageSender::Them]
    );
    assert_eq!(thread.unread_count(), 1);

    let reply_id = thread.messages()[2].id;
    session.pin_message(match_id, reply_id).unwrap();
    assert!(session.thread(match_id).unwrap().messages()[2].pinned);

    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        session.pin_message(match_id, missing).unwrap_err().kind(),
        ErrorKind::NotFound
    );

    // Closing the view relocks it
    session.close_chat();
    assert!(session.send_message(match_id, "still here?", now).is_err());
}
