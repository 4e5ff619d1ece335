//! Derived, read-only presentation values for stories.

use chrono::{DateTime, Utc};

use super::models::Story;

/// Time left before expiry: `"Expired"`, `"<h>h <m>m"` or `"<m>m"`
pub fn time_remaining(story: &Story, now: DateTime<Utc>) -> String {
    let left = story.expires_at - now;
    if left <= chrono::Duration::zero() {
        return "Expired".to_string();
    }

    let hours = left.num_hours();
    let minutes = left.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Elapsed share of the story's lifetime, clamped to `0.0..=100.0`
pub fn progress_percent(story: &Story, now: DateTime<Utc>) -> f64 {
    let total = (story.expires_at - story.created_at).num_milliseconds();
    if total <= 0 {
        return 100.0;
    }
    let elapsed = (now - story.created_at).num_milliseconds();
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Relative age: `"Just now"`, `"<m>m ago"`, `"<h>h ago"` or `"<d>d ago"`
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn story(created_at: DateTime<Utc>) -> Story {
        Story {
            id: Uuid::new_v4(),
            media: "a.jpg".to_string(),
            text_overlays: vec![],
            stickers: vec![],
            created_at,
            expires_at: created_at + Duration::hours(24),
            views: 0,
            likes: 0,
            liked: false,
            viewers: vec![],
            reactions: vec![],
        }
    }

    #[test]
    fn test_time_remaining() {
        let t0 = Utc::now();
        let story = story(t0);

        assert_eq!(time_remaining(&story, t0), "24h 0m");
        assert_eq!(
            time_remaining(&story, t0 + Duration::hours(22) + Duration::minutes(30)),
            "1h 30m"
        );
        assert_eq!(
            time_remaining(&story, t0 + Duration::hours(23) + Duration::minutes(15)),
            "45m"
        );
        assert_eq!(time_remaining(&story, t0 + Duration::hours(24)), "Expired");
    }

    #[test]
    fn test_progress_is_clamped() {
        let t0 = Utc::now();
        let story = story(t0);

        assert_eq!(progress_percent(&story, t0 - Duration::hours(1)), 0.0);
        assert!((progress_percent(&story, t0 + Duration::hours(6)) - 25.0).abs() < 1e-9);
        assert_eq!(progress_percent(&story, t0 + Duration::hours(30)), 100.0);
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_time_ago(now - Duration::minutes(125), now), "2h ago");
        assert_eq!(format_time_ago(now - Duration::hours(50), now), "2d ago");
    }
}
