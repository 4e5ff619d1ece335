//! Demo candidate pool.

use crate::arcade::Candidate;

#[allow(clippy::too_many_arguments)]
fn candidate(
    id: &str,
    name: &str,
    age: u8,
    bio: &str,
    location: &str,
    distance_km: u32,
    interests: &[&str],
    verified: bool,
    occupation: &str,
) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        age,
        bio: bio.to_string(),
        location: location.to_string(),
        photos: vec![format!("/photos/{id}/1.jpg"), format!("/photos/{id}/2.jpg")],
        distance_km,
        interests: interests.iter().map(|s| s.to_string()).collect(),
        verified,
        occupation: Some(occupation.to_string()),
    }
}

/// The five profiles the demo client ships with
pub fn demo_candidates() -> Vec<Candidate> {
    vec![
        candidate(
            "1",
            "Emma Wilson",
            24,
            "Love traveling and photography 📸 Coffee addict and adventure seeker",
            "New York, NY",
            5,
            &["Travel", "Photography", "Coffee", "Adventure"],
            true,
            "Photographer",
        ),
        candidate(
            "2",
            "Alex Chen",
            26,
            "Fitness enthusiast and dog lover 🐕 Always up for a good workout",
            "Los Angeles, CA",
            8,
            &["Fitness", "Dogs", "Hiking", "Healthy Living"],
            false,
            "Personal Trainer",
        ),
        candidate(
            "3",
            "Sarah Johnson",
            25,
            "Artist and coffee lover ☕ Creating beauty one brushstroke at a time",
            "Chicago, IL",
            3,
            &["Art", "Coffee", "Music", "Creativity"],
            true,
            "Art Director",
        ),
        candidate(
            "4",
            "Michael Rodriguez",
            28,
            "Tech entrepreneur by day, musician by night 🎸 Building the future one code at a time",
            "San Francisco, CA",
            12,
            &["Technology", "Music", "Entrepreneurship", "Innovation"],
            true,
            "Tech CEO",
        ),
        candidate(
            "5",
            "Jessica Kim",
            23,
            "Foodie and travel blogger 🌍 Exploring the world one plate at a time",
            "Seattle, WA",
            6,
            &["Food", "Travel", "Blogging", "Culture"],
            false,
            "Travel Blogger",
        ),
    ]
}
