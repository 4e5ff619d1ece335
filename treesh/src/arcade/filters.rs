//! Discovery filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    errors::{ArcadeError, ArcadeResult},
    models::Candidate,
};

/// Preferences applied to the discovery pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFilters {
    /// Only show verified profiles
    pub verified_only: bool,
    /// Inclusive lower age bound
    pub min_age: u8,
    /// Inclusive upper age bound
    pub max_age: u8,
    pub max_distance_km: u32,
    /// Any-of match; empty means no interest filtering
    pub interests: BTreeSet<String>,
}

impl Default for DiscoveryFilters {
    fn default() -> Self {
        Self {
            verified_only: false,
            min_age: 18,
            max_age: 35,
            max_distance_km: 50,
            interests: BTreeSet::new(),
        }
    }
}

impl DiscoveryFilters {
    /// Filters that let every candidate through
    #[must_use]
    pub fn any() -> Self {
        Self {
            verified_only: false,
            min_age: 0,
            max_age: u8::MAX,
            max_distance_km: u32::MAX,
            interests: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_age_range(mut self, min_age: u8, max_age: u8) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance_km: u32) -> Self {
        self.max_distance_km = max_distance_km;
        self
    }

    #[must_use]
    pub fn verified_only(mut self) -> Self {
        self.verified_only = true;
        self
    }

    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Reject inverted ranges
    ///
    /// # Errors
    ///
    /// * `ArcadeError::InvalidFilters` - `min_age` is greater than `max_age`
    pub fn validate(&self) -> ArcadeResult<()> {
        if self.min_age > self.max_age {
            return Err(ArcadeError::InvalidFilters(format!(
                "age range {}-{} is inverted",
                self.min_age, self.max_age
            )));
        }
        Ok(())
    }

    /// Whether a single candidate passes every filter
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if self.verified_only && !candidate.verified {
            return false;
        }
        if candidate.age < self.min_age || candidate.age > self.max_age {
            return false;
        }
        if candidate.distance_km > self.max_distance_km {
            return false;
        }
        self.interests.is_empty() || !self.interests.is_disjoint(&candidate.interests)
    }
}

/// Filter a candidate pool, preserving input order
pub fn filter_candidates<'a>(
    pool: &'a [Candidate],
    filters: &DiscoveryFilters,
) -> Vec<&'a Candidate> {
    pool.iter().filter(|c| filters.matches(c)).collect()
}
