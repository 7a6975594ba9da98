//! Rating and match-history store seams.
//!
//! The engine never owns participant records; it resolves names against
//! these traits when a result finalizes. A failed lookup cancels only the
//! affected side effect, never the result itself.

use crate::logic::DEFAULT_RATING;
use crate::models::{Outcome, TournamentError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line of a participant's match history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub opponent: String,
    pub result: Outcome,
    pub score_for: u32,
    pub score_against: u32,
}

/// Rating change applied to one participant after a decisive result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatingChange {
    pub participant: String,
    pub old_rating: f64,
    pub new_rating: f64,
}

/// Lookup-by-name access to wherever ratings live.
pub trait RatingStore {
    /// Current rating for `name`, or `UnknownParticipant`.
    fn rating(&self, name: &str) -> Result<f64, TournamentError>;

    /// Write the new rating back.
    fn set_rating(&mut self, name: &str, rating: f64) -> Result<(), TournamentError>;
}

/// Append-only access to per-participant match histories.
pub trait HistoryStore {
    fn append(&mut self, name: &str, entry: HistoryEntry) -> Result<(), TournamentError>;
}

/// In-memory rating store for tests and the simulation binary. Names must
/// be registered before they can be rated.
#[derive(Clone, Debug, Default)]
pub struct MemoryRatingStore {
    ratings: HashMap<String, f64>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at the default rating; existing entries are kept.
    pub fn register(&mut self, name: impl Into<String>) {
        self.ratings.entry(name.into()).or_insert(DEFAULT_RATING);
    }

    pub fn insert(&mut self, name: impl Into<String>, rating: f64) {
        self.ratings.insert(name.into(), rating);
    }

    /// All ratings sorted best first.
    pub fn leaderboard(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .ratings
            .iter()
            .map(|(name, &rating)| (name.clone(), rating))
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}

impl RatingStore for MemoryRatingStore {
    fn rating(&self, name: &str) -> Result<f64, TournamentError> {
        self.ratings
            .get(name)
            .copied()
            .ok_or_else(|| TournamentError::UnknownParticipant(name.to_string()))
    }

    fn set_rating(&mut self, name: &str, rating: f64) -> Result<(), TournamentError> {
        match self.ratings.get_mut(name) {
            Some(slot) => {
                *slot = rating;
                Ok(())
            }
            None => Err(TournamentError::UnknownParticipant(name.to_string())),
        }
    }
}

/// In-memory history store: keeps every appended entry per name, with no
/// registration requirement.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistoryStore {
    entries: HashMap<String, Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, name: &str) -> &[HistoryEntry] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, name: &str, entry: HistoryEntry) -> Result<(), TournamentError> {
        self.entries.entry(name.to_string()).or_default().push(entry);
        Ok(())
    }
}
