//! Match, Round, and reported-result types shared by every tournament format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match or knockout tie.
pub type MatchId = Uuid;

/// Lifecycle of a match. The Pending -> Complete transition happens exactly
/// once; finalizing an already Complete match is a no-op.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Complete,
}

/// Outcome of a finalized match: a named winner, or a draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    Participant(String),
    Draw,
}

/// A scheduled fixture between two participants (league and group play).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub participant_a: String,
    pub participant_b: String,
    /// None until the match is finalized.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub winner: Option<MatchWinner>,
    pub status: MatchStatus,
}

impl Match {
    pub fn new(participant_a: impl Into<String>, participant_b: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant_a: participant_a.into(),
            participant_b: participant_b.into(),
            score_a: None,
            score_b: None,
            winner: None,
            status: MatchStatus::Pending,
        }
    }

    /// Fresh fixture with the sides swapped (second cycle of a home-and-away
    /// league).
    pub fn mirrored(&self) -> Self {
        Self::new(self.participant_b.clone(), self.participant_a.clone())
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Complete
    }

    /// True when this fixture pairs exactly these two names, in this order.
    pub fn pairs(&self, participant_a: &str, participant_b: &str) -> bool {
        self.participant_a == participant_a && self.participant_b == participant_b
    }
}

/// One round of fixtures. Rounds are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<Match>,
}

impl Round {
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_complete)
    }
}

/// One reported score in a result batch. `participant_a`/`score_a` refer to
/// the side listed first on the addressed fixture, so ordering matters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReportedResult {
    pub participant_a: String,
    pub participant_b: String,
    pub score_a: u32,
    pub score_b: u32,
    /// Which leg of a two-legged tie the score belongs to (knockout only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leg_number: Option<u32>,
}

impl ReportedResult {
    pub fn new(
        participant_a: impl Into<String>,
        participant_b: impl Into<String>,
        score_a: u32,
        score_b: u32,
    ) -> Self {
        Self {
            participant_a: participant_a.into(),
            participant_b: participant_b.into(),
            score_a,
            score_b,
            leg_number: None,
        }
    }

    /// Score for one leg of a two-legged tie. Leg 2 fixtures list the sides
    /// swapped, so the names here must follow the leg, not the tie.
    pub fn for_leg(
        participant_a: impl Into<String>,
        participant_b: impl Into<String>,
        score_a: u32,
        score_b: u32,
        leg_number: u32,
    ) -> Self {
        Self {
            leg_number: Some(leg_number),
            ..Self::new(participant_a, participant_b, score_a, score_b)
        }
    }
}
