//! Knockout bracket types: slots, legs, ties, and bracket rounds.

use crate::models::game::{MatchId, MatchStatus, MatchWinner};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One side of a knockout tie: a known participant, or the winner of an
/// earlier tie that has not resolved yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSlot {
    Entrant(String),
    /// Placeholder replaced with an Entrant once the referenced tie's round
    /// completes.
    WinnerOf(MatchId),
}

impl BracketSlot {
    /// The participant name, if the slot has been resolved.
    pub fn name(&self) -> Option<&str> {
        match self {
            BracketSlot::Entrant(name) => Some(name),
            BracketSlot::WinnerOf(_) => None,
        }
    }
}

/// One leg of a two-legged tie. Leg 1 lists the tie's `slot_a` side first;
/// leg 2 swaps the sides, so its `score_a` belongs to the `slot_b` side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub leg_number: u32,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatus,
}

impl Leg {
    fn new(leg_number: u32) -> Self {
        Self {
            leg_number,
            score_a: None,
            score_b: None,
            status: MatchStatus::Pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Complete
    }
}

/// A knockout pairing. Decided by a single match, or by two legs whose
/// scores aggregate into one result when the tournament is played home
/// and away.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub id: MatchId,
    pub slot_a: BracketSlot,
    pub slot_b: BracketSlot,
    /// Empty for single-match ties; legs 1 and 2 when played over two legs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legs: Vec<Leg>,
    /// Final score of a single-match tie, or the summed leg scores.
    pub aggregate_score_a: Option<u32>,
    pub aggregate_score_b: Option<u32>,
    pub winner: Option<MatchWinner>,
    pub status: MatchStatus,
}

impl Tie {
    pub fn new(slot_a: BracketSlot, slot_b: BracketSlot, two_legged: bool) -> Self {
        let legs = if two_legged {
            vec![Leg::new(1), Leg::new(2)]
        } else {
            Vec::new()
        };
        Self {
            id: Uuid::new_v4(),
            slot_a,
            slot_b,
            legs,
            aggregate_score_a: None,
            aggregate_score_b: None,
            winner: None,
            status: MatchStatus::Pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Complete
    }

    pub fn is_two_legged(&self) -> bool {
        !self.legs.is_empty()
    }

    /// Both side names, once both slots are resolved.
    pub fn named_pair(&self) -> Option<(&str, &str)> {
        Some((self.slot_a.name()?, self.slot_b.name()?))
    }

    /// The advancing participant, once the tie is complete.
    pub fn winner_name(&self) -> Option<&str> {
        match &self.winner {
            Some(MatchWinner::Participant(name)) => Some(name),
            _ => None,
        }
    }

    pub fn leg(&self, leg_number: u32) -> Option<&Leg> {
        self.legs.iter().find(|l| l.leg_number == leg_number)
    }

    pub fn leg_mut(&mut self, leg_number: u32) -> Option<&mut Leg> {
        self.legs.iter_mut().find(|l| l.leg_number == leg_number)
    }
}

/// One knockout round. Rounds are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub number: u32,
    pub ties: Vec<Tie>,
}

impl BracketRound {
    pub fn is_complete(&self) -> bool {
        self.ties.iter().all(Tie::is_complete)
    }
}
