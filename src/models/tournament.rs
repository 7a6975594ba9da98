//! Tournament formats, engine errors, and entry-list validation.

use crate::models::standings::BYE;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Supported tournament formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Every participant meets every other (round-robin).
    League,
    /// Single-elimination knockout.
    Cup,
    /// Round-robin groups feeding a knockout of the qualifiers.
    GroupsKnockout,
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFormat::League => write!(f, "league"),
            TournamentFormat::Cup => write!(f, "cup"),
            TournamentFormat::GroupsKnockout => write!(f, "groups_knockout"),
        }
    }
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than two participants were supplied at creation.
    NotEnoughParticipants { supplied: usize },
    /// The same name appears more than once in the entry list.
    DuplicateParticipant(String),
    /// "Bye" is reserved for the odd-count filler and cannot be entered.
    ReservedName(String),
    /// The group configuration would send fewer than two qualifiers to the
    /// knockout.
    NoQualifiers,
    /// The addressed round does not exist in the document.
    RoundNotFound(u32),
    /// No fixture in the addressed round pairs these two names in this order.
    FixtureNotFound {
        participant_a: String,
        participant_b: String,
    },
    /// The addressed tie has no leg with this number.
    LegNotFound { leg_number: u32 },
    /// A two-legged tie needs a leg number to address the score.
    MissingLegNumber,
    /// The rating or history store does not know this name.
    UnknownParticipant(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughParticipants { supplied } => {
                write!(f, "Need at least 2 participants (got {})", supplied)
            }
            TournamentError::DuplicateParticipant(name) => {
                write!(f, "Participant '{}' is listed more than once", name)
            }
            TournamentError::ReservedName(name) => {
                write!(f, "'{}' is reserved and cannot be a participant", name)
            }
            TournamentError::NoQualifiers => {
                write!(f, "Group stage must advance at least 2 qualifiers in total")
            }
            TournamentError::RoundNotFound(number) => {
                write!(f, "Round {} does not exist", number)
            }
            TournamentError::FixtureNotFound {
                participant_a,
                participant_b,
            } => {
                write!(f, "No fixture pairs {} vs {}", participant_a, participant_b)
            }
            TournamentError::LegNotFound { leg_number } => {
                write!(f, "The tie has no leg {}", leg_number)
            }
            TournamentError::MissingLegNumber => {
                write!(f, "A two-legged tie needs a leg number")
            }
            TournamentError::UnknownParticipant(name) => {
                write!(f, "Participant '{}' is not known to the store", name)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Check an entry list: at least two names, no repeats, no reserved names.
/// Names are compared exactly; trimming and casing are the caller's concern.
pub fn validate_entrants(names: &[String]) -> Result<(), TournamentError> {
    if names.len() < 2 {
        return Err(TournamentError::NotEnoughParticipants {
            supplied: names.len(),
        });
    }
    let mut seen = HashSet::new();
    for name in names {
        if name == BYE {
            return Err(TournamentError::ReservedName(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(TournamentError::DuplicateParticipant(name.clone()));
        }
    }
    Ok(())
}
