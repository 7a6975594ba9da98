//! Persisted tournament documents: one closed shape per format, tagged so
//! a serialized document round-trips without external context.

use crate::models::bracket::BracketRound;
use crate::models::game::Round;
use crate::models::standings::StandingsTable;
use crate::models::tournament::TournamentFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// League state: the full fixture list plus the live table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeagueDoc {
    pub fixtures: Vec<Round>,
    pub table: StandingsTable,
}

impl LeagueDoc {
    pub fn round(&self, number: u32) -> Option<&Round> {
        self.fixtures.iter().find(|r| r.number == number)
    }

    /// True once every fixture in every round is complete.
    pub fn is_complete(&self) -> bool {
        self.fixtures.iter().all(Round::is_complete)
    }
}

/// Knockout state: bracket rounds plus a table that fills in as ties
/// finalize.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutDoc {
    pub rounds: Vec<BracketRound>,
    pub table: StandingsTable,
}

impl KnockoutDoc {
    pub fn round(&self, number: u32) -> Option<&BracketRound> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub fn is_complete(&self) -> bool {
        self.rounds.iter().all(BracketRound::is_complete)
    }
}

/// Groups-plus-knockout state. The knockout section stays absent until
/// every group fixture completes; `teams_to_advance` and `home_or_away`
/// are carried here because seeding happens on a later reporting call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupKnockoutDoc {
    /// Group label ("Group A", "Group B", ...) to that group's league.
    pub group_stages: BTreeMap<String, LeagueDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knock_outs: Option<KnockoutDoc>,
    pub teams_to_advance: usize,
    pub home_or_away: bool,
}

impl GroupKnockoutDoc {
    /// True once every fixture in every group is complete.
    pub fn groups_complete(&self) -> bool {
        self.group_stages.values().all(LeagueDoc::is_complete)
    }
}

/// The one persisted state of a tournament, tagged by shape.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Document {
    League(LeagueDoc),
    Knockout(KnockoutDoc),
    GroupsKnockout(GroupKnockoutDoc),
}

impl Document {
    /// The format this document was created for.
    pub fn format(&self) -> TournamentFormat {
        match self {
            Document::League(_) => TournamentFormat::League,
            Document::Knockout(_) => TournamentFormat::Cup,
            Document::GroupsKnockout(_) => TournamentFormat::GroupsKnockout,
        }
    }
}
