//! Data structures for tournaments: fixtures, brackets, standings, and the
//! persisted document shapes.

mod bracket;
mod document;
mod game;
mod standings;
mod tournament;

pub use bracket::{BracketRound, BracketSlot, Leg, Tie};
pub use document::{Document, GroupKnockoutDoc, KnockoutDoc, LeagueDoc};
pub use game::{Match, MatchId, MatchStatus, MatchWinner, ReportedResult, Round};
pub use standings::{Outcome, StandingsRow, StandingsTable, BYE};
pub use tournament::{validate_entrants, TournamentError, TournamentFormat};
