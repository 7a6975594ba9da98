//! Tournament fixture and scoring engine: builds round-robin leagues,
//! knockout brackets, and group stages from a participant list, applies
//! reported results round by round, keeps standings sorted, propagates
//! bracket winners, and feeds Elo updates to injected stores.

pub mod logic;
pub mod manager;
pub mod models;
pub mod stores;

pub use logic::{
    build_groups, build_knockout, build_league, update_group_stages, update_knockout,
    update_knockout_stage, update_league, EloRater, Rank, DEFAULT_K_FACTOR, DEFAULT_RATING,
};
pub use manager::{TournamentManager, DEFAULT_TEAMS_TO_ADVANCE};
pub use models::{
    validate_entrants, BracketRound, BracketSlot, Document, GroupKnockoutDoc, KnockoutDoc,
    LeagueDoc, Leg, Match, MatchId, MatchStatus, MatchWinner, Outcome, ReportedResult, Round,
    StandingsRow, StandingsTable, Tie, TournamentError, TournamentFormat, BYE,
};
pub use stores::{
    HistoryEntry, HistoryStore, MemoryHistoryStore, MemoryRatingStore, RatingChange, RatingStore,
};
