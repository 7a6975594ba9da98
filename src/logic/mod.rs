//! Tournament engine behavior: fixture generators, result application,
//! finalization, and rating math.

mod finalize;
mod groups;
mod knockout;
mod league;
mod rating;

pub use finalize::{finalize_match, finalize_tie, Effects};
pub use groups::{build_groups, update_group_stages, update_knockout_stage};
pub use knockout::{build_knockout, update_knockout};
pub use league::{build_league, update_league};
pub use rating::{EloRater, Rank, DEFAULT_K_FACTOR, DEFAULT_RATING};
