//! Tournament orchestration facade: format dispatch for creation and
//! result reporting, with the rating and history stores injected once.

use crate::logic::{
    build_groups, build_knockout, build_league, update_group_stages, update_knockout,
    update_knockout_stage, update_league, Effects, EloRater,
};
use crate::models::{Document, ReportedResult, TournamentError, TournamentFormat};
use crate::stores::{HistoryStore, RatingChange, RatingStore};
use log::info;

/// How many rows advance from each group when the creator does not say.
pub const DEFAULT_TEAMS_TO_ADVANCE: usize = 2;

/// Facade over the generators and updaters. Owns the injected stores and
/// the Elo configuration; one manager serves any number of tournaments,
/// since each document carries all per-tournament state.
pub struct TournamentManager<R: RatingStore, H: HistoryStore> {
    ratings: R,
    history: H,
    rater: EloRater,
}

impl<R: RatingStore, H: HistoryStore> TournamentManager<R, H> {
    pub fn new(ratings: R, history: H) -> Self {
        Self {
            ratings,
            history,
            rater: EloRater::default(),
        }
    }

    /// Same, with a custom K-factor.
    pub fn with_rater(ratings: R, history: H, rater: EloRater) -> Self {
        Self {
            ratings,
            history,
            rater,
        }
    }

    /// Create the document for a new tournament. Validation failures (too
    /// few names, duplicates, the reserved Bye name) are fatal here, unlike
    /// reporting problems later.
    pub fn create(
        &self,
        format: TournamentFormat,
        participant_names: &[String],
        home_or_away: bool,
        teams_to_advance: Option<usize>,
    ) -> Result<Document, TournamentError> {
        let doc = match format {
            TournamentFormat::League => {
                Document::League(build_league(participant_names, home_or_away)?)
            }
            TournamentFormat::Cup => {
                Document::Knockout(build_knockout(participant_names, home_or_away)?)
            }
            TournamentFormat::GroupsKnockout => Document::GroupsKnockout(build_groups(
                participant_names,
                home_or_away,
                teams_to_advance.unwrap_or(DEFAULT_TEAMS_TO_ADVANCE),
            )?),
        };
        info!(
            "created {} tournament for {} participant(s), home_or_away: {}",
            format,
            participant_names.len(),
            home_or_away
        );
        Ok(doc)
    }

    /// Apply a result batch to one round of `doc`. Per-result problems are
    /// logged and skipped; the document is always left authoritative.
    /// Returns the rating changes produced by newly finalized results.
    /// `advance_to_knockout` targets the knockout stage of a groups
    /// tournament and is ignored by single-stage formats.
    pub fn report(
        &mut self,
        doc: &mut Document,
        round_number: u32,
        results: &[ReportedResult],
        advance_to_knockout: bool,
    ) -> Vec<RatingChange> {
        let mut changes = Vec::new();
        let mut fx = Effects {
            ratings: &mut self.ratings,
            history: &mut self.history,
            rater: &self.rater,
            changes: &mut changes,
        };
        match doc {
            Document::League(league) => update_league(league, round_number, results, &mut fx),
            Document::Knockout(knockout) => {
                update_knockout(knockout, round_number, results, &mut fx)
            }
            Document::GroupsKnockout(groups) => {
                if advance_to_knockout {
                    update_knockout_stage(groups, round_number, results, &mut fx)
                } else {
                    update_group_stages(groups, round_number, results, &mut fx)
                }
            }
        }
        changes
    }

    /// Read access to the rating store (e.g. for leaderboards).
    pub fn ratings(&self) -> &R {
        &self.ratings
    }

    /// Read access to the history store.
    pub fn history(&self) -> &H {
        &self.history
    }
}
