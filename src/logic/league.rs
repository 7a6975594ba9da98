//! League scheduling (circle method) and league result application.

use crate::logic::finalize::{finalize_match, Effects};
use crate::models::{
    validate_entrants, LeagueDoc, Match, ReportedResult, Round, StandingsTable, TournamentError,
    BYE,
};
use crate::stores::{HistoryStore, RatingStore};
use log::warn;

/// Build a full round-robin schedule plus a zeroed table. Odd entry lists
/// get the synthetic Bye filler; its pairings are dropped, so the byed
/// participant simply has no fixture that round. With `home_or_away` a
/// mirrored second cycle with swapped sides follows the first, continuing
/// the round numbering.
pub fn build_league(
    participants: &[String],
    home_or_away: bool,
) -> Result<LeagueDoc, TournamentError> {
    validate_entrants(participants)?;

    let mut slots: Vec<String> = participants.to_vec();
    if slots.len() % 2 != 0 {
        slots.push(BYE.to_string());
    }
    let n = slots.len();

    // Circle method: the first slot stays fixed, the rest rotate one step
    // per round, and slot i meets slot n-1-i.
    let mut fixtures: Vec<Round> = Vec::with_capacity(n - 1);
    for number in 1..=(n as u32 - 1) {
        slots[1..].rotate_right(1);
        let matches = (0..n / 2)
            .map(|i| (slots[i].clone(), slots[n - 1 - i].clone()))
            .filter(|(a, b)| a != BYE && b != BYE)
            .map(|(a, b)| Match::new(a, b))
            .collect();
        fixtures.push(Round { number, matches });
    }

    if home_or_away {
        let first_cycle = n as u32 - 1;
        let mirrored: Vec<Round> = fixtures
            .iter()
            .map(|round| Round {
                number: first_cycle + round.number,
                matches: round.matches.iter().map(Match::mirrored).collect(),
            })
            .collect();
        fixtures.extend(mirrored);
    }

    Ok(LeagueDoc {
        fixtures,
        table: StandingsTable::initialize(participants),
    })
}

/// Apply a result batch to one league round. Each result must name an
/// existing fixture in that round with the sides in schedule order.
/// Problems are logged and skipped per result; the rest of the batch
/// still lands.
pub fn update_league<R: RatingStore, H: HistoryStore>(
    doc: &mut LeagueDoc,
    round_number: u32,
    results: &[ReportedResult],
    fx: &mut Effects<'_, R, H>,
) {
    for result in results {
        if let Err(e) = apply_league_result(doc, round_number, result, fx) {
            warn!(
                "league round {}: skipping {} vs {}: {}",
                round_number, result.participant_a, result.participant_b, e
            );
        }
    }
}

/// Apply one result to one round. Shared with the group stage, which tries
/// each group in turn.
pub(crate) fn apply_league_result<R: RatingStore, H: HistoryStore>(
    doc: &mut LeagueDoc,
    round_number: u32,
    result: &ReportedResult,
    fx: &mut Effects<'_, R, H>,
) -> Result<(), TournamentError> {
    let LeagueDoc { fixtures, table } = doc;
    let round = fixtures
        .iter_mut()
        .find(|r| r.number == round_number)
        .ok_or(TournamentError::RoundNotFound(round_number))?;
    let m = round
        .matches
        .iter_mut()
        .find(|m| m.pairs(&result.participant_a, &result.participant_b))
        .ok_or_else(|| TournamentError::FixtureNotFound {
            participant_a: result.participant_a.clone(),
            participant_b: result.participant_b.clone(),
        })?;
    finalize_match(m, result.score_a, result.score_b, table, fx);
    Ok(())
}
