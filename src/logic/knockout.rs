//! Knockout bracket generation, tie and leg scoring, and winner
//! propagation between rounds.

use crate::logic::finalize::{finalize_tie, Effects};
use crate::models::{
    validate_entrants, BracketRound, BracketSlot, KnockoutDoc, MatchId, MatchStatus,
    ReportedResult, StandingsTable, Tie, TournamentError,
};
use crate::stores::{HistoryStore, RatingStore};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Build a single-elimination bracket. Each round the active list is
/// shuffled and consecutive slots pair into ties; an odd slot carries
/// straight into the next round as an implicit bye. Rounds after the
/// first hold winner-of placeholders until results resolve them.
pub fn build_knockout(
    participants: &[String],
    home_or_away: bool,
) -> Result<KnockoutDoc, TournamentError> {
    validate_entrants(participants)?;

    let mut rng = rand::thread_rng();
    let mut active: Vec<BracketSlot> = participants
        .iter()
        .cloned()
        .map(BracketSlot::Entrant)
        .collect();

    let mut rounds: Vec<BracketRound> = Vec::new();
    let mut number = 1u32;
    while active.len() > 1 {
        active.shuffle(&mut rng);
        let carried = if active.len() % 2 != 0 { active.pop() } else { None };
        let ties: Vec<Tie> = active
            .chunks_exact(2)
            .map(|pair| Tie::new(pair[0].clone(), pair[1].clone(), home_or_away))
            .collect();
        let mut next: Vec<BracketSlot> =
            ties.iter().map(|t| BracketSlot::WinnerOf(t.id)).collect();
        next.extend(carried);
        rounds.push(BracketRound { number, ties });
        active = next;
        number += 1;
    }

    Ok(KnockoutDoc {
        rounds,
        table: StandingsTable::initialize(participants),
    })
}

/// Apply a result batch to one knockout round, then resolve any winner-of
/// placeholders that newly completed rounds determine. Problems are logged
/// and skipped per result.
pub fn update_knockout<R: RatingStore, H: HistoryStore>(
    doc: &mut KnockoutDoc,
    round_number: u32,
    results: &[ReportedResult],
    fx: &mut Effects<'_, R, H>,
) {
    for result in results {
        if let Err(e) = apply_knockout_result(doc, round_number, result, fx) {
            warn!(
                "knockout round {}: skipping {} vs {}: {}",
                round_number, result.participant_a, result.participant_b, e
            );
        }
    }
    resolve_completed_rounds(doc);
}

fn apply_knockout_result<R: RatingStore, H: HistoryStore>(
    doc: &mut KnockoutDoc,
    round_number: u32,
    result: &ReportedResult,
    fx: &mut Effects<'_, R, H>,
) -> Result<(), TournamentError> {
    let KnockoutDoc { rounds, table } = doc;
    let round = rounds
        .iter_mut()
        .find(|r| r.number == round_number)
        .ok_or(TournamentError::RoundNotFound(round_number))?;

    for tie in &mut round.ties {
        let (a, b) = match tie.named_pair() {
            Some((a, b)) => (a.to_string(), b.to_string()),
            None => continue,
        };
        let forward = result.participant_a == a && result.participant_b == b;
        let reverse = result.participant_a == b && result.participant_b == a;
        if !forward && !reverse {
            continue;
        }

        if !tie.is_two_legged() {
            if !forward {
                // Single ties are addressed in bracket order only.
                continue;
            }
            if let Some(leg_number) = result.leg_number {
                return Err(TournamentError::LegNotFound { leg_number });
            }
            finalize_tie(tie, result.score_a, result.score_b, table, fx);
            return Ok(());
        }

        // Two-legged: leg 1 keeps the tie's orientation, leg 2 swaps it,
        // so the reported pair identifies the leg's fixture exactly.
        let leg_number = result.leg_number.ok_or(TournamentError::MissingLegNumber)?;
        let expects_forward = match leg_number {
            1 => true,
            2 => false,
            other => return Err(TournamentError::LegNotFound { leg_number: other }),
        };
        if forward != expects_forward {
            return Err(TournamentError::FixtureNotFound {
                participant_a: result.participant_a.clone(),
                participant_b: result.participant_b.clone(),
            });
        }
        if tie.is_complete() {
            debug!(
                "knockout round {}: {} vs {} already complete, skipping",
                round_number, a, b
            );
            return Ok(());
        }
        let leg = tie
            .leg_mut(leg_number)
            .ok_or(TournamentError::LegNotFound { leg_number })?;
        if leg.is_complete() {
            debug!(
                "knockout round {}: leg {} of {} vs {} already complete, skipping",
                round_number, leg_number, a, b
            );
            return Ok(());
        }
        leg.score_a = Some(result.score_a);
        leg.score_b = Some(result.score_b);
        leg.status = MatchStatus::Complete;

        if let Some((aggregate_a, aggregate_b)) = aggregate(tie) {
            finalize_tie(tie, aggregate_a, aggregate_b, table, fx);
        }
        return Ok(());
    }

    Err(TournamentError::FixtureNotFound {
        participant_a: result.participant_a.clone(),
        participant_b: result.participant_b.clone(),
    })
}

/// Tie-level score once both legs are in: each side's home goals plus its
/// goals from the away leg. Sums saturate rather than wrap.
fn aggregate(tie: &Tie) -> Option<(u32, u32)> {
    let leg1 = tie.leg(1)?;
    let leg2 = tie.leg(2)?;
    if !leg1.is_complete() || !leg2.is_complete() {
        return None;
    }
    let for_a = leg1.score_a?.saturating_add(leg2.score_b?);
    let for_b = leg1.score_b?.saturating_add(leg2.score_a?);
    Some((for_a, for_b))
}

/// Replace winner-of placeholders with concrete entrants wherever the
/// referenced round has fully completed. Runs after every batch, so late
/// or partial submissions still resolve eventually.
fn resolve_completed_rounds(doc: &mut KnockoutDoc) {
    for i in 0..doc.rounds.len().saturating_sub(1) {
        if !doc.rounds[i].is_complete() {
            continue;
        }
        let winners: HashMap<MatchId, String> = doc.rounds[i]
            .ties
            .iter()
            .filter_map(|t| Some((t.id, t.winner_name()?.to_string())))
            .collect();
        let completed_number = doc.rounds[i].number;

        let mut resolved = 0;
        for tie in &mut doc.rounds[i + 1].ties {
            for slot in [&mut tie.slot_a, &mut tie.slot_b] {
                let name = match &*slot {
                    BracketSlot::WinnerOf(id) => winners.get(id).cloned(),
                    BracketSlot::Entrant(_) => None,
                };
                if let Some(name) = name {
                    *slot = BracketSlot::Entrant(name);
                    resolved += 1;
                }
            }
        }
        if resolved > 0 {
            info!(
                "knockout round {} complete, resolved {} slot(s) in round {}",
                completed_number,
                resolved,
                completed_number + 1
            );
        }
    }
}
