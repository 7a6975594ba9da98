//! Group stage orchestration: partitioning into labeled groups, fanning
//! result batches out to the right group, and seeding the knockout with
//! the qualifiers.

use crate::logic::finalize::Effects;
use crate::logic::knockout::{build_knockout, update_knockout};
use crate::logic::league::{apply_league_result, build_league};
use crate::models::{validate_entrants, GroupKnockoutDoc, ReportedResult, TournamentError};
use crate::stores::{HistoryStore, RatingStore};
use log::{info, warn};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Smallest group the partitioner aims for.
const MIN_GROUP_SIZE: usize = 4;

/// Single-letter labels keep "Group A".."Group Z" in draw order; the
/// partitioner never makes more than 26 groups.
const MAX_GROUPS: usize = 26;

/// Shuffle participants into labeled groups of at least four (fewer only
/// when the whole entry list is smaller) and build one round-robin league
/// per group. The knockout section stays absent until every group
/// completes.
pub fn build_groups(
    participants: &[String],
    home_or_away: bool,
    teams_to_advance: usize,
) -> Result<GroupKnockoutDoc, TournamentError> {
    validate_entrants(participants)?;

    let group_count = (participants.len() / MIN_GROUP_SIZE).clamp(1, MAX_GROUPS);
    // The seeded knockout needs at least two entrants.
    if group_count.saturating_mul(teams_to_advance) < 2 {
        return Err(TournamentError::NoQualifiers);
    }

    let mut pool: Vec<String> = participants.to_vec();
    pool.shuffle(&mut rand::thread_rng());

    let base_size = pool.len() / group_count;
    let oversize = pool.len() % group_count;

    let mut group_stages = BTreeMap::new();
    let mut offset = 0;
    for index in 0..group_count {
        let size = base_size + usize::from(index < oversize);
        let members = &pool[offset..offset + size];
        offset += size;
        group_stages.insert(group_label(index), build_league(members, home_or_away)?);
    }

    Ok(GroupKnockoutDoc {
        group_stages,
        knock_outs: None,
        teams_to_advance,
        home_or_away,
    })
}

fn group_label(index: usize) -> String {
    // index < 26 by the MAX_GROUPS clamp
    let letter = (b'A' + index as u8) as char;
    format!("Group {}", letter)
}

/// Apply a result batch to the group stage. Each result lands in whichever
/// group schedules its pair for that round; results no group schedules are
/// logged and skipped. Once the last group fixture completes, the top rows
/// of each group seed the knockout.
pub fn update_group_stages<R: RatingStore, H: HistoryStore>(
    doc: &mut GroupKnockoutDoc,
    round_number: u32,
    results: &[ReportedResult],
    fx: &mut Effects<'_, R, H>,
) {
    for result in results {
        let mut applied = false;
        for league in doc.group_stages.values_mut() {
            if apply_league_result(league, round_number, result, fx).is_ok() {
                applied = true;
                break;
            }
        }
        if !applied {
            warn!(
                "group round {}: no group schedules {} vs {}",
                round_number, result.participant_a, result.participant_b
            );
        }
    }
    seed_knockout_when_groups_done(doc);
}

/// Route a batch to the knockout stage of a groups tournament. Dropped
/// with a warning while the group stage is still running.
pub fn update_knockout_stage<R: RatingStore, H: HistoryStore>(
    doc: &mut GroupKnockoutDoc,
    round_number: u32,
    results: &[ReportedResult],
    fx: &mut Effects<'_, R, H>,
) {
    match doc.knock_outs.as_mut() {
        Some(knockout) => update_knockout(knockout, round_number, results, fx),
        None => warn!(
            "knockout round {}: group stage not finished, dropping {} result(s)",
            round_number,
            results.len()
        ),
    }
}

/// Seed the knockout exactly once: every group complete, knockout still
/// absent. Qualifiers are the top `teams_to_advance` rows of each group
/// table, taken in group label order.
fn seed_knockout_when_groups_done(doc: &mut GroupKnockoutDoc) {
    if doc.knock_outs.is_some() || !doc.groups_complete() {
        return;
    }
    let qualifiers: Vec<String> = doc
        .group_stages
        .values()
        .flat_map(|league| league.table.leaders(doc.teams_to_advance))
        .collect();
    match build_knockout(&qualifiers, doc.home_or_away) {
        Ok(knockout) => {
            info!(
                "group stage complete, {} qualifier(s) seed the knockout",
                qualifiers.len()
            );
            doc.knock_outs = Some(knockout);
        }
        Err(e) => warn!("knockout seeding failed: {}", e),
    }
}
