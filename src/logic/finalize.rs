//! Result finalization: the one path that turns a decided score into
//! terminal match state, standings rows, rating updates, and history
//! entries. Every format funnels through here so the side effects cannot
//! drift apart.

use crate::logic::rating::EloRater;
use crate::models::{Match, MatchStatus, MatchWinner, Outcome, StandingsTable, Tie};
use crate::stores::{HistoryEntry, HistoryStore, RatingChange, RatingStore};
use chrono::Utc;
use log::{debug, warn};
use rand::Rng;

/// Side-effect sinks shared by every finalization in one reporting batch.
pub struct Effects<'e, R: RatingStore, H: HistoryStore> {
    pub ratings: &'e mut R,
    pub history: &'e mut H,
    pub rater: &'e EloRater,
    pub changes: &'e mut Vec<RatingChange>,
}

/// Finalize a league or group fixture. Already complete matches are left
/// untouched, which makes replayed batches harmless.
pub fn finalize_match<R: RatingStore, H: HistoryStore>(
    m: &mut Match,
    score_a: u32,
    score_b: u32,
    table: &mut StandingsTable,
    fx: &mut Effects<'_, R, H>,
) {
    if m.status == MatchStatus::Complete {
        debug!("match {} already complete, skipping", m.id);
        return;
    }
    let (a, b) = (m.participant_a.clone(), m.participant_b.clone());
    m.score_a = Some(score_a);
    m.score_b = Some(score_b);
    m.winner = Some(winner_of(&a, &b, score_a, score_b));
    m.status = MatchStatus::Complete;
    book_result(&a, &b, score_a, score_b, table, fx);
}

/// Finalize a knockout tie from its decided (or aggregated) score. A level
/// score still books as a draw for the table and history, but the bracket
/// always gets an advancing participant: away goals first for two-legged
/// ties, then a drawing of lots.
pub fn finalize_tie<R: RatingStore, H: HistoryStore>(
    tie: &mut Tie,
    score_a: u32,
    score_b: u32,
    table: &mut StandingsTable,
    fx: &mut Effects<'_, R, H>,
) {
    if tie.status == MatchStatus::Complete {
        debug!("tie {} already complete, skipping", tie.id);
        return;
    }
    let (a, b) = match tie.named_pair() {
        Some((a, b)) => (a.to_string(), b.to_string()),
        // Unresolved slots cannot finalize; callers match by name first.
        None => return,
    };
    tie.aggregate_score_a = Some(score_a);
    tie.aggregate_score_b = Some(score_b);

    let advancing = if score_a > score_b {
        a.clone()
    } else if score_b > score_a {
        b.clone()
    } else {
        break_level_tie(tie, &a, &b)
    };
    tie.winner = Some(MatchWinner::Participant(advancing));
    tie.status = MatchStatus::Complete;
    book_result(&a, &b, score_a, score_b, table, fx);
}

/// Away goals for two-legged ties, then a drawing of lots. The lot draw
/// is the terminal rule so a bracket can never stall on a level tie.
fn break_level_tie(tie: &Tie, a: &str, b: &str) -> String {
    if tie.is_two_legged() {
        if let Some((away_a, away_b)) = away_goals(tie) {
            if away_a > away_b {
                debug!("tie {}: {} advances on away goals", tie.id, a);
                return a.to_string();
            }
            if away_b > away_a {
                debug!("tie {}: {} advances on away goals", tie.id, b);
                return b.to_string();
            }
        }
    }
    let winner = if rand::thread_rng().gen_bool(0.5) { a } else { b };
    warn!(
        "tie {}: {} vs {} level, {} advances by drawing of lots",
        tie.id, a, b, winner
    );
    winner.to_string()
}

/// Goals scored by each side in the leg it played away: side a visits in
/// leg 2, side b in leg 1.
fn away_goals(tie: &Tie) -> Option<(u32, u32)> {
    let leg1 = tie.leg(1)?;
    let leg2 = tie.leg(2)?;
    Some((leg2.score_b?, leg1.score_b?))
}

/// Shared bookkeeping for one decided score: a standings record for each
/// side, an Elo update when the result is decisive, and a history entry
/// for each side.
fn book_result<R: RatingStore, H: HistoryStore>(
    a: &str,
    b: &str,
    score_a: u32,
    score_b: u32,
    table: &mut StandingsTable,
    fx: &mut Effects<'_, R, H>,
) {
    let (outcome_a, outcome_b) = outcomes(score_a, score_b);
    table.record(a, score_a, score_b, outcome_a);
    table.record(b, score_b, score_a, outcome_b);

    if outcome_a != Outcome::Draw {
        let (winner, loser) = if outcome_a == Outcome::Win { (a, b) } else { (b, a) };
        apply_rating(winner, loser, fx);
    }

    let date = Utc::now().date_naive();
    append_history(a, b, score_a, score_b, outcome_a, date, fx.history);
    append_history(b, a, score_b, score_a, outcome_b, date, fx.history);
}

/// Rate a decisive result. An unknown name on either side cancels the
/// whole update; a failed write cancels only that side's event.
fn apply_rating<R: RatingStore, H: HistoryStore>(
    winner: &str,
    loser: &str,
    fx: &mut Effects<'_, R, H>,
) {
    let (old_winner, old_loser) = match (fx.ratings.rating(winner), fx.ratings.rating(loser)) {
        (Ok(w), Ok(l)) => (w, l),
        (Err(e), _) | (_, Err(e)) => {
            warn!("rating update skipped for {} vs {}: {}", winner, loser, e);
            return;
        }
    };
    let (new_winner, new_loser) = fx.rater.rate(old_winner, old_loser);
    match fx.ratings.set_rating(winner, new_winner) {
        Ok(()) => fx.changes.push(RatingChange {
            participant: winner.to_string(),
            old_rating: old_winner,
            new_rating: new_winner,
        }),
        Err(e) => warn!("rating write failed for {}: {}", winner, e),
    }
    match fx.ratings.set_rating(loser, new_loser) {
        Ok(()) => fx.changes.push(RatingChange {
            participant: loser.to_string(),
            old_rating: old_loser,
            new_rating: new_loser,
        }),
        Err(e) => warn!("rating write failed for {}: {}", loser, e),
    }
}

fn append_history<H: HistoryStore>(
    name: &str,
    opponent: &str,
    score_for: u32,
    score_against: u32,
    result: Outcome,
    date: chrono::NaiveDate,
    history: &mut H,
) {
    let entry = HistoryEntry {
        date,
        opponent: opponent.to_string(),
        result,
        score_for,
        score_against,
    };
    if let Err(e) = history.append(name, entry) {
        warn!("history entry skipped for {}: {}", name, e);
    }
}

fn outcomes(score_a: u32, score_b: u32) -> (Outcome, Outcome) {
    if score_a > score_b {
        (Outcome::Win, Outcome::Loss)
    } else if score_b > score_a {
        (Outcome::Loss, Outcome::Win)
    } else {
        (Outcome::Draw, Outcome::Draw)
    }
}

fn winner_of(a: &str, b: &str, score_a: u32, score_b: u32) -> MatchWinner {
    if score_a > score_b {
        MatchWinner::Participant(a.to_string())
    } else if score_b > score_a {
        MatchWinner::Participant(b.to_string())
    } else {
        MatchWinner::Draw
    }
}
