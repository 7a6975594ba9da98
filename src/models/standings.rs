//! Standings bookkeeping: per-participant rows kept sorted in table order.

use serde::{Deserialize, Serialize};

/// Synthetic opponent used to balance odd participant counts. Never
/// scheduled into a real fixture and never given a standings row.
pub const BYE: &str = "Bye";

/// Result of one match from a single participant's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Aggregate record for one participant in a league, group, or knockout
/// table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub participant: String,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    /// Always `goals_scored - goals_conceded`.
    pub goal_difference: i64,
    /// 3 per win, 1 per draw.
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl StandingsRow {
    fn new(participant: &str) -> Self {
        Self {
            participant: participant.to_string(),
            ..Self::default()
        }
    }

    fn sort_key(&self) -> (u32, i64, u32, u32) {
        (self.points, self.goal_difference, self.wins, self.goals_scored)
    }

    // Goal totals saturate rather than wrap.
    fn record(&mut self, goals_for: u32, goals_against: u32, outcome: Outcome) {
        self.goals_scored = self.goals_scored.saturating_add(goals_for);
        self.goals_conceded = self.goals_conceded.saturating_add(goals_against);
        self.goal_difference = i64::from(self.goals_scored) - i64::from(self.goals_conceded);
        self.matches_played += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.points += 3;
            }
            Outcome::Draw => {
                self.draws += 1;
                self.points += 1;
            }
            Outcome::Loss => self.losses += 1,
        }
    }
}

/// Participant standings, re-sorted after every recorded result by
/// points, then goal difference, then wins, then goals scored, all
/// descending. Rows with equal keys keep their earlier order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsTable {
    rows: Vec<StandingsRow>,
}

impl StandingsTable {
    /// Zero-valued rows for every participant, in the given order. The
    /// synthetic Bye filler is skipped.
    pub fn initialize<S: AsRef<str>>(participants: &[S]) -> Self {
        let rows = participants
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| *name != BYE)
            .map(StandingsRow::new)
            .collect();
        Self { rows }
    }

    /// Record one finalized result for `participant`. Names without a row
    /// get a fresh zero row first, so tables that fill in as a bracket
    /// resolves need no separate registration step.
    pub fn record(
        &mut self,
        participant: &str,
        goals_for: u32,
        goals_against: u32,
        outcome: Outcome,
    ) {
        if participant == BYE {
            return;
        }
        let idx = match self.rows.iter().position(|r| r.participant == participant) {
            Some(idx) => idx,
            None => {
                self.rows.push(StandingsRow::new(participant));
                self.rows.len() - 1
            }
        };
        self.rows[idx].record(goals_for, goals_against, outcome);
        self.sort_rows();
    }

    pub fn row(&self, participant: &str) -> Option<&StandingsRow> {
        self.rows.iter().find(|r| r.participant == participant)
    }

    /// Rows in table order, best first.
    pub fn rows(&self) -> &[StandingsRow] {
        &self.rows
    }

    /// Names of the top `n` rows, best first.
    pub fn leaders(&self, n: usize) -> Vec<String> {
        self.rows.iter().take(n).map(|r| r.participant.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn sort_rows(&mut self) {
        self.rows.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
    }
}
