//! Integration tests for leagues: circle-method schedules, standings
//! updates, and replay safety.

use tournament_engine::{
    Document, LeagueDoc, MatchWinner, MemoryHistoryStore, MemoryRatingStore, ReportedResult,
    StandingsRow, TournamentFormat, TournamentManager,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn manager_for(
    participants: &[String],
) -> TournamentManager<MemoryRatingStore, MemoryHistoryStore> {
    let mut ratings = MemoryRatingStore::new();
    for name in participants {
        ratings.register(name);
    }
    TournamentManager::new(ratings, MemoryHistoryStore::new())
}

fn league_doc(doc: &Document) -> &LeagueDoc {
    match doc {
        Document::League(league) => league,
        _ => panic!("expected a league document"),
    }
}

#[test]
fn even_count_schedules_everyone_once_per_round() {
    let participants = numbered(8);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();
    let league = league_doc(&doc);

    assert_eq!(league.fixtures.len(), 7);
    for round in &league.fixtures {
        assert_eq!(round.matches.len(), 4);
        let mut seen: Vec<&str> = round
            .matches
            .iter()
            .flat_map(|m| [m.participant_a.as_str(), m.participant_b.as_str()])
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    // every pair meets exactly once: 8 choose 2
    let mut pairs: Vec<(String, String)> = league
        .fixtures
        .iter()
        .flat_map(|r| r.matches.iter())
        .map(|m| {
            let mut pair = [m.participant_a.clone(), m.participant_b.clone()];
            pair.sort();
            (pair[0].clone(), pair[1].clone())
        })
        .collect();
    assert_eq!(pairs.len(), 28);
    pairs.sort();
    pairs.dedup();
    assert_eq!(pairs.len(), 28);
}

#[test]
fn odd_count_sits_one_participant_out_each_round() {
    let participants = numbered(5);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();
    let league = league_doc(&doc);

    assert_eq!(league.fixtures.len(), 5);
    for round in &league.fixtures {
        // 5 + Bye gives 3 pairings, one of which is dropped
        assert_eq!(round.matches.len(), 2);
        let mut seen: Vec<&str> = round
            .matches
            .iter()
            .flat_map(|m| [m.participant_a.as_str(), m.participant_b.as_str()])
            .collect();
        assert!(!seen.contains(&"Bye"));
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
    assert_eq!(league.table.len(), 5);
}

#[test]
fn three_participant_league_starts_with_a_against_c() {
    let participants = names(&["A", "B", "C"]);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();
    let league = league_doc(&doc);

    assert_eq!(league.fixtures.len(), 3);
    let round1 = league.round(1).unwrap();
    assert_eq!(round1.matches.len(), 1);
    assert!(round1.matches[0].pairs("A", "C"));
}

#[test]
fn home_and_away_mirrors_the_second_cycle() {
    let participants = numbered(4);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::League, &participants, true, None)
        .unwrap();
    let league = league_doc(&doc);

    assert_eq!(league.fixtures.len(), 6);
    for number in 1..=3 {
        let first = league.round(number).unwrap();
        let second = league.round(number + 3).unwrap();
        assert_eq!(first.matches.len(), second.matches.len());
        for (original, mirrored) in first.matches.iter().zip(&second.matches) {
            assert!(mirrored.pairs(&original.participant_b, &original.participant_a));
        }
    }
}

#[test]
fn reporting_finalizes_the_match_and_reorders_the_table() {
    let participants = names(&["A", "B", "C"]);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();

    manager.report(&mut doc, 1, &[ReportedResult::new("A", "C", 2, 1)], false);

    let league = league_doc(&doc);
    let m = &league.round(1).unwrap().matches[0];
    assert!(m.is_complete());
    assert_eq!(m.score_a, Some(2));
    assert_eq!(m.score_b, Some(1));
    assert_eq!(m.winner, Some(MatchWinner::Participant("A".to_string())));

    let rows = league.table.rows();
    assert_eq!(rows[0].participant, "A");
    assert_eq!(rows[0].points, 3);
    assert_eq!(rows[0].goal_difference, 1);
    let c = league.table.row("C").unwrap();
    assert_eq!(c.points, 0);
    assert_eq!(c.losses, 1);
    // B has not played and keeps a zero row
    let b = league.table.row("B").unwrap();
    assert_eq!(b.matches_played, 0);
    assert_eq!(league.table.len(), 3);
}

#[test]
fn draws_score_one_point_each() {
    let participants = names(&["A", "B"]);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();

    manager.report(&mut doc, 1, &[ReportedResult::new("A", "B", 1, 1)], false);

    let league = league_doc(&doc);
    assert_eq!(
        league.round(1).unwrap().matches[0].winner,
        Some(MatchWinner::Draw)
    );
    for row in league.table.rows() {
        assert_eq!(row.points, 1);
        assert_eq!(row.draws, 1);
    }
}

#[test]
fn reversed_names_do_not_match_a_fixture() {
    let participants = names(&["A", "B", "C"]);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();

    // round 1 schedules A vs C, so C vs A is not a fixture
    manager.report(&mut doc, 1, &[ReportedResult::new("C", "A", 0, 3)], false);

    let league = league_doc(&doc);
    assert!(!league.round(1).unwrap().matches[0].is_complete());
    assert!(league.table.rows().iter().all(|r| r.matches_played == 0));
}

#[test]
fn replaying_a_result_changes_nothing() {
    let participants = names(&["A", "B", "C"]);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();

    manager.report(&mut doc, 1, &[ReportedResult::new("A", "C", 2, 1)], false);
    let after_first = league_doc(&doc).clone();

    // same fixture again, different score: the first result stands
    let changes = manager.report(&mut doc, 1, &[ReportedResult::new("A", "C", 5, 0)], false);
    assert!(changes.is_empty());
    assert_eq!(league_doc(&doc), &after_first);
}

#[test]
fn unknown_round_is_skipped_without_touching_the_document() {
    let participants = names(&["A", "B"]);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();
    let before = doc.clone();

    let changes = manager.report(&mut doc, 99, &[ReportedResult::new("A", "B", 1, 0)], false);
    assert!(changes.is_empty());
    assert_eq!(doc, before);
}

#[test]
fn completed_league_satisfies_the_points_arithmetic() {
    let participants = numbered(5);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::League, &participants, false, None)
        .unwrap();

    for number in 1..=5 {
        let batch: Vec<ReportedResult> = league_doc(&doc)
            .round(number)
            .unwrap()
            .matches
            .iter()
            .map(|m| ReportedResult::new(&m.participant_a, &m.participant_b, 2, 0))
            .collect();
        manager.report(&mut doc, number, &batch, false);
    }

    let league = league_doc(&doc);
    assert!(league.is_complete());

    let total_matches = 10; // 5 choose 2
    let rows = league.table.rows();
    assert_eq!(rows.iter().map(|r| r.matches_played).sum::<u32>(), 2 * total_matches);
    assert_eq!(rows.iter().map(|r| r.points).sum::<u32>(), 3 * total_matches);
    for row in rows {
        assert_eq!(row.matches_played, 4);
        assert_eq!(row.points, 3 * row.wins + row.draws);
        assert_eq!(
            row.goal_difference,
            i64::from(row.goals_scored) - i64::from(row.goals_conceded)
        );
    }

    // rows stay sorted by the table's tie-break order
    let key = |r: &StandingsRow| (r.points, r.goal_difference, r.wins, r.goals_scored);
    for pair in rows.windows(2) {
        assert!(key(&pair[0]) >= key(&pair[1]));
    }
}
