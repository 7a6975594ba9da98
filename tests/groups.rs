//! Integration tests for the groups-plus-knockout format: partitioning,
//! result fan-out, and qualifier seeding.

use tournament_engine::{
    Document, GroupKnockoutDoc, MemoryHistoryStore, MemoryRatingStore, ReportedResult,
    TournamentError, TournamentFormat, TournamentManager,
};

type MemoryManager = TournamentManager<MemoryRatingStore, MemoryHistoryStore>;

fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn manager_for(participants: &[String]) -> MemoryManager {
    let mut ratings = MemoryRatingStore::new();
    for name in participants {
        ratings.register(name);
    }
    TournamentManager::new(ratings, MemoryHistoryStore::new())
}

fn groups_doc(doc: &Document) -> &GroupKnockoutDoc {
    match doc {
        Document::GroupsKnockout(groups) => groups,
        _ => panic!("expected a groups document"),
    }
}

/// The lowest round any group still has open, with 2-1 results for every
/// pending fixture in it.
fn pending_group_batch(doc: &Document) -> Option<(u32, Vec<ReportedResult>)> {
    let groups = groups_doc(doc);
    let number = groups
        .group_stages
        .values()
        .flat_map(|league| league.fixtures.iter())
        .filter(|r| !r.is_complete())
        .map(|r| r.number)
        .min()?;
    let results = groups
        .group_stages
        .values()
        .filter_map(|league| league.round(number))
        .flat_map(|r| r.matches.iter())
        .filter(|m| !m.is_complete())
        .map(|m| ReportedResult::new(&m.participant_a, &m.participant_b, 2, 1))
        .collect();
    Some((number, results))
}

fn play_group_stage(manager: &mut MemoryManager, doc: &mut Document) {
    while let Some((number, batch)) = pending_group_batch(doc) {
        manager.report(doc, number, &batch, false);
    }
}

#[test]
fn eight_participants_split_into_two_groups_of_four() {
    let participants = numbered(8);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();
    let groups = groups_doc(&doc);

    let labels: Vec<&str> = groups.group_stages.keys().map(String::as_str).collect();
    assert_eq!(labels, ["Group A", "Group B"]);
    for league in groups.group_stages.values() {
        assert_eq!(league.table.len(), 4);
        assert_eq!(league.fixtures.len(), 3);
    }
    assert!(groups.knock_outs.is_none());
    assert_eq!(groups.teams_to_advance, 2);

    // every participant lands in exactly one group
    let mut grouped: Vec<String> = groups
        .group_stages
        .values()
        .flat_map(|league| league.table.rows().iter().map(|r| r.participant.clone()))
        .collect();
    grouped.sort();
    let mut expected = participants.clone();
    expected.sort();
    assert_eq!(grouped, expected);
}

#[test]
fn the_remainder_goes_to_the_earliest_groups() {
    let participants = numbered(9);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();
    let groups = groups_doc(&doc);

    let sizes: Vec<usize> = groups.group_stages.values().map(|l| l.table.len()).collect();
    assert_eq!(sizes, [5, 4]);
}

#[test]
fn small_entry_lists_make_a_single_group() {
    let participants = numbered(5);
    let manager = manager_for(&participants);
    let doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();
    let groups = groups_doc(&doc);

    let labels: Vec<&str> = groups.group_stages.keys().map(String::as_str).collect();
    assert_eq!(labels, ["Group A"]);
    assert_eq!(groups.group_stages["Group A"].table.len(), 5);
}

#[test]
fn zero_teams_to_advance_is_rejected() {
    let participants = numbered(8);
    let manager = manager_for(&participants);
    assert!(matches!(
        manager.create(TournamentFormat::GroupsKnockout, &participants, false, Some(0)),
        Err(TournamentError::NoQualifiers)
    ));
}

#[test]
fn a_lone_group_must_advance_at_least_two() {
    // 5 participants make a single group; advancing one could never seed
    // a knockout
    let participants = numbered(5);
    let manager = manager_for(&participants);
    assert!(matches!(
        manager.create(TournamentFormat::GroupsKnockout, &participants, false, Some(1)),
        Err(TournamentError::NoQualifiers)
    ));
}

#[test]
fn results_land_in_the_group_that_schedules_the_pair() {
    let participants = numbered(8);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();

    let (a, b) = {
        let league = &groups_doc(&doc).group_stages["Group B"];
        let m = &league.round(1).unwrap().matches[0];
        (m.participant_a.clone(), m.participant_b.clone())
    };

    manager.report(&mut doc, 1, &[ReportedResult::new(&a, &b, 3, 1)], false);

    let groups = groups_doc(&doc);
    let group_b = &groups.group_stages["Group B"];
    assert!(group_b.round(1).unwrap().matches[0].is_complete());
    assert_eq!(group_b.table.rows()[0].participant, a);
    // the other group is untouched
    let group_a = &groups.group_stages["Group A"];
    assert!(group_a.table.rows().iter().all(|r| r.matches_played == 0));
}

#[test]
fn completing_the_groups_seeds_the_knockout_with_the_leaders() {
    let participants = numbered(8);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();

    play_group_stage(&mut manager, &mut doc);

    let groups = groups_doc(&doc);
    assert!(groups.groups_complete());
    let knockout = groups.knock_outs.as_ref().expect("knockout seeded");
    assert_eq!(knockout.table.len(), 4);
    assert_eq!(knockout.rounds.len(), 2);

    // qualifiers are each group's top rows, in label order
    let mut expected: Vec<String> = Vec::new();
    for league in groups.group_stages.values() {
        expected.extend(league.table.leaders(2));
    }
    let seeded: Vec<String> = knockout
        .table
        .rows()
        .iter()
        .map(|r| r.participant.clone())
        .collect();
    assert_eq!(seeded, expected);
}

#[test]
fn knockout_batches_before_seeding_are_dropped() {
    let participants = numbered(8);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();

    let changes = manager.report(&mut doc, 1, &[ReportedResult::new("P0", "P1", 1, 0)], true);
    assert!(changes.is_empty());
    assert!(groups_doc(&doc).knock_outs.is_none());
}

#[test]
fn the_knockout_stage_plays_through_to_a_champion() {
    let participants = numbered(8);
    let mut manager = manager_for(&participants);
    let mut doc = manager
        .create(TournamentFormat::GroupsKnockout, &participants, false, Some(2))
        .unwrap();

    play_group_stage(&mut manager, &mut doc);

    loop {
        let batch: Option<(u32, Vec<ReportedResult>)> = {
            let knockout = groups_doc(&doc).knock_outs.as_ref().unwrap();
            knockout.rounds.iter().find(|r| !r.is_complete()).map(|round| {
                let results = round
                    .ties
                    .iter()
                    .filter(|t| !t.is_complete())
                    .filter_map(|t| t.named_pair())
                    .map(|(a, b)| ReportedResult::new(a, b, 2, 0))
                    .collect();
                (round.number, results)
            })
        };
        let (number, results) = match batch {
            Some(batch) => batch,
            None => break,
        };
        manager.report(&mut doc, number, &results, true);
    }

    let groups = groups_doc(&doc);
    let knockout = groups.knock_outs.as_ref().unwrap();
    assert!(knockout.is_complete());
    let final_tie = &knockout.rounds.last().unwrap().ties[0];
    let champion = final_tie.winner_name().expect("final decided");
    assert!(knockout.table.row(champion).is_some());
    // group standings were not disturbed by the knockout
    for league in groups.group_stages.values() {
        for row in league.table.rows() {
            assert_eq!(row.matches_played, 3);
        }
    }
}
