//! Tournament simulation CLI: build a tournament over the named
//! participants, play every round with random scores, and print the
//! tables, ratings, and final document.
//! Run with: cargo run --bin simulate -- league Alice Bob Carol
//! Set RUST_LOG=debug to watch individual results being applied.

use rand::Rng;
use std::env;
use tournament_engine::{
    BracketRound, Document, EloRater, MemoryHistoryStore, MemoryRatingStore, Rank, RatingChange,
    ReportedResult, Round, StandingsTable, TournamentFormat, TournamentManager,
};

fn print_usage() {
    println!("Tournament Simulator");
    println!();
    println!("Usage:");
    println!("  simulate <format> [options] <name> <name> ...");
    println!();
    println!("Formats:");
    println!("  league           - round-robin, 3 points a win");
    println!("  cup              - single-elimination knockout");
    println!("  groups_knockout  - groups feeding a knockout of the qualifiers");
    println!();
    println!("Options:");
    println!("  --home-and-away        double round-robin / two-legged ties");
    println!("  --advance N, -a N      qualifiers per group (default 2)");
    println!("  --k-factor K, -k K     Elo K-factor (default 32)");
    println!("  --seed-rating NAME=R   start NAME at rating R (repeatable)");
    println!();
    println!("Examples:");
    println!("  simulate league Alice Bob Carol Dave");
    println!("  simulate cup --home-and-away Alice Bob Carol Dave Erin");
    println!("  simulate groups_knockout -a 2 A B C D E F G H");
}

fn parse_format(arg: &str) -> Option<TournamentFormat> {
    match arg {
        "league" => Some(TournamentFormat::League),
        "cup" | "knockout" => Some(TournamentFormat::Cup),
        "groups_knockout" | "groups" => Some(TournamentFormat::GroupsKnockout),
        _ => None,
    }
}

/// Random scores for every pending fixture in a league round.
fn league_round_results(round: &Round, rng: &mut impl Rng) -> Vec<ReportedResult> {
    round
        .matches
        .iter()
        .filter(|m| !m.is_complete())
        .map(|m| {
            ReportedResult::new(
                &m.participant_a,
                &m.participant_b,
                rng.gen_range(0..=4),
                rng.gen_range(0..=4),
            )
        })
        .collect()
}

/// Random scores for every pending tie in a knockout round; two-legged
/// ties get one result per leg, with the sides swapped for leg 2.
fn knockout_round_results(round: &BracketRound, rng: &mut impl Rng) -> Vec<ReportedResult> {
    let mut results = Vec::new();
    for tie in &round.ties {
        if tie.is_complete() {
            continue;
        }
        let (a, b) = match tie.named_pair() {
            Some(pair) => pair,
            None => continue,
        };
        if tie.is_two_legged() {
            results.push(ReportedResult::for_leg(
                a,
                b,
                rng.gen_range(0..=4),
                rng.gen_range(0..=4),
                1,
            ));
            results.push(ReportedResult::for_leg(
                b,
                a,
                rng.gen_range(0..=4),
                rng.gen_range(0..=4),
                2,
            ));
        } else {
            results.push(ReportedResult::new(
                a,
                b,
                rng.gen_range(0..=4),
                rng.gen_range(0..=4),
            ));
        }
    }
    results
}

/// The next round worth reporting: its number, whether it targets the
/// knockout stage of a groups tournament, and the generated batch. None
/// once the tournament has nothing left to play.
fn next_batch(doc: &Document, rng: &mut impl Rng) -> Option<(u32, bool, Vec<ReportedResult>)> {
    match doc {
        Document::League(league) => league
            .fixtures
            .iter()
            .find(|r| !r.is_complete())
            .map(|r| (r.number, false, league_round_results(r, rng))),
        Document::Knockout(knockout) => knockout
            .rounds
            .iter()
            .find(|r| !r.is_complete())
            .map(|r| (r.number, false, knockout_round_results(r, rng))),
        Document::GroupsKnockout(groups) => {
            if !groups.groups_complete() {
                // Groups can be uneven sizes, so play the lowest round
                // number any group still has open.
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
                    .flat_map(|r| league_round_results(r, rng))
                    .collect();
                Some((number, false, results))
            } else {
                let knockout = groups.knock_outs.as_ref()?;
                knockout
                    .rounds
                    .iter()
                    .find(|r| !r.is_complete())
                    .map(|r| (r.number, true, knockout_round_results(r, rng)))
            }
        }
    }
}

fn print_table(title: &str, table: &StandingsTable) {
    println!();
    println!("=== {} ===", title);
    println!(
        "{:<20} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
        "Participant", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for row in table.rows() {
        println!(
            "{:<20} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>4}",
            row.participant,
            row.matches_played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_scored,
            row.goals_conceded,
            row.goal_difference,
            row.points
        );
    }
}

/// Winner of the final, if the bracket has fully played out.
fn champion(doc: &Document) -> Option<&str> {
    let knockout = match doc {
        Document::Knockout(knockout) => knockout,
        Document::GroupsKnockout(groups) => groups.knock_outs.as_ref()?,
        Document::League(_) => return None,
    };
    let last = knockout.rounds.last()?;
    last.ties.first().and_then(|tie| tie.winner_name())
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let format = match parse_format(&args[0]) {
        Some(format) => format,
        None => {
            eprintln!("Unknown format: {}", args[0]);
            print_usage();
            return;
        }
    };

    let mut home_or_away = false;
    let mut teams_to_advance: Option<usize> = None;
    let mut k_factor: f64 = 32.0;
    let mut seeded_ratings: Vec<String> = Vec::new();
    let mut names: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--home-and-away" => home_or_away = true,
            "--advance" | "-a" => {
                if i + 1 < args.len() {
                    teams_to_advance = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--k-factor" | "-k" => {
                if i + 1 < args.len() {
                    k_factor = args[i + 1].parse().unwrap_or(32.0);
                    i += 1;
                }
            }
            "--seed-rating" => {
                if i + 1 < args.len() {
                    seeded_ratings.push(args[i + 1].clone());
                    i += 1;
                }
            }
            name => names.push(name.to_string()),
        }
        i += 1;
    }

    if names.len() < 2 {
        eprintln!("Error: need at least two participant names");
        print_usage();
        return;
    }

    let mut ratings = MemoryRatingStore::new();
    for name in &names {
        ratings.register(name);
    }
    for seed in &seeded_ratings {
        match seed.split_once('=').map(|(name, r)| (name, r.parse::<f64>())) {
            Some((name, Ok(rating))) => ratings.insert(name, rating),
            _ => eprintln!("Warning: --seed-rating wants NAME=RATING, got {}", seed),
        }
    }
    let mut manager =
        TournamentManager::with_rater(ratings, MemoryHistoryStore::new(), EloRater::new(k_factor));

    let mut doc = match manager.create(format, &names, home_or_away, teams_to_advance) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!("=== Simulating {} with {} participants ===", format, names.len());

    let mut rng = rand::thread_rng();
    let mut rating_changes: Vec<RatingChange> = Vec::new();
    while let Some((round_number, knockout_stage, results)) = next_batch(&doc, &mut rng) {
        if results.is_empty() {
            break;
        }
        let stage = if knockout_stage { "knockout round" } else { "round" };
        println!("--- {} {}: {} result(s) ---", stage, round_number, results.len());
        rating_changes.extend(manager.report(&mut doc, round_number, &results, knockout_stage));
    }

    match &doc {
        Document::League(league) => print_table("League Table", &league.table),
        Document::Knockout(knockout) => print_table("Knockout Table", &knockout.table),
        Document::GroupsKnockout(groups) => {
            for (label, league) in &groups.group_stages {
                print_table(label, &league.table);
            }
            if let Some(knockout) = &groups.knock_outs {
                print_table("Knockout Table", &knockout.table);
            }
        }
    }

    if let Some(name) = champion(&doc) {
        println!();
        println!("Champion: {}", name);
    }

    println!();
    println!("=== Ratings ===");
    for (name, rating) in manager.ratings().leaderboard() {
        let moved: f64 = rating_changes
            .iter()
            .filter(|c| c.participant == name)
            .map(|c| c.new_rating - c.old_rating)
            .sum();
        println!(
            "{:<20} {:>7.1} ({:+6.1})  {}",
            name,
            rating,
            moved,
            Rank::for_rating(rating)
        );
    }

    match serde_json::to_string_pretty(&doc) {
        Ok(json) => {
            println!();
            println!("{}", json);
        }
        Err(e) => eprintln!("Warning: failed to serialize document: {}", e),
    }
}
