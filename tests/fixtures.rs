use std::collections::HashSet;

use fantasy_terminal::fixtures::{CLUBS, FixtureGenerator, LEAGUE_SIZE};
use fantasy_terminal::model::{FORM_LENGTH, Player, Position};
use fantasy_terminal::scoring::{self, SeasonLine};

#[test]
fn same_seed_same_dataset() {
    let a = FixtureGenerator::new(42).generate_dataset(100);
    let b = FixtureGenerator::new(42).generate_dataset(100);
    assert_eq!(a.players, b.players);
    assert_eq!(a.teams, b.teams);
    assert_eq!(a.seed, 42);

    let c = FixtureGenerator::new(43).generate_dataset(100);
    assert_ne!(a.players, c.players);
}

#[test]
fn optional_stats_follow_position() {
    let dataset = FixtureGenerator::new(7).generate_dataset(300);
    for p in &dataset.players {
        let gk = p.position == Position::Goalkeeper;
        assert_eq!(p.saves.is_some(), gk, "{} saves", p.name);
        assert_eq!(p.tackles.is_some(), !gk, "{} tackles", p.name);
        assert_eq!(p.interceptions.is_some(), !gk, "{} interceptions", p.name);
        assert_eq!(p.shot_accuracy.is_some(), !gk, "{} shot accuracy", p.name);
        assert_eq!(p.key_passes.is_some(), !gk, "{} key passes", p.name);
    }
}

#[test]
fn player_values_stay_in_range() {
    let dataset = FixtureGenerator::new(11).generate_dataset(300);
    assert_eq!(dataset.players.len(), 300);
    for (idx, p) in dataset.players.iter().enumerate() {
        assert_eq!(p.id, idx as u32 + 1);
        assert!((4.0..=12.0).contains(&p.price), "price {}", p.price);
        assert!((0.0..=10.0).contains(&p.form), "form {}", p.form);
        assert!((500..2500).contains(&p.minutes_played));
        assert!(p.chance_of_playing == 100 || p.chance_of_playing <= 75);
        assert!(CLUBS.iter().any(|(name, _)| *name == p.team));

        let expected = scoring::total_points(&SeasonLine {
            position: p.position,
            goals: p.goals,
            assists: p.assists,
            clean_sheets: p.clean_sheets,
            minutes_played: p.minutes_played,
            saves: p.saves,
        });
        assert_eq!(p.total_points, expected);
        assert_eq!(
            p.points_per_game,
            scoring::points_per_game(p.total_points, p.minutes_played)
        );

        match p.position {
            Position::Goalkeeper => assert_eq!(p.goals, 0),
            Position::Forward => {
                assert!(p.goals >= 5);
                assert_eq!(p.clean_sheets, 0);
            }
            _ => {}
        }
    }
}

type Field = fn(&Player) -> Option<u32>;

const GK: Position = Position::Goalkeeper;
const DEF: Position = Position::Defender;
const MID: Position = Position::Midfielder;
const FWD: Position = Position::Forward;

/// Half-open draw range per position and stat.
const STAT_RANGES: &[(Position, &str, Field, u32, u32)] = &[
    (GK, "goals", |p| Some(p.goals), 0, 1),
    (GK, "assists", |p| Some(p.assists), 0, 1),
    (GK, "clean_sheets", |p| Some(p.clean_sheets), 0, 10),
    (GK, "saves", |p| p.saves, 30, 100),
    (GK, "passing_accuracy", |p| Some(p.passing_accuracy), 30, 70),
    (DEF, "goals", |p| Some(p.goals), 0, 4),
    (DEF, "assists", |p| Some(p.assists), 0, 5),
    (DEF, "clean_sheets", |p| Some(p.clean_sheets), 0, 12),
    (DEF, "tackles", |p| p.tackles, 20, 100),
    (DEF, "interceptions", |p| p.interceptions, 10, 70),
    (DEF, "shot_accuracy", |p| p.shot_accuracy, 0, 1),
    (DEF, "key_passes", |p| p.key_passes, 0, 1),
    (DEF, "passing_accuracy", |p| Some(p.passing_accuracy), 40, 80),
    (MID, "goals", |p| Some(p.goals), 0, 10),
    (MID, "assists", |p| Some(p.assists), 0, 12),
    (MID, "clean_sheets", |p| Some(p.clean_sheets), 0, 8),
    (MID, "tackles", |p| p.tackles, 10, 60),
    (MID, "interceptions", |p| p.interceptions, 5, 35),
    (MID, "shot_accuracy", |p| p.shot_accuracy, 30, 70),
    (MID, "key_passes", |p| p.key_passes, 10, 60),
    (MID, "passing_accuracy", |p| Some(p.passing_accuracy), 50, 90),
    (FWD, "goals", |p| Some(p.goals), 5, 25),
    (FWD, "assists", |p| Some(p.assists), 0, 10),
    (FWD, "clean_sheets", |p| Some(p.clean_sheets), 0, 1),
    (FWD, "tackles", |p| p.tackles, 0, 1),
    (FWD, "interceptions", |p| p.interceptions, 0, 1),
    (FWD, "shot_accuracy", |p| p.shot_accuracy, 40, 80),
    (FWD, "key_passes", |p| p.key_passes, 5, 35),
    (FWD, "passing_accuracy", |p| Some(p.passing_accuracy), 40, 80),
];

#[test]
fn per_position_stats_cover_their_ranges() {
    let dataset = FixtureGenerator::new(123).generate_dataset(5000);

    for (position, field, get, lo, hi) in STAT_RANGES {
        let values: Vec<u32> = dataset
            .players
            .iter()
            .filter(|p| p.position == *position)
            .map(|p| get(p).unwrap_or_else(|| panic!("{} {field} missing", position.code())))
            .collect();
        assert!(values.len() > 500, "{} players: {}", position.code(), values.len());

        let min = values.iter().copied().min().unwrap();
        let max = values.iter().copied().max().unwrap();
        assert_eq!(min, *lo, "{} {field} min", position.code());
        assert_eq!(max, hi - 1, "{} {field} max", position.code());
    }

    for p in &dataset.players {
        let cap = p.goals as f64 * 1.2;
        assert!(p.xg >= 0.0 && p.xg <= cap + 1e-9, "{} xg {} for {} goals", p.name, p.xg, p.goals);
        if p.position == Position::Goalkeeper {
            assert_eq!(p.xg, 0.0);
        }
    }
}

#[test]
fn goalkeeper_golden_points() {
    let line = SeasonLine {
        position: Position::Goalkeeper,
        goals: 0,
        assists: 0,
        clean_sheets: 3,
        minutes_played: 900,
        saves: Some(60),
    };
    assert_eq!(scoring::total_points(&line), 52);
}

#[test]
fn saves_ignored_for_outfield_players() {
    let line = SeasonLine {
        position: Position::Defender,
        goals: 1,
        assists: 0,
        clean_sheets: 2,
        minutes_played: 90,
        saves: Some(30),
    };
    assert_eq!(scoring::total_points(&line), 4 + 8 + 2);
}

#[test]
fn team_table_is_consistent() {
    let dataset = FixtureGenerator::new(5).generate_dataset(50);
    assert_eq!(dataset.teams.len(), LEAGUE_SIZE);

    let positions: HashSet<u32> = dataset.teams.iter().map(|t| t.position).collect();
    assert_eq!(positions, (1..=LEAGUE_SIZE as u32).collect::<HashSet<_>>());

    let ordered: Vec<u32> = dataset.teams.iter().map(|t| t.position).collect();
    let mut sorted = ordered.clone();
    sorted.sort();
    assert_eq!(ordered, sorted);

    for t in &dataset.teams {
        assert_eq!(t.played, t.won + t.drawn + t.lost);
        assert!((28..=33).contains(&t.played));
        assert_eq!(t.gd, t.gf as i32 - t.ga as i32);
        assert_eq!(t.points, t.won * 3 + t.drawn);
        assert_eq!(t.form.len(), FORM_LENGTH);
        assert_eq!(t.form_string().len(), FORM_LENGTH);
        assert!((40.0..=65.0).contains(&t.possession));
        assert!(t.clean_sheets < 15);
    }
}

#[test]
fn dataset_carries_formation_catalog() {
    let dataset = FixtureGenerator::new(1).generate_dataset(22);
    let names: Vec<&str> = dataset.formations.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["4-3-3", "4-4-2", "3-5-2", "3-4-3", "5-3-2"]);
}

#[test]
fn dataset_serializes_with_position_codes() {
    let dataset = FixtureGenerator::new(3).generate_dataset(10);
    let json = serde_json::to_value(&dataset).unwrap();
    let first = &json["players"][0];
    let code = first["position"].as_str().unwrap();
    assert!(["GK", "DEF", "MID", "FWD"].contains(&code));
    assert_eq!(json["teams"].as_array().unwrap().len(), LEAGUE_SIZE);
}
