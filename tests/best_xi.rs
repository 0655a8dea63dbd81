use fantasy_terminal::best_xi::{
    self, BUDGET_MAX, BUDGET_MIN, SquadSummary, affordable_players, build_team, generate_best_xi,
};
use fantasy_terminal::fixtures::FixtureGenerator;
use fantasy_terminal::formation::{self, Formation, FormationError, SlotMap};
use fantasy_terminal::model::{Dataset, NextFixture, Player, Position, Venue};

fn player(id: u32, position: Position, form: f64, price: f64) -> Player {
    let gk = position == Position::Goalkeeper;
    Player {
        id,
        name: format!("Player {id}"),
        team: "Arsenal".to_string(),
        position,
        price,
        total_points: 50,
        form,
        xg: 1.0,
        goals: 1,
        assists: 1,
        clean_sheets: 0,
        saves: gk.then_some(40),
        tackles: (!gk).then_some(10),
        interceptions: (!gk).then_some(10),
        shot_accuracy: (!gk).then_some(40),
        key_passes: (!gk).then_some(10),
        passing_accuracy: 70,
        minutes_played: 900,
        points_per_game: 5.0,
        selected: 10.0,
        chance_of_playing: 100,
        next_fixture: NextFixture {
            opponent: "Chelsea".to_string(),
            venue: Venue::Home,
        },
    }
}

fn dataset(players: Vec<Player>) -> Dataset {
    Dataset {
        seed: 0,
        players,
        teams: Vec::new(),
        formations: formation::formations().to_vec(),
    }
}

fn four_three_three() -> &'static Formation {
    formation::find_formation("4-3-3").unwrap()
}

#[test]
fn catalog_has_five_valid_formations() {
    let all = formation::formations();
    assert_eq!(all.len(), 5);
    for f in all {
        assert_eq!(f.positions().gk, 1);
        assert_eq!(f.positions().total(), 11);
        assert_eq!(f.structure(), f.name());
    }
    assert_eq!(formation::default_formation().unwrap().name(), "4-3-3");
    assert_eq!(formation::next_formation("5-3-2").unwrap().name(), "4-3-3");
    assert!(formation::find_formation("4-2-3-1").is_none());
}

#[test]
fn formation_validation_rejects_bad_slot_maps() {
    assert_eq!(
        Formation::from_lines(4, 4, 3),
        Err(FormationError::WrongSlotCount {
            name: "4-4-3".to_string(),
            total: 12
        })
    );
    let two_keepers = SlotMap {
        gk: 2,
        def: 4,
        mid: 3,
        fwd: 2,
    };
    assert!(matches!(
        Formation::new("odd", "odd", two_keepers),
        Err(FormationError::Goalkeepers { goalkeepers: 2, .. })
    ));
    assert_eq!(
        Formation::from_lines(4, 3, 3).map(|f| f.positions().mid),
        Ok(3)
    );
}

#[test]
fn keeperless_lineup_is_rejected_even_with_eleven_slots() {
    let no_keeper = SlotMap {
        gk: 0,
        def: 5,
        mid: 3,
        fwd: 3,
    };
    assert_eq!(no_keeper.total(), 11);
    assert_eq!(
        Formation::new("5-3-3", "5-3-3", no_keeper),
        Err(FormationError::Goalkeepers {
            name: "5-3-3".to_string(),
            goalkeepers: 0
        })
    );
    assert_eq!(
        Formation::new("  ", "4-3-3", SlotMap { gk: 1, def: 4, mid: 3, fwd: 3 }),
        Err(FormationError::EmptyName)
    );
}

#[test]
fn deserialized_formations_are_validated() {
    let good = r#"{"name":"4-3-3","structure":"4-3-3","positions":{"GK":1,"DEF":4,"MID":3,"FWD":3}}"#;
    let parsed: Formation = serde_json::from_str(good).unwrap();
    assert_eq!(&parsed, formation::find_formation("4-3-3").unwrap());

    let too_many = r#"{"name":"4-4-3","structure":"4-4-3","positions":{"GK":1,"DEF":4,"MID":4,"FWD":3}}"#;
    let err = serde_json::from_str::<Formation>(too_many).unwrap_err();
    assert!(err.to_string().contains("has 12 slots"), "{err}");

    let no_keeper = r#"{"name":"5-3-3","structure":"5-3-3","positions":{"GK":0,"DEF":5,"MID":3,"FWD":3}}"#;
    assert!(serde_json::from_str::<Formation>(no_keeper).is_err());
}

#[test]
fn serialized_formation_round_trips_through_validation() {
    let original = formation::find_formation("3-5-2").unwrap();
    let json = serde_json::to_string(original).unwrap();
    assert!(json.contains(r#""MID":5"#));
    let back: Formation = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, original);
}

#[test]
fn never_exceeds_slots_and_respects_availability() {
    let data = FixtureGenerator::new(99).generate_dataset(300);
    for formation in formation::formations() {
        let xi = generate_best_xi(&data.players, formation);
        assert!(xi.len() <= 11);
        for position in Position::ALL {
            let picked = xi.iter().filter(|p| p.position == position).count() as u32;
            assert!(picked <= formation.slots(position));
        }
        assert!(xi.iter().all(|p| p.chance_of_playing > 75));
    }
}

#[test]
fn doubtful_players_are_skipped() {
    let mut doubtful = player(1, Position::Goalkeeper, 9.9, 5.0);
    doubtful.chance_of_playing = 75;
    let fit = player(2, Position::Goalkeeper, 1.0, 5.0);
    let xi = generate_best_xi(&[doubtful, fit], four_three_three());
    assert_eq!(xi.len(), 1);
    assert_eq!(xi[0].id, 2);
}

#[test]
fn picks_highest_form_and_orders_lines() {
    let players = vec![
        player(1, Position::Forward, 6.0, 5.0),
        player(2, Position::Forward, 9.0, 5.0),
        player(3, Position::Forward, 7.0, 5.0),
        player(4, Position::Forward, 8.0, 5.0),
        player(5, Position::Goalkeeper, 5.0, 5.0),
        player(6, Position::Defender, 5.0, 5.0),
    ];
    let xi = generate_best_xi(&players, four_three_three());
    let ids: Vec<u32> = xi.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5, 6, 2, 4, 3]);
}

#[test]
fn equal_form_keeps_input_order() {
    let players = vec![
        player(10, Position::Midfielder, 7.0, 5.0),
        player(11, Position::Midfielder, 7.0, 5.0),
        player(12, Position::Midfielder, 7.0, 5.0),
        player(13, Position::Midfielder, 7.0, 5.0),
    ];
    let xi = generate_best_xi(&players, four_three_three());
    let ids: Vec<u32> = xi.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn short_lines_stay_short() {
    let players = vec![
        player(1, Position::Goalkeeper, 5.0, 5.0),
        player(2, Position::Defender, 5.0, 5.0),
    ];
    let formation = four_three_three();
    let xi = generate_best_xi(&players, formation);
    assert_eq!(xi.len(), 2);

    let summary = SquadSummary::new(&xi, formation, 100.0);
    assert_eq!(summary.unfilled_slots, 9);
    assert_eq!(summary.count(Position::Defender), 1);
    assert_eq!(summary.count(Position::Forward), 0);
}

#[test]
fn unknown_formation_builds_empty_team() {
    let data = dataset(vec![player(1, Position::Goalkeeper, 5.0, 5.0)]);
    assert!(build_team(&data, "4-2-3-1", 100.0).is_empty());
}

#[test]
fn affordability_uses_per_slot_share() {
    let players = vec![
        player(1, Position::Goalkeeper, 5.0, 9.0),
        player(2, Position::Goalkeeper, 5.0, 9.1),
        player(3, Position::Goalkeeper, 5.0, 4.5),
    ];
    let kept: Vec<u32> = affordable_players(&players, 100.0).iter().map(|p| p.id).collect();
    assert_eq!(kept, vec![1, 3]);
    assert!(affordable_players(&players, 40.0).is_empty());
}

#[test]
fn build_team_filters_then_picks() {
    let data = dataset(vec![
        player(1, Position::Goalkeeper, 9.0, 12.0),
        player(2, Position::Goalkeeper, 4.0, 6.0),
    ]);
    let xi = build_team(&data, "4-4-2", 100.0);
    assert_eq!(xi.len(), 1);
    assert_eq!(xi[0].id, 2);
}

#[test]
fn summary_flags_over_budget() {
    let xi: Vec<Player> = (0..11)
        .map(|id| player(id, Position::Midfielder, 5.0, 5.0))
        .collect();
    let formation = four_three_three();
    assert_eq!(best_xi::total_cost(&xi), 55.0);

    let within = SquadSummary::new(&xi, formation, 55.0);
    assert!(!within.over_budget);
    let over = SquadSummary::new(&xi, formation, 54.0);
    assert!(over.over_budget);
}

#[test]
fn budget_adjustment_clamps() {
    assert_eq!(best_xi::adjust_budget(BUDGET_MAX, 10), BUDGET_MAX);
    assert_eq!(best_xi::adjust_budget(BUDGET_MIN, -1), BUDGET_MIN);
    assert_eq!(best_xi::adjust_budget(100, -10), 90);
}
