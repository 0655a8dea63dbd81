use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use fantasy_terminal::fixtures::FixtureGenerator;
use fantasy_terminal::league::{
    self, DEFENSIVE_RANKING_SIZE, FinishingTone, LeagueView, SortDirection, SortKey, TableSort,
};
use fantasy_terminal::model::{LeagueZone, Team};

fn teams() -> Vec<Team> {
    FixtureGenerator::new(2024).generate_dataset(22).teams
}

#[test]
fn default_sort_is_table_order() {
    let teams = teams();
    let sort = TableSort::default();
    let order: Vec<u32> = sort.apply(&teams).iter().map(|t| t.position).collect();
    assert_eq!(order, (1..=20).collect::<Vec<_>>());
}

#[test]
fn clicking_same_column_toggles_direction() {
    let mut sort = TableSort::default();
    sort.click(SortKey::Points);
    assert_eq!(sort.key, SortKey::Points);
    assert_eq!(sort.direction, SortDirection::Asc);

    sort.click(SortKey::Points);
    assert_eq!(sort.direction, SortDirection::Desc);

    sort.click(SortKey::Xg);
    assert_eq!(sort.key, SortKey::Xg);
    assert_eq!(sort.direction, SortDirection::Asc);
}

#[test]
fn descending_points_sort() {
    let teams = teams();
    let mut sort = TableSort::default();
    sort.click(SortKey::Points);
    sort.click(SortKey::Points);
    let sorted = sort.apply(&teams);
    assert!(sorted.windows(2).all(|w| w[0].points >= w[1].points));
}

#[test]
fn equal_keys_keep_table_order() {
    let mut teams = teams();
    for t in teams.iter_mut() {
        t.possession = 50.0;
    }
    let mut sort = TableSort::default();
    sort.click(SortKey::Possession);
    let order: Vec<u32> = sort.apply(&teams).iter().map(|t| t.position).collect();
    assert_eq!(order, (1..=20).collect::<Vec<_>>());
}

#[test]
fn sort_keys_cycle_through_all() {
    let mut sort = TableSort::default();
    let mut seen = Vec::new();
    for _ in 0..SortKey::ALL.len() {
        let key = sort.next_key();
        sort.click(key);
        seen.push(key);
    }
    assert_eq!(seen.last(), Some(&SortKey::Position));
    assert_eq!(seen.len(), 7);
}

#[test]
fn league_views_wrap() {
    let mut view = LeagueView::Table;
    for _ in 0..LeagueView::ALL.len() {
        view = view.next();
    }
    assert_eq!(view, LeagueView::Table);
}

#[test]
fn xg_vs_goals_tones() {
    let teams = teams();
    let rows = league::xg_vs_goals(&teams);
    assert_eq!(rows.len(), teams.len());
    for (row, team) in rows.iter().zip(&teams) {
        assert_eq!(row.name, team.short_name);
        let expected = if (team.gf as f64) > team.xg {
            FinishingTone::Over
        } else if (team.gf as f64) < team.xg {
            FinishingTone::Under
        } else {
            FinishingTone::Even
        };
        assert_eq!(row.tone, expected);
    }

    let ordered = league::by_difference(rows);
    assert!(ordered.windows(2).all(|w| w[0].difference >= w[1].difference));
}

#[test]
fn defensive_ranking_top_ten() {
    let teams = teams();
    let rows = league::defensive_ranking(&teams);
    assert_eq!(rows.len(), DEFENSIVE_RANKING_SIZE);
    assert!(rows.windows(2).all(|w| w[0].clean_sheets >= w[1].clean_sheets));
    let best = teams.iter().map(|t| t.clean_sheets).max().unwrap();
    assert_eq!(rows[0].clean_sheets, best);
}

#[test]
fn possession_points_are_seeded() {
    let teams = teams();
    let a = league::possession_points(&teams, &mut StdRng::seed_from_u64(9));
    let b = league::possession_points(&teams, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
    for (point, team) in a.iter().zip(&teams) {
        assert!((30.0..=70.0).contains(&point.pass_accuracy));
        assert_eq!(point.possession, team.possession);
        assert_eq!(point.zone, LeagueZone::for_position(team.position));
    }
}

#[test]
fn zones_split_the_table() {
    assert_eq!(LeagueZone::for_position(6), LeagueZone::Top);
    assert_eq!(LeagueZone::for_position(7), LeagueZone::Mid);
    assert_eq!(LeagueZone::for_position(14), LeagueZone::Mid);
    assert_eq!(LeagueZone::for_position(15), LeagueZone::Bottom);
}

#[test]
fn seasons_from_autumn_date() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(
        league::recent_seasons(today, 2),
        vec!["2026/27".to_string(), "2025/26".to_string()]
    );
}
