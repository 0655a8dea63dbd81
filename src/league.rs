use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::model::{LeagueZone, Team, round1};

pub const DEFENSIVE_RANKING_SIZE: usize = 10;
pub const SEASONS_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueView {
    Table,
    Attacking,
    Defensive,
    Possession,
}

impl LeagueView {
    pub const ALL: [LeagueView; 4] = [
        LeagueView::Table,
        LeagueView::Attacking,
        LeagueView::Defensive,
        LeagueView::Possession,
    ];

    pub fn next(self) -> Self {
        match self {
            LeagueView::Table => LeagueView::Attacking,
            LeagueView::Attacking => LeagueView::Defensive,
            LeagueView::Defensive => LeagueView::Possession,
            LeagueView::Possession => LeagueView::Table,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeagueView::Table => "League Table",
            LeagueView::Attacking => "Attacking Stats",
            LeagueView::Defensive => "Defensive Stats",
            LeagueView::Possession => "Possession Stats",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Position,
    Points,
    GoalDifference,
    Xg,
    Xga,
    Possession,
    CleanSheets,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Position,
        SortKey::Points,
        SortKey::GoalDifference,
        SortKey::Xg,
        SortKey::Xga,
        SortKey::Possession,
        SortKey::CleanSheets,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Position => "#",
            SortKey::Points => "PTS",
            SortKey::GoalDifference => "GD",
            SortKey::Xg => "xG",
            SortKey::Xga => "xGA",
            SortKey::Possession => "POSS",
            SortKey::CleanSheets => "CS",
        }
    }

    fn compare(self, a: &Team, b: &Team) -> Ordering {
        match self {
            SortKey::Position => a.position.cmp(&b.position),
            SortKey::Points => a.points.cmp(&b.points),
            SortKey::GoalDifference => a.gd.cmp(&b.gd),
            SortKey::Xg => a.xg.total_cmp(&b.xg),
            SortKey::Xga => a.xga.total_cmp(&b.xga),
            SortKey::Possession => a.possession.total_cmp(&b.possession),
            SortKey::CleanSheets => a.clean_sheets.cmp(&b.clean_sheets),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            key: SortKey::Position,
            direction: SortDirection::Asc,
        }
    }
}

impl TableSort {
    /// Clicking the active column flips direction; a new column starts ascending.
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn next_key(&self) -> SortKey {
        let idx = SortKey::ALL
            .iter()
            .position(|k| *k == self.key)
            .map(|i| (i + 1) % SortKey::ALL.len())
            .unwrap_or(0);
        SortKey::ALL[idx]
    }

    /// Stable: teams that compare equal keep their table order.
    pub fn apply<'a>(&self, teams: &'a [Team]) -> Vec<&'a Team> {
        let mut sorted: Vec<&Team> = teams.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = self.key.compare(a, b);
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinishingTone {
    Over,
    Under,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgVsGoals {
    pub name: String,
    pub xg: f64,
    pub goals: u32,
    pub difference: f64,
    pub tone: FinishingTone,
}

pub fn xg_vs_goals(teams: &[Team]) -> Vec<XgVsGoals> {
    teams
        .iter()
        .map(|t| {
            let goals = t.gf as f64;
            let tone = if goals > t.xg {
                FinishingTone::Over
            } else if goals < t.xg {
                FinishingTone::Under
            } else {
                FinishingTone::Even
            };
            XgVsGoals {
                name: t.short_name.clone(),
                xg: t.xg,
                goals: t.gf,
                difference: round1(goals - t.xg),
                tone,
            }
        })
        .collect()
}

/// Same series ordered by finishing delta, best first.
pub fn by_difference(mut rows: Vec<XgVsGoals>) -> Vec<XgVsGoals> {
    rows.sort_by(|a, b| b.difference.total_cmp(&a.difference));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefensiveRow {
    pub name: String,
    pub clean_sheets: u32,
    pub goals_against: u32,
    pub xga: f64,
}

pub fn defensive_ranking(teams: &[Team]) -> Vec<DefensiveRow> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by(|a, b| b.clean_sheets.cmp(&a.clean_sheets));
    sorted
        .into_iter()
        .take(DEFENSIVE_RANKING_SIZE)
        .map(|t| DefensiveRow {
            name: t.short_name.clone(),
            clean_sheets: t.clean_sheets,
            goals_against: t.ga,
            xga: t.xga,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossessionPoint {
    pub name: String,
    pub possession: f64,
    pub pass_accuracy: f64,
    pub goals: u32,
    pub position: u32,
    pub zone: LeagueZone,
}

/// Possession against pass accuracy. Teams carry no pass accuracy, so it is drawn from
/// `[30, 70)`; callers pass a seeded rng and cache the result for the session.
pub fn possession_points<R: Rng + ?Sized>(teams: &[Team], rng: &mut R) -> Vec<PossessionPoint> {
    teams
        .iter()
        .map(|t| PossessionPoint {
            name: t.short_name.clone(),
            possession: t.possession,
            pass_accuracy: round1(30.0 + rng.r#gen::<f64>() * 40.0),
            goals: t.gf,
            position: t.position,
            zone: t.zone(),
        })
        .collect()
}

/// "2024/25" style label for the season a date falls in. Seasons roll over in August.
pub fn season_label(date: NaiveDate) -> String {
    let start = if date.month() >= 8 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}/{:02}", start, (start + 1) % 100)
}

/// Current season first, then the ones before it.
pub fn recent_seasons(today: NaiveDate, count: usize) -> Vec<String> {
    let current_start = if today.month() >= 8 {
        today.year()
    } else {
        today.year() - 1
    };
    (0..count as i32)
        .filter_map(|back| NaiveDate::from_ymd_opt(current_start - back, 9, 1))
        .map(season_label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_rolls_over_in_august() {
        let july = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        let august = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(season_label(july), "2023/24");
        assert_eq!(season_label(august), "2024/25");
    }

    #[test]
    fn recent_seasons_count_back() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(
            recent_seasons(today, 3),
            vec!["2023/24".to_string(), "2022/23".to_string(), "2021/22".to_string()]
        );
    }

    #[test]
    fn century_rollover_pads() {
        let date = NaiveDate::from_ymd_opt(2099, 9, 1).unwrap();
        assert_eq!(season_label(date), "2099/00");
    }
}
