//! Stat catalogs shared by the comparison screen and the league view.
//!
//! Every stat is a `StatDef`: a stable key, a display label, a category and an accessor that
//! returns `None` when the stat does not apply to that entity (a goalkeeper's tackles, say).

use std::fmt;

use once_cell::sync::Lazy;

use crate::model::{LeagueZone, Player, Position, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Attacking,
    Defensive,
    Passing,
    Physical,
    Possession,
    Form,
}

impl StatCategory {
    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Attacking => "Attacking Stats",
            StatCategory::Defensive => "Defensive Stats",
            StatCategory::Passing => "Passing & Playmaking",
            StatCategory::Physical => "Physical",
            StatCategory::Possession => "Possession",
            StatCategory::Form => "Form & Performance",
        }
    }
}

/// A stat reading. `Missing` is shown as "N/A" and counts as zero in chart series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Value(f64),
    Missing,
}

impl StatValue {
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => StatValue::Value(v),
            None => StatValue::Missing,
        }
    }

    pub fn or_zero(self) -> f64 {
        match self {
            StatValue::Value(v) => v,
            StatValue::Missing => 0.0,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, StatValue::Missing)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Value(v) if v.fract() == 0.0 => write!(f, "{v:.0}"),
            StatValue::Value(v) => write!(f, "{v:.1}"),
            StatValue::Missing => f.write_str("N/A"),
        }
    }
}

pub struct StatDef<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub category: StatCategory,
    pub description: &'static str,
    pub accessor: fn(&T) -> Option<f64>,
}

impl<T> StatDef<T> {
    pub fn value(&self, subject: &T) -> StatValue {
        StatValue::from_option((self.accessor)(subject))
    }
}

impl<T> fmt::Debug for StatDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatDef")
            .field("key", &self.key)
            .field("category", &self.category)
            .finish()
    }
}

/// Something that can be put side by side on the comparison screen.
pub trait StatSubject: Clone + Sized + 'static {
    /// Coarse bucket the picker can filter on.
    type Group: Copy + PartialEq + fmt::Debug;
    /// Prompt shown while nothing is selected.
    const PLACEHOLDER: &'static str;

    fn subject_id(&self) -> u32;
    fn group(&self) -> Self::Group;
    fn display_name(&self) -> &str;
    /// Short secondary line for pickers, e.g. "MID - Arsenal".
    fn caption(&self) -> String;
    fn stat_catalog() -> &'static [StatDef<Self>];
    fn categories() -> &'static [StatCategory];
}

fn count(value: u32) -> Option<f64> {
    Some(value as f64)
}

fn opt_count(value: Option<u32>) -> Option<f64> {
    value.map(|v| v as f64)
}

static PLAYER_STATS: Lazy<Vec<StatDef<Player>>> = Lazy::new(|| {
    vec![
        StatDef {
            key: "goals",
            label: "Goals",
            category: StatCategory::Attacking,
            description: "Total goals scored",
            accessor: |p| count(p.goals),
        },
        StatDef {
            key: "assists",
            label: "Assists",
            category: StatCategory::Attacking,
            description: "Total assists",
            accessor: |p| count(p.assists),
        },
        StatDef {
            key: "xG",
            label: "Expected Goals (xG)",
            category: StatCategory::Attacking,
            description: "Expected goals based on chance quality",
            accessor: |p| Some(p.xg),
        },
        StatDef {
            key: "shotAccuracy",
            label: "Shot Accuracy %",
            category: StatCategory::Attacking,
            description: "Percentage of shots on target",
            accessor: |p| opt_count(p.shot_accuracy),
        },
        StatDef {
            key: "tackles",
            label: "Tackles",
            category: StatCategory::Defensive,
            description: "Number of successful tackles",
            accessor: |p| opt_count(p.tackles),
        },
        StatDef {
            key: "interceptions",
            label: "Interceptions",
            category: StatCategory::Defensive,
            description: "Number of interceptions",
            accessor: |p| opt_count(p.interceptions),
        },
        StatDef {
            key: "cleanSheets",
            label: "Clean Sheets",
            category: StatCategory::Defensive,
            description: "Matches without conceding a goal",
            accessor: |p| count(p.clean_sheets),
        },
        StatDef {
            key: "saves",
            label: "Saves",
            category: StatCategory::Defensive,
            description: "Shots stopped (goalkeepers)",
            accessor: |p| opt_count(p.saves),
        },
        StatDef {
            key: "passingAccuracy",
            label: "Pass Accuracy %",
            category: StatCategory::Passing,
            description: "Percentage of successful passes",
            accessor: |p| count(p.passing_accuracy),
        },
        StatDef {
            key: "keyPasses",
            label: "Key Passes",
            category: StatCategory::Passing,
            description: "Passes leading to a shot",
            accessor: |p| opt_count(p.key_passes),
        },
        StatDef {
            key: "form",
            label: "Form Rating",
            category: StatCategory::Form,
            description: "Player form rating (out of 10)",
            accessor: |p| Some(p.form),
        },
        StatDef {
            key: "totalPoints",
            label: "Total Points",
            category: StatCategory::Form,
            description: "Fantasy points accumulated",
            accessor: |p| count(p.total_points),
        },
        StatDef {
            key: "pointsPerGame",
            label: "Points Per Game",
            category: StatCategory::Form,
            description: "Average fantasy points per game",
            accessor: |p| Some(p.points_per_game),
        },
    ]
});

static TEAM_STATS: Lazy<Vec<StatDef<Team>>> = Lazy::new(|| {
    vec![
        StatDef {
            key: "gf",
            label: "Goals For",
            category: StatCategory::Attacking,
            description: "Goals scored this season",
            accessor: |t| count(t.gf),
        },
        StatDef {
            key: "xG",
            label: "Expected Goals (xG)",
            category: StatCategory::Attacking,
            description: "Expected goals based on chance quality",
            accessor: |t| Some(t.xg),
        },
        StatDef {
            key: "ga",
            label: "Goals Against",
            category: StatCategory::Defensive,
            description: "Goals conceded this season",
            accessor: |t| count(t.ga),
        },
        StatDef {
            key: "xGA",
            label: "Expected Goals Against",
            category: StatCategory::Defensive,
            description: "Expected goals conceded",
            accessor: |t| Some(t.xga),
        },
        StatDef {
            key: "cleanSheets",
            label: "Clean Sheets",
            category: StatCategory::Defensive,
            description: "Matches without conceding a goal",
            accessor: |t| count(t.clean_sheets),
        },
        StatDef {
            key: "possession",
            label: "Possession %",
            category: StatCategory::Possession,
            description: "Average share of the ball",
            accessor: |t| Some(t.possession),
        },
        StatDef {
            key: "points",
            label: "Points",
            category: StatCategory::Form,
            description: "League points",
            accessor: |t| count(t.points),
        },
        StatDef {
            key: "gd",
            label: "Goal Difference",
            category: StatCategory::Form,
            description: "Goals for minus goals against",
            accessor: |t| Some(t.gd as f64),
        },
    ]
});

const PLAYER_CATEGORIES: [StatCategory; 5] = [
    StatCategory::Attacking,
    StatCategory::Defensive,
    StatCategory::Passing,
    StatCategory::Physical,
    StatCategory::Form,
];

const TEAM_CATEGORIES: [StatCategory; 4] = [
    StatCategory::Attacking,
    StatCategory::Defensive,
    StatCategory::Possession,
    StatCategory::Form,
];

impl StatSubject for Player {
    type Group = Position;
    const PLACEHOLDER: &'static str = "Select players to compare";

    fn subject_id(&self) -> u32 {
        self.id
    }

    fn group(&self) -> Position {
        self.position
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn caption(&self) -> String {
        format!("{} - {}", self.position.code(), self.team)
    }

    fn stat_catalog() -> &'static [StatDef<Self>] {
        &PLAYER_STATS
    }

    fn categories() -> &'static [StatCategory] {
        &PLAYER_CATEGORIES
    }
}

impl StatSubject for Team {
    type Group = LeagueZone;
    const PLACEHOLDER: &'static str = "Select teams to compare";

    fn subject_id(&self) -> u32 {
        self.id
    }

    fn group(&self) -> LeagueZone {
        self.zone()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn caption(&self) -> String {
        format!("#{} - {} pts", self.position, self.points)
    }

    fn stat_catalog() -> &'static [StatDef<Self>] {
        &TEAM_STATS
    }

    fn categories() -> &'static [StatCategory] {
        &TEAM_CATEGORIES
    }
}

pub fn stats_in_category<T: StatSubject>(category: StatCategory) -> Vec<&'static StatDef<T>> {
    T::stat_catalog()
        .iter()
        .filter(|s| s.category == category)
        .collect()
}

pub fn find_stat<T: StatSubject>(key: &str) -> Option<&'static StatDef<T>> {
    T::stat_catalog().iter().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_renders_na_and_counts_as_zero() {
        assert_eq!(StatValue::Missing.to_string(), "N/A");
        assert_eq!(StatValue::Missing.or_zero(), 0.0);
        assert_eq!(StatValue::Value(7.0).to_string(), "7");
        assert_eq!(StatValue::Value(7.5).to_string(), "7.5");
    }

    #[test]
    fn stat_keys_are_unique_per_catalog() {
        let mut keys: Vec<&str> = Player::stat_catalog().iter().map(|s| s.key).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn physical_category_is_empty_for_players() {
        assert!(stats_in_category::<Player>(StatCategory::Physical).is_empty());
    }
}
