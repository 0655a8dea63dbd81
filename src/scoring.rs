//! Fantasy scoring rules shared by the fixture generator and the views.

use crate::model::{Position, round1};

pub const POINTS_PER_GOAL: u32 = 4;
pub const POINTS_PER_ASSIST: u32 = 3;
pub const POINTS_PER_FULL_MATCH: u32 = 2;
pub const SAVES_PER_POINT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonLine {
    pub position: Position,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub minutes_played: u32,
    pub saves: Option<u32>,
}

/// Season total. Only goalkeepers earn save points; every other position ignores `saves`.
pub fn total_points(line: &SeasonLine) -> u32 {
    let saves_points = match line.position {
        Position::Goalkeeper => line.saves.unwrap_or(0) / SAVES_PER_POINT,
        _ => 0,
    };
    line.goals * POINTS_PER_GOAL
        + line.assists * POINTS_PER_ASSIST
        + line.clean_sheets * line.position.clean_sheet_points()
        + (line.minutes_played / 90) * POINTS_PER_FULL_MATCH
        + saves_points
}

/// Points per ninety minutes, one decimal. Zero minutes yields zero.
pub fn points_per_game(total_points: u32, minutes_played: u32) -> f64 {
    if minutes_played == 0 {
        return 0.0;
    }
    let matches = minutes_played as f64 / 90.0;
    round1(total_points as f64 / matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_get_nothing_for_clean_sheets() {
        let line = SeasonLine {
            position: Position::Forward,
            goals: 10,
            assists: 2,
            clean_sheets: 7,
            minutes_played: 180,
            saves: None,
        };
        assert_eq!(total_points(&line), 40 + 6 + 4);
    }

    #[test]
    fn points_per_game_handles_zero_minutes() {
        assert_eq!(points_per_game(50, 0), 0.0);
        assert_eq!(points_per_game(52, 900), 5.2);
    }
}
