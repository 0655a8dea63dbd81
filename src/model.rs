use std::fmt;

use serde::{Deserialize, Serialize};

use crate::formation::Formation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Lineup order: goalkeeper first, forwards last.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    /// Clean sheet bonus per match kept.
    pub fn clean_sheet_points(self) -> u32 {
        match self {
            Position::Goalkeeper | Position::Defender => 4,
            Position::Midfielder => 1,
            Position::Forward => 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "H")]
    Home,
    #[serde(rename = "A")]
    Away,
}

impl Venue {
    pub fn tag(self) -> &'static str {
        match self {
            Venue::Home => "H",
            Venue::Away => "A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextFixture {
    pub opponent: String,
    pub venue: Venue,
}

impl fmt::Display for NextFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.opponent, self.venue.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: Position,
    pub price: f64,
    pub total_points: u32,
    pub form: f64,
    pub xg: f64,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    // Goalkeepers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saves: Option<u32>,
    // Outfield players only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tackles: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interceptions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_accuracy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_passes: Option<u32>,
    pub passing_accuracy: u32,
    pub minutes_played: u32,
    pub points_per_game: f64,
    /// Ownership share, in percent.
    pub selected: f64,
    pub chance_of_playing: u8,
    pub next_fixture: NextFixture,
}

impl Player {
    /// Guaranteed starters only; doubtful players are left out of lineups.
    pub fn is_likely_starter(&self) -> bool {
        self.chance_of_playing > 75
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchResult {
    pub fn letter(self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }
}

pub const FORM_LENGTH: usize = 5;

/// Table band used to colour teams: top six, bottom six, everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeagueZone {
    Top,
    Mid,
    Bottom,
}

impl LeagueZone {
    pub fn for_position(position: u32) -> Self {
        if position <= 6 {
            LeagueZone::Top
        } else if position >= 15 {
            LeagueZone::Bottom
        } else {
            LeagueZone::Mid
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeagueZone::Top => "Top 6",
            LeagueZone::Mid => "Mid table",
            LeagueZone::Bottom => "Bottom 6",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub short_name: String,
    pub position: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub gf: u32,
    pub ga: u32,
    pub gd: i32,
    pub points: u32,
    pub form: Vec<MatchResult>,
    pub xg: f64,
    pub xga: f64,
    pub possession: f64,
    pub clean_sheets: u32,
}

impl Team {
    pub fn form_string(&self) -> String {
        self.form.iter().map(|r| r.letter()).collect()
    }

    /// Goals scored minus expected goals; positive means clinical finishing.
    pub fn xg_delta(&self) -> f64 {
        self.gf as f64 - self.xg
    }

    pub fn zone(&self) -> LeagueZone {
        LeagueZone::for_position(self.position)
    }

    pub fn goals_per_game(&self) -> f64 {
        if self.played == 0 {
            return 0.0;
        }
        self.gf as f64 / self.played as f64
    }
}

/// Everything a session works from. Built once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub seed: u64,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub formations: Vec<Formation>,
}

impl Dataset {
    pub fn formation(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name() == name)
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
