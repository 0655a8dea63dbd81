//! Seeded generator for the mock league: a player pool and a 20-club table.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::formation;
use crate::model::{
    Dataset, FORM_LENGTH, MatchResult, NextFixture, Player, Position, Team, Venue, round1,
};
use crate::scoring::{self, SeasonLine};

pub const DEFAULT_PLAYER_COUNT: usize = 100;
pub const LEAGUE_SIZE: usize = 20;

pub const CLUBS: [(&str, &str); LEAGUE_SIZE] = [
    ("Arsenal", "ARS"),
    ("Aston Villa", "AVL"),
    ("Bournemouth", "BOU"),
    ("Brentford", "BRE"),
    ("Brighton", "BHA"),
    ("Chelsea", "CHE"),
    ("Crystal Palace", "CRY"),
    ("Everton", "EVE"),
    ("Fulham", "FUL"),
    ("Liverpool", "LIV"),
    ("Man City", "MCI"),
    ("Man Utd", "MUN"),
    ("Newcastle", "NEW"),
    ("Nott'm Forest", "NFO"),
    ("Southampton", "SOU"),
    ("Tottenham", "TOT"),
    ("West Ham", "WHU"),
    ("Wolves", "WOL"),
    ("Leicester", "LEI"),
    ("Leeds", "LEE"),
];

const FIRST_NAMES: [&str; 40] = [
    "James", "John", "Robert", "Michael", "David", "William", "Richard", "Thomas", "Mark",
    "Charles", "Mohammed", "Ali", "Omar", "Ethan", "Noah", "Lucas", "Mason", "Oliver", "Jacob",
    "Harry", "Leo", "Jack", "Charlie", "Freddie", "Alfie", "George", "Oscar", "Theo", "Arthur",
    "Henry", "Kai", "Ruben", "Bruno", "Thiago", "Phil", "Marcus", "Mason", "Trent", "Virgil",
    "Kevin",
];

const LAST_NAMES: [&str; 40] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Rodriguez",
    "Wilson", "Martinez", "Anderson", "Taylor", "Thomas", "Hernandez", "Moore", "Martin",
    "Jackson", "Thompson", "White", "Kane", "Salah", "Silva", "De Bruyne", "Fernandes",
    "Alexander-Arnold", "Van Dijk", "Sterling", "Foden", "Rashford", "Mount", "Dias", "Havertz",
    "Son", "Saka", "Rice", "James", "Chilwell", "Walker", "Cancelo",
];

/// Raw per-position draws before they are folded into a `Player`.
#[derive(Debug, Default, Clone, Copy)]
struct PositionStats {
    goals: u32,
    assists: u32,
    clean_sheets: u32,
    saves: u32,
    tackles: u32,
    interceptions: u32,
    passing_accuracy: u32,
    shot_accuracy: u32,
    key_passes: u32,
}

pub struct FixtureGenerator {
    rng: StdRng,
    seed: u64,
}

impl FixtureGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn generate_dataset(&mut self, player_count: usize) -> Dataset {
        let players = self.generate_players(player_count);
        let teams = self.generate_teams();
        Dataset {
            seed: self.seed,
            players,
            teams,
            formations: formation::formations().to_vec(),
        }
    }

    pub fn generate_players(&mut self, count: usize) -> Vec<Player> {
        let players: Vec<Player> = (0..count)
            .map(|idx| self.generate_player(idx as u32 + 1))
            .collect();
        tracing::debug!(count = players.len(), seed = self.seed, "generated players");
        players
    }

    pub fn generate_teams(&mut self) -> Vec<Team> {
        let mut positions: Vec<u32> = (1..=LEAGUE_SIZE as u32).collect();
        positions.shuffle(&mut self.rng);

        let mut teams: Vec<Team> = CLUBS
            .iter()
            .zip(positions)
            .enumerate()
            .map(|(idx, (&(name, short_name), position))| {
                self.generate_team(idx as u32 + 1, name, short_name, position)
            })
            .collect();
        teams.sort_by_key(|t| t.position);
        tracing::debug!(count = teams.len(), seed = self.seed, "generated teams");
        teams
    }

    fn generate_player(&mut self, id: u32) -> Player {
        let position = *Position::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Position::Midfielder);
        let first = pick(&mut self.rng, &FIRST_NAMES);
        let last = pick(&mut self.rng, &LAST_NAMES);
        let team = pick(&mut self.rng, &CLUBS).0;

        let stats = self.position_stats(position);
        let minutes_played = 500 + below(&mut self.rng, 2000);
        let saves = (position == Position::Goalkeeper).then_some(stats.saves);
        let total_points = scoring::total_points(&SeasonLine {
            position,
            goals: stats.goals,
            assists: stats.assists,
            clean_sheets: stats.clean_sheets,
            minutes_played,
            saves,
        });
        let outfield = |value: u32| (position != Position::Goalkeeper).then_some(value);

        let price = round1(4.0 + self.rng.r#gen::<f64>() * 8.0);
        let form = round1(self.rng.r#gen::<f64>() * 10.0);
        let xg = round1(self.rng.r#gen::<f64>() * stats.goals as f64 * 1.2);
        let selected = round1(self.rng.r#gen::<f64>() * 50.0);
        let chance_of_playing = if self.rng.r#gen::<f64>() > 0.1 {
            100
        } else {
            (self.rng.r#gen::<f64>() * 75.0).round() as u8
        };
        let next_fixture = NextFixture {
            opponent: pick(&mut self.rng, &CLUBS).0.to_string(),
            venue: if self.rng.r#gen::<f64>() > 0.5 {
                Venue::Home
            } else {
                Venue::Away
            },
        };

        Player {
            id,
            name: format!("{first} {last}"),
            team: team.to_string(),
            position,
            price,
            total_points,
            form,
            xg,
            goals: stats.goals,
            assists: stats.assists,
            clean_sheets: stats.clean_sheets,
            saves,
            tackles: outfield(stats.tackles),
            interceptions: outfield(stats.interceptions),
            shot_accuracy: outfield(stats.shot_accuracy),
            key_passes: outfield(stats.key_passes),
            passing_accuracy: stats.passing_accuracy,
            minutes_played,
            points_per_game: scoring::points_per_game(total_points, minutes_played),
            selected,
            chance_of_playing,
            next_fixture,
        }
    }

    fn position_stats(&mut self, position: Position) -> PositionStats {
        let rng = &mut self.rng;
        match position {
            Position::Goalkeeper => PositionStats {
                clean_sheets: below(rng, 10),
                saves: 30 + below(rng, 70),
                passing_accuracy: 30 + below(rng, 40),
                ..PositionStats::default()
            },
            Position::Defender => PositionStats {
                goals: below(rng, 4),
                assists: below(rng, 5),
                clean_sheets: below(rng, 12),
                tackles: 20 + below(rng, 80),
                interceptions: 10 + below(rng, 60),
                passing_accuracy: 40 + below(rng, 40),
                ..PositionStats::default()
            },
            Position::Midfielder => PositionStats {
                goals: below(rng, 10),
                assists: below(rng, 12),
                clean_sheets: below(rng, 8),
                tackles: 10 + below(rng, 50),
                interceptions: 5 + below(rng, 30),
                passing_accuracy: 50 + below(rng, 40),
                shot_accuracy: 30 + below(rng, 40),
                key_passes: 10 + below(rng, 50),
                ..PositionStats::default()
            },
            Position::Forward => PositionStats {
                goals: 5 + below(rng, 20),
                assists: below(rng, 10),
                shot_accuracy: 40 + below(rng, 40),
                key_passes: 5 + below(rng, 30),
                passing_accuracy: 40 + below(rng, 40),
                ..PositionStats::default()
            },
        }
    }

    fn generate_team(&mut self, id: u32, name: &str, short_name: &str, position: u32) -> Team {
        let rng = &mut self.rng;
        let played = 28 + below(rng, 6);
        let won = below(rng, played.min(25));
        let drawn = below(rng, (played - won).min(15));
        let lost = played - won - drawn;

        let gf = won * 2 + drawn + below(rng, 20);
        let ga = lost * 2 + drawn + below(rng, 15);

        const RESULTS: [MatchResult; 3] = [MatchResult::Win, MatchResult::Draw, MatchResult::Loss];
        let form = (0..FORM_LENGTH)
            .map(|_| *pick(rng, &RESULTS))
            .collect::<Vec<_>>();

        let xg = round1(gf as f64 + rng.r#gen::<f64>() * 10.0 - 5.0);
        let xga = round1(ga as f64 + rng.r#gen::<f64>() * 10.0 - 5.0);
        let possession = round1(40.0 + rng.r#gen::<f64>() * 25.0);
        let clean_sheets = below(rng, 15);

        Team {
            id,
            name: name.to_string(),
            short_name: short_name.to_string(),
            position,
            played,
            won,
            drawn,
            lost,
            gf,
            ga,
            gd: gf as i32 - ga as i32,
            points: won * 3 + drawn,
            form,
            xg,
            xga,
            possession,
            clean_sheets,
        }
    }
}

/// Uniform draw from `[0, upper)`; an empty range yields zero instead of panicking.
fn below<R: Rng + ?Sized>(rng: &mut R, upper: u32) -> u32 {
    if upper == 0 {
        return 0;
    }
    rng.gen_range(0..upper)
}

fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    let idx = rng.gen_range(0..items.len());
    &items[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_zero_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(below(&mut rng, 0), 0);
        assert!(below(&mut rng, 3) < 3);
    }
}
