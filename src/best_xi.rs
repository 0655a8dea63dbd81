use serde::Serialize;

use crate::formation::{Formation, LINEUP_SIZE};
use crate::model::{Dataset, Player, Position};

pub const BUDGET_MIN: u32 = 50;
pub const BUDGET_MAX: u32 = 150;
pub const DEFAULT_BUDGET: u32 = 100;

/// Picks the in-form XI for `formation`.
///
/// Doubtful players (`chance_of_playing <= 75`) are dropped, the rest are ranked by form
/// (stable, so equal form keeps input order) and each line takes its top N. A line with too
/// few eligible players is left short rather than borrowing from another position.
pub fn generate_best_xi(players: &[Player], formation: &Formation) -> Vec<Player> {
    let mut available: Vec<&Player> = players.iter().filter(|p| p.is_likely_starter()).collect();
    available.sort_by(|a, b| b.form.total_cmp(&a.form));

    let mut xi = Vec::with_capacity(LINEUP_SIZE as usize);
    for position in Position::ALL {
        let wanted = formation.slots(position) as usize;
        xi.extend(
            available
                .iter()
                .filter(|p| p.position == position)
                .take(wanted)
                .map(|p| (*p).clone()),
        );
    }
    xi
}

/// Per-player affordability: keeps anyone priced at or under an even split of the budget.
pub fn affordable_players(players: &[Player], budget: f64) -> Vec<Player> {
    let per_slot = budget / LINEUP_SIZE as f64;
    players
        .iter()
        .filter(|p| p.price <= per_slot)
        .cloned()
        .collect()
}

/// Entry point for the team builder. Unknown formations yield an empty roster.
///
/// The budget only gates individual prices; the combined cost of the returned XI is not
/// checked against it. `SquadSummary::over_budget` reports when that happens.
pub fn build_team(dataset: &Dataset, formation_name: &str, budget: f64) -> Vec<Player> {
    let Some(formation) = dataset.formation(formation_name) else {
        tracing::warn!(formation = formation_name, "unknown formation, empty roster");
        return Vec::new();
    };
    let affordable = affordable_players(&dataset.players, budget);
    let xi = generate_best_xi(&affordable, formation);
    tracing::info!(
        formation = formation_name,
        budget,
        affordable = affordable.len(),
        picked = xi.len(),
        "built best XI"
    );
    xi
}

pub fn total_cost(players: &[Player]) -> f64 {
    players.iter().map(|p| p.price).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadSummary {
    pub total_cost: f64,
    pub budget: f64,
    pub over_budget: bool,
    pub goalkeepers: u32,
    pub defenders: u32,
    pub midfielders: u32,
    pub forwards: u32,
    pub unfilled_slots: u32,
}

impl SquadSummary {
    pub fn new(xi: &[Player], formation: &Formation, budget: f64) -> Self {
        let count = |position: Position| xi.iter().filter(|p| p.position == position).count() as u32;
        let total_cost = total_cost(xi);
        let picked = xi.len() as u32;
        Self {
            total_cost,
            budget,
            // Compare in tenths to dodge float noise from summing one-decimal prices.
            over_budget: (total_cost * 10.0).round() > (budget * 10.0).round(),
            goalkeepers: count(Position::Goalkeeper),
            defenders: count(Position::Defender),
            midfielders: count(Position::Midfielder),
            forwards: count(Position::Forward),
            unfilled_slots: formation.positions().total().saturating_sub(picked),
        }
    }

    pub fn count(&self, position: Position) -> u32 {
        match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }
}

/// Budget slider step, clamped to the supported range.
pub fn adjust_budget(current: u32, delta: i32) -> u32 {
    let next = current as i64 + delta as i64;
    next.clamp(BUDGET_MIN as i64, BUDGET_MAX as i64) as u32
}
