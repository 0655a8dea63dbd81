use std::collections::VecDeque;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::best_xi::{self, SquadSummary};
use crate::comparison::{Comparison, SelectionChange};
use crate::formation;
use crate::insights;
use crate::league::{self, LeagueView, PossessionPoint, SEASONS_SHOWN, TableSort};
use crate::model::{Dataset, Player, Position, Team};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    BestXi,
    Players,
    League,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "HOME",
            Screen::BestXi => "BEST XI",
            Screen::Players => "PLAYER COMPARISON",
            Screen::League => "LEAGUE STATS",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BestXiState {
    pub formation: String,
    pub budget: u32,
    pub initial_formation: String,
    pub initial_budget: u32,
    pub squad: Vec<Player>,
    pub summary: Option<SquadSummary>,
    pub selected: usize,
    pub inspected: Option<Player>,
    pub justification: Option<String>,
    pub settings_open: bool,
}

#[derive(Debug, Clone)]
pub struct PlayersState {
    pub comparison: Comparison<Player>,
    pub cursor: usize,
    pub picker_open: bool,
}

#[derive(Debug, Clone)]
pub struct LeagueState {
    pub view: LeagueView,
    pub sort: TableSort,
    pub cursor: usize,
    pub seasons: Vec<String>,
    pub season: usize,
    pub possession: Vec<PossessionPoint>,
    pub comparison: Comparison<Team>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub screen: Screen,
    pub home_selected: usize,
    pub best_xi: BestXiState,
    pub players: PlayersState,
    pub league: LeagueState,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    rng: StdRng,
}

pub const HOME_ENTRIES: [Screen; 3] = [Screen::BestXi, Screen::Players, Screen::League];

impl AppState {
    pub fn new(dataset: Dataset, formation: &str, budget: u32, today: NaiveDate) -> Self {
        // Offset from the fixture seed so picks do not replay the fixture draws.
        let mut rng = StdRng::seed_from_u64(dataset.seed.wrapping_add(1));
        let possession = league::possession_points(&dataset.teams, &mut rng);
        let formation = dataset
            .formation(formation)
            .or_else(|| formation::default_formation())
            .map(|f| f.name().to_string())
            .unwrap_or_else(|| formation::DEFAULT_FORMATION.to_string());

        let mut state = Self {
            dataset,
            screen: Screen::Home,
            home_selected: 0,
            best_xi: BestXiState {
                formation: formation.clone(),
                budget,
                initial_formation: formation,
                initial_budget: budget,
                squad: Vec::new(),
                summary: None,
                selected: 0,
                inspected: None,
                justification: None,
                settings_open: false,
            },
            players: PlayersState {
                comparison: Comparison::new("goals", "assists"),
                cursor: 0,
                picker_open: false,
            },
            league: LeagueState {
                view: LeagueView::Table,
                sort: TableSort::default(),
                cursor: 0,
                seasons: league::recent_seasons(today, SEASONS_SHOWN),
                season: 0,
                possession,
                comparison: Comparison::new("gf", "xG"),
            },
            logs: VecDeque::new(),
            help_overlay: false,
            rng,
        };
        state.rebuild_squad();
        state.push_log(format!(
            "[INFO] Dataset ready: {} players, {} teams (seed {})",
            state.dataset.players.len(),
            state.dataset.teams.len(),
            state.dataset.seed
        ));
        state
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn open_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn open_home_selection(&mut self) {
        if let Some(screen) = HOME_ENTRIES.get(self.home_selected) {
            self.screen = *screen;
        }
    }

    // ---- best XI -------------------------------------------------------------

    pub fn rebuild_squad(&mut self) {
        let budget = self.best_xi.budget as f64;
        let squad = best_xi::build_team(&self.dataset, &self.best_xi.formation, budget);
        self.best_xi.summary = self
            .dataset
            .formation(&self.best_xi.formation)
            .map(|f| SquadSummary::new(&squad, f, budget));
        self.best_xi.squad = squad;
        self.best_xi.selected = 0;
        self.best_xi.inspected = None;
        self.best_xi.justification = None;

        if let Some(summary) = self.best_xi.summary.clone() {
            if summary.unfilled_slots > 0 {
                let msg = format!(
                    "[WARN] {} slot(s) left empty at £{}m",
                    summary.unfilled_slots, self.best_xi.budget
                );
                self.push_log(msg);
            }
            if summary.over_budget {
                let msg = format!(
                    "[WARN] XI costs £{:.1}m, over the £{}m budget",
                    summary.total_cost, self.best_xi.budget
                );
                self.push_log(msg);
            }
        }
    }

    pub fn cycle_formation(&mut self) {
        if let Some(next) = formation::next_formation(&self.best_xi.formation) {
            self.best_xi.formation = next.name().to_string();
            self.push_log(format!("[INFO] Formation: {}", next.name()));
            self.rebuild_squad();
        }
    }

    pub fn adjust_budget(&mut self, delta: i32) {
        let next = best_xi::adjust_budget(self.best_xi.budget, delta);
        if next != self.best_xi.budget {
            self.best_xi.budget = next;
            self.rebuild_squad();
        }
    }

    pub fn reset_team_settings(&mut self) {
        self.best_xi.budget = self.best_xi.initial_budget;
        self.best_xi.formation = self.best_xi.initial_formation.clone();
        self.push_log("[INFO] Team settings reset");
        self.rebuild_squad();
    }

    pub fn toggle_team_settings(&mut self) {
        self.best_xi.settings_open = !self.best_xi.settings_open;
    }

    pub fn inspect_selected_pick(&mut self) {
        let Some(player) = self.best_xi.squad.get(self.best_xi.selected).cloned() else {
            self.push_log("[INFO] No player in that slot");
            return;
        };
        self.best_xi.justification = Some(insights::justify_pick(&player, &mut self.rng));
        self.best_xi.inspected = Some(player);
    }

    pub fn squad_by_line(&self) -> Vec<(Position, Vec<&Player>)> {
        Position::ALL
            .iter()
            .map(|pos| {
                let line = self
                    .best_xi
                    .squad
                    .iter()
                    .filter(|p| p.position == *pos)
                    .collect::<Vec<_>>();
                (*pos, line)
            })
            .collect()
    }

    // ---- player comparison ---------------------------------------------------

    pub fn cycle_position_filter(&mut self) {
        let next = match self.players.comparison.filter {
            None => Some(Position::Goalkeeper),
            Some(Position::Goalkeeper) => Some(Position::Defender),
            Some(Position::Defender) => Some(Position::Midfielder),
            Some(Position::Midfielder) => Some(Position::Forward),
            Some(Position::Forward) => None,
        };
        self.players.comparison.set_filter(next);
        self.players.cursor = 0;
    }

    pub fn toggle_player_at_cursor(&mut self) {
        let page = self.players.comparison.picker(&self.dataset.players);
        let Some(player) = page.entries.get(self.players.cursor).map(|p| (*p).clone()) else {
            return;
        };
        let change = self.players.comparison.toggle(&player);
        self.log_selection(change, &player.name);
    }

    pub fn player_insight(&self) -> String {
        insights::compare_players(&self.players.comparison.selected)
    }

    // ---- league --------------------------------------------------------------

    pub fn sorted_teams(&self) -> Vec<&Team> {
        self.league.sort.apply(&self.dataset.teams)
    }

    pub fn cycle_sort_key(&mut self) {
        let key = self.league.sort.next_key();
        self.league.sort.click(key);
        self.league.cursor = 0;
    }

    pub fn flip_sort_direction(&mut self) {
        let key = self.league.sort.key;
        self.league.sort.click(key);
    }

    pub fn cycle_season(&mut self) {
        if self.league.seasons.is_empty() {
            return;
        }
        self.league.season = (self.league.season + 1) % self.league.seasons.len();
        let label = self.league.seasons[self.league.season].clone();
        self.push_log(format!("[INFO] Season: {label}"));
    }

    pub fn season_label(&self) -> &str {
        self.league
            .seasons
            .get(self.league.season)
            .map(String::as_str)
            .unwrap_or("-")
    }

    pub fn toggle_team_at_cursor(&mut self) {
        let Some(team) = self.sorted_teams().get(self.league.cursor).map(|t| (*t).clone()) else {
            return;
        };
        let change = self.league.comparison.toggle(&team);
        self.log_selection(change, &team.name);
    }

    pub fn team_insight(&self) -> String {
        insights::compare_teams(&self.league.comparison.selected)
    }

    pub fn league_insights(&self) -> Vec<String> {
        insights::league_insights(&self.dataset.teams)
    }

    // ---- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let total = self.list_len();
        let cursor = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.list_len();
        let cursor = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        if *cursor == 0 {
            *cursor = total - 1;
        } else {
            *cursor -= 1;
        }
    }

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Home => HOME_ENTRIES.len(),
            Screen::BestXi => self.best_xi.squad.len(),
            Screen::Players => self
                .players
                .comparison
                .picker(&self.dataset.players)
                .entries
                .len(),
            Screen::League => self.dataset.teams.len(),
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Home => &mut self.home_selected,
            Screen::BestXi => &mut self.best_xi.selected,
            Screen::Players => &mut self.players.cursor,
            Screen::League => &mut self.league.cursor,
        }
    }

    fn log_selection(&mut self, change: SelectionChange, name: &str) {
        let msg = match change {
            SelectionChange::Added => format!("[INFO] Added {name}"),
            SelectionChange::Removed => format!("[INFO] Removed {name}"),
            SelectionChange::LimitReached => {
                format!("[WARN] Selection full, {name} not added")
            }
        };
        self.push_log(msg);
    }
}
