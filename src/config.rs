//! Runtime settings, read from `.env.local`, `.env` and the process environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::best_xi::{BUDGET_MAX, BUDGET_MIN, DEFAULT_BUDGET};
use crate::fixtures::DEFAULT_PLAYER_COUNT;
use crate::formation::{self, DEFAULT_FORMATION};

pub const ENV_SEED: &str = "FANTASY_SEED";
pub const ENV_PLAYERS: &str = "FANTASY_PLAYERS";
pub const ENV_BUDGET: &str = "FANTASY_BUDGET";
pub const ENV_FORMATION: &str = "FANTASY_FORMATION";
pub const ENV_LOG_FILE: &str = "FANTASY_LOG_FILE";

const MIN_PLAYERS: usize = 22;
const MAX_PLAYERS: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("{key}={value:?} names no known formation")]
    UnknownFormation { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` means seed from entropy; the chosen seed is logged so a session can be replayed.
    pub seed: Option<u64>,
    pub player_count: usize,
    pub budget: u32,
    pub formation: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            player_count: DEFAULT_PLAYER_COUNT,
            budget: DEFAULT_BUDGET,
            formation: DEFAULT_FORMATION.to_string(),
            log_file: PathBuf::from("fantasy_terminal.log"),
        }
    }
}

impl AppConfig {
    /// Loads dotenv files (missing files are fine) and then reads the environment.
    pub fn load() -> (Self, Vec<ConfigError>) {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Bad values fall back to defaults and are
    /// returned alongside so the caller can surface them.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut problems = Vec::new();

        match parse_var::<u64, _>(&lookup, ENV_SEED, "u64 seed") {
            Ok(seed) => cfg.seed = seed,
            Err(err) => problems.push(err),
        }
        match parse_var::<usize, _>(&lookup, ENV_PLAYERS, "player count") {
            Ok(Some(count)) => cfg.player_count = count.clamp(MIN_PLAYERS, MAX_PLAYERS),
            Ok(None) => {}
            Err(err) => problems.push(err),
        }
        match parse_var::<u32, _>(&lookup, ENV_BUDGET, "budget") {
            Ok(Some(budget)) => cfg.budget = budget.clamp(BUDGET_MIN, BUDGET_MAX),
            Ok(None) => {}
            Err(err) => problems.push(err),
        }
        if let Some(raw) = non_empty(&lookup, ENV_FORMATION) {
            match formation::find_formation(&raw) {
                Some(found) => cfg.formation = found.name().to_string(),
                None => problems.push(ConfigError::UnknownFormation {
                    key: ENV_FORMATION,
                    value: raw,
                }),
            }
        }
        if let Some(raw) = non_empty(&lookup, ENV_LOG_FILE) {
            cfg.log_file = PathBuf::from(raw);
        }

        (cfg, problems)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_empty(lookup, key) else {
        return Ok(None);
    };
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
            expected,
        })
}
