use anyhow::{Context, Result};

use fantasy_terminal::config::AppConfig;
use fantasy_terminal::fixtures::FixtureGenerator;
use fantasy_terminal::telemetry;

fn main() -> Result<()> {
    telemetry::init_stderr_logging()?;
    let (cfg, problems) = AppConfig::load();
    for problem in &problems {
        tracing::warn!(%problem, "config value ignored");
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let seed = match arg_value(&args, "--seed") {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid --seed {raw:?}"))?,
        None => cfg.seed.unwrap_or_else(rand::random),
    };
    let players = match arg_value(&args, "--players") {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid --players {raw:?}"))?,
        None => cfg.player_count,
    };

    let dataset = FixtureGenerator::new(seed).generate_dataset(players);
    tracing::info!(
        seed,
        players = dataset.players.len(),
        teams = dataset.teams.len(),
        "dataset generated"
    );

    let json = serde_json::to_string_pretty(&dataset).context("serialize dataset")?;
    println!("{json}");
    Ok(())
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
