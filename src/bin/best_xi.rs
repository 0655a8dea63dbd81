use anyhow::{Context, Result, bail};

use fantasy_terminal::best_xi::{self, BUDGET_MAX, BUDGET_MIN, SquadSummary};
use fantasy_terminal::config::AppConfig;
use fantasy_terminal::fixtures::FixtureGenerator;
use fantasy_terminal::formation;
use fantasy_terminal::model::Position;
use fantasy_terminal::telemetry;

fn main() -> Result<()> {
    telemetry::init_stderr_logging()?;
    let (cfg, problems) = AppConfig::load();
    for problem in &problems {
        tracing::warn!(%problem, "config value ignored");
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let formation_name = arg_value(&args, "--formation").unwrap_or(cfg.formation.clone());
    let Some(formation) = formation::find_formation(&formation_name) else {
        let known = formation::formations()
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("unknown formation {formation_name:?} (known: {known})");
    };
    let budget = match arg_value(&args, "--budget") {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid --budget {raw:?}"))?
            .clamp(BUDGET_MIN, BUDGET_MAX),
        None => cfg.budget,
    };
    let seed = match arg_value(&args, "--seed") {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid --seed {raw:?}"))?,
        None => cfg.seed.unwrap_or_else(rand::random),
    };

    let dataset = FixtureGenerator::new(seed).generate_dataset(cfg.player_count);
    let xi = best_xi::build_team(&dataset, formation.name(), budget as f64);
    let summary = SquadSummary::new(&xi, formation, budget as f64);

    println!("Best XI {} | budget £{}m | seed {}", formation.name(), budget, seed);
    for position in Position::ALL {
        for player in xi.iter().filter(|p| p.position == position) {
            println!(
                "{:<4}{:<24}{:<18}£{:>5.1}m  form {:>4.1}  pts {:>3}",
                position.code(),
                player.name,
                player.team,
                player.price,
                player.form,
                player.total_points
            );
        }
    }
    println!(
        "Total £{:.1}m{}",
        summary.total_cost,
        if summary.over_budget { " (over budget)" } else { "" }
    );
    if summary.unfilled_slots > 0 {
        println!("{} slot(s) left empty", summary.unfilled_slots);
    }
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
