//! Templated one-liners for the pick justification, comparison and league insight panels.

use rand::Rng;

use crate::model::{Player, Team};

pub const NEED_TWO_PLAYERS: &str = "Select at least two players to see AI insights.";
pub const NEED_TWO_TEAMS: &str = "Select at least two teams to see AI insights.";

/// Why a player made the XI. One of four templates, picked at random.
pub fn justify_pick<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> String {
    let choice = rng.gen_range(0..4);
    justification_template(player, choice)
}

/// The template behind `justify_pick`, by index (wrapped into range).
pub fn justification_template(player: &Player, index: usize) -> String {
    match index % 4 {
        0 => format!(
            "{} has been in excellent form, scoring {} goals and providing {} assists.",
            player.name, player.goals, player.assists
        ),
        1 => format!(
            "With {} total points and an impressive form rating of {}, {} is a reliable choice.",
            player.total_points, player.form, player.name
        ),
        2 => format!(
            "Selected by {}% of managers, {} has proven to be a popular and effective choice in their position.",
            player.selected, player.name
        ),
        _ => format!(
            "{}'s consistent performance and upcoming fixture against {} makes them a strong pick.",
            player.name, player.next_fixture
        ),
    }
}

/// Head-to-head summary of the first two selected players.
pub fn compare_players(selected: &[Player]) -> String {
    let [a, b, ..] = selected else {
        return NEED_TWO_PLAYERS.to_string();
    };

    let form = if a.form > b.form {
        format!(
            "{} is in better form than {} with a rating of {} vs {}.",
            a.name, b.name, a.form, b.form
        )
    } else {
        format!(
            "{} is in better form than {} with a rating of {} vs {}.",
            b.name, a.name, b.form, a.form
        )
    };

    let goals = if a.goals > b.goals {
        format!(
            "{} has scored more goals ({}) than {} ({}).",
            a.name, a.goals, b.name, b.goals
        )
    } else {
        format!(
            "{} has scored more goals ({}) than {} ({}).",
            b.name, b.goals, a.name, a.goals
        )
    };

    let a_over = a.goals as f64 > a.xg;
    let b_over = b.goals as f64 > b.xg;
    let xg = match (a_over, b_over) {
        (true, false) => format!(
            "{} is overperforming their xG, while {} is not.",
            a.name, b.name
        ),
        (false, true) => format!(
            "{} is overperforming their xG, while {} is not.",
            b.name, a.name
        ),
        (true, true) => "Both players are overperforming their xG.".to_string(),
        (false, false) => "Both players are underperforming their xG.".to_string(),
    };

    [form, goals, xg].join(" ")
}

/// Head-to-head summary of the first two selected teams.
pub fn compare_teams(selected: &[Team]) -> String {
    let [a, b, ..] = selected else {
        return NEED_TWO_TEAMS.to_string();
    };

    let (leader, trailer) = if a.points >= b.points { (a, b) } else { (b, a) };
    let points = if a.points == b.points {
        format!("{} and {} are level on {} points.", a.name, b.name, a.points)
    } else {
        format!(
            "{} sit {} points clear of {} ({} vs {}).",
            leader.name,
            leader.points - trailer.points,
            trailer.name,
            leader.points,
            trailer.points
        )
    };

    let gd = if a.gd >= b.gd {
        format!(
            "{} have the better goal difference ({:+} vs {:+}).",
            a.name, a.gd, b.gd
        )
    } else {
        format!(
            "{} have the better goal difference ({:+} vs {:+}).",
            b.name, b.gd, a.gd
        )
    };

    let sharper = if a.xg_delta() >= b.xg_delta() { a } else { b };
    let xg = format!(
        "{} are finishing better against their xG ({:+.1} goals).",
        sharper.name,
        sharper.xg_delta()
    );

    [points, gd, xg].join(" ")
}

/// League-wide highlights: top attack, best defence, and the biggest xG over/under performers.
/// An empty league has nothing to say.
pub fn league_insights(teams: &[Team]) -> Vec<String> {
    // First-wins on ties, matching a stable descending/ascending sort.
    let top_scorer = teams.iter().reduce(|best, t| if t.gf > best.gf { t } else { best });
    let best_defense = teams.iter().reduce(|best, t| if t.ga < best.ga { t } else { best });
    let over = teams
        .iter()
        .reduce(|best, t| if t.xg_delta() > best.xg_delta() { t } else { best });
    let under = teams
        .iter()
        .reduce(|best, t| if t.xg_delta() < best.xg_delta() { t } else { best });

    let (Some(top_scorer), Some(best_defense), Some(over), Some(under)) =
        (top_scorer, best_defense, over, under)
    else {
        return Vec::new();
    };

    vec![
        format!(
            "{} leads the league in scoring with {} goals, averaging {:.1} per game.",
            top_scorer.name,
            top_scorer.gf,
            top_scorer.goals_per_game()
        ),
        format!(
            "{} has the strongest defense, conceding only {} goals in {} matches.",
            best_defense.name, best_defense.ga, best_defense.played
        ),
        format!(
            "{} is overperforming their xG by {:.1} goals, showing clinical finishing.",
            over.name,
            over.xg_delta()
        ),
        format!(
            "{} is underperforming their xG by {:.1} goals, indicating finishing problems.",
            under.name,
            under.xg_delta().abs()
        ),
    ]
}
