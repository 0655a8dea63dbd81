use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset as ChartSeries,
    GraphType, Paragraph, Wrap,
};

use fantasy_terminal::comparison::{ChartKind, ComparisonView};
use fantasy_terminal::config::AppConfig;
use fantasy_terminal::fixtures::FixtureGenerator;
use fantasy_terminal::league::{self, FinishingTone, LeagueView, SortDirection, SortKey};
use fantasy_terminal::model::{LeagueZone, Player, Position};
use fantasy_terminal::state::{AppState, HOME_ENTRIES, Screen};
use fantasy_terminal::stats::StatSubject;
use fantasy_terminal::telemetry;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn go(&mut self, screen: Screen) -> bool {
        self.state.open_screen(screen);
        true
    }

    fn on_key(&mut self, key: KeyEvent) {
        let global = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                true
            }
            KeyCode::Char('1') => self.go(Screen::Home),
            KeyCode::Char('2') => self.go(Screen::BestXi),
            KeyCode::Char('3') => self.go(Screen::Players),
            KeyCode::Char('4') => self.go(Screen::League),
            KeyCode::Char('b') | KeyCode::Esc => self.go(Screen::Home),
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_next();
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_prev();
                true
            }
            _ => false,
        };
        if global {
            return;
        }

        match self.state.screen {
            Screen::Home => {
                if key.code == KeyCode::Enter {
                    self.state.open_home_selection();
                }
            }
            Screen::BestXi => match key.code {
                KeyCode::Char('f') => self.state.cycle_formation(),
                KeyCode::Char('+') | KeyCode::Char('=') => self.state.adjust_budget(1),
                KeyCode::Char('-') => self.state.adjust_budget(-1),
                KeyCode::Char('>') | KeyCode::Right => self.state.adjust_budget(10),
                KeyCode::Char('<') | KeyCode::Left => self.state.adjust_budget(-10),
                KeyCode::Char('r') => self.state.reset_team_settings(),
                KeyCode::Char('s') => self.state.toggle_team_settings(),
                KeyCode::Enter => self.state.inspect_selected_pick(),
                _ => {}
            },
            Screen::Players => match key.code {
                KeyCode::Char('p') => self.state.cycle_position_filter(),
                KeyCode::Char('c') => self.state.players.comparison.cycle_category(),
                KeyCode::Char('v') => self.state.players.comparison.cycle_chart(),
                KeyCode::Char('x') => self.state.players.comparison.cycle_scatter_x(),
                KeyCode::Char('y') => self.state.players.comparison.cycle_scatter_y(),
                KeyCode::Char('o') => {
                    self.state.players.picker_open = !self.state.players.picker_open
                }
                KeyCode::Backspace => self.state.players.comparison.clear(),
                KeyCode::Enter | KeyCode::Char(' ') => self.state.toggle_player_at_cursor(),
                _ => {}
            },
            Screen::League => match key.code {
                KeyCode::Tab | KeyCode::Char('v') => {
                    self.state.league.view = self.state.league.view.next()
                }
                KeyCode::Char('s') => self.state.cycle_sort_key(),
                KeyCode::Char('d') => self.state.flip_sort_direction(),
                KeyCode::Char('n') => self.state.cycle_season(),
                KeyCode::Backspace => self.state.league.comparison.clear(),
                KeyCode::Enter | KeyCode::Char(' ') => self.state.toggle_team_at_cursor(),
                _ => {}
            },
        }
    }
}

fn main() -> Result<()> {
    let (cfg, problems) = AppConfig::load();
    if let Err(err) = telemetry::init_file_logging(&cfg.log_file) {
        eprintln!("warning: {err:#}");
    }
    for problem in &problems {
        tracing::warn!(%problem, "config value ignored");
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, players = cfg.player_count, budget = cfg.budget, "starting session");
    let dataset = FixtureGenerator::new(seed).generate_dataset(cfg.player_count);
    let today = chrono::Local::now().date_naive();

    let mut app = App::new(AppState::new(dataset, &cfg.formation, cfg.budget, today));
    for problem in problems {
        app.state.push_log(format!("[WARN] {problem}"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal loop failed");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1], &app.state),
        Screen::BestXi => render_best_xi(frame, chunks[1], &app.state),
        Screen::Players => render_players(frame, chunks[1], &app.state),
        Screen::League => render_league(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::League => format!("FANTASY TERMINAL | {} | {}", state.screen.label(), state.season_label()),
        _ => format!("FANTASY TERMINAL | {}", state.screen.label()),
    };
    let line1 = format!("   o   {title}");
    let line2 = format!("  /|\\  seed {}", state.dataset.seed);
    let line3 = "  / \\".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Home => "j/k Move | Enter Open",
        Screen::BestXi => "f Formation | +/- Budget | </> ±10 | s Settings | r Reset | Enter Why",
        Screen::Players => "p Position | c Category | v Chart | o Picker | Enter Pick | x/y Axes | ⌫ Clear",
        Screen::League => "Tab View | s Sort | d Direction | n Season | Enter Compare | ⌫ Clear",
    };
    format!("1-4 Screens | b/Esc Home | {screen} | ? Help | q Quit")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

// ---- home -------------------------------------------------------------------

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Fantasy Football Analytics",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Make data-driven decisions for your fantasy team."),
        Line::from(""),
    ];
    for (idx, screen) in HOME_ENTRIES.iter().enumerate() {
        let (title, blurb, color) = match screen {
            Screen::BestXi => (
                "Best Playing XI",
                "Lineup recommendations by formation and budget.",
                Color::Blue,
            ),
            Screen::Players => (
                "Player Comparison",
                "Compare players head-to-head with detailed statistics.",
                Color::Green,
            ),
            _ => (
                "League Stats",
                "Team performance and league standings.",
                Color::Yellow,
            ),
        };
        let marker = if idx == state.home_selected { "> " } else { "  " };
        let mut style = Style::default().fg(color);
        if idx == state.home_selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{} {title}", idx + 2), style),
        ]));
        lines.push(Line::from(format!("    {blurb}")));
    }

    let home = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(home, centered_rect(70, 70, area));
}

// ---- best XI ----------------------------------------------------------------

fn render_best_xi(frame: &mut Frame, area: Rect, state: &AppState) {
    let settings_height = if state.best_xi.settings_open { 6 } else { 3 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(settings_height), Constraint::Min(1)])
        .split(area);

    let settings = Paragraph::new(team_settings_text(state))
        .block(Block::default().title("Team Settings").borders(Borders::ALL));
    frame.render_widget(settings, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let pitch = Paragraph::new(pitch_lines(state))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!("Formation {}", state.best_xi.formation))
                .borders(Borders::ALL),
        );
    frame.render_widget(pitch, cols[0]);

    let detail = match &state.best_xi.inspected {
        Some(player) => {
            let mut text = player_card_text(player);
            text.push_str("\n\nAI Justification\n");
            text.push_str(state.best_xi.justification.as_deref().unwrap_or(""));
            text
        }
        None => "Select a player to see detailed stats\n\nMove with j/k and press Enter to see their \
                 statistics and selection justification."
            .to_string(),
    };
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(detail, cols[1]);
}

fn team_settings_text(state: &AppState) -> String {
    let xi = &state.best_xi;
    let cost = xi.summary.as_ref().map(|s| s.total_cost).unwrap_or(0.0);
    let mut lines = vec![format!(
        "Budget: £{}m | Formation: {} | Total cost: £{:.1}m",
        xi.budget, xi.formation, cost
    )];
    if xi.settings_open {
        lines.push(format!(
            "Budget slider: £{}m … £{}m, per-player cap £{:.1}m",
            fantasy_terminal::best_xi::BUDGET_MIN,
            fantasy_terminal::best_xi::BUDGET_MAX,
            xi.budget as f64 / fantasy_terminal::formation::LINEUP_SIZE as f64
        ));
        if let Some(summary) = &xi.summary {
            lines.push(format!(
                "Picked GK {} DEF {} MID {} FWD {} | empty slots {}{}",
                summary.goalkeepers,
                summary.defenders,
                summary.midfielders,
                summary.forwards,
                summary.unfilled_slots,
                if summary.over_budget { " | OVER BUDGET" } else { "" }
            ));
        }
        lines.push("r resets to the starting budget and formation".to_string());
    }
    lines.join("\n")
}

/// Lines from the forwards down to the goalkeeper, like looking at a pitch.
fn pitch_lines(state: &AppState) -> Vec<Line<'static>> {
    let selected_id = state.best_xi.squad.get(state.best_xi.selected).map(|p| p.id);
    let mut lines = Vec::new();
    for (position, line) in state.squad_by_line().into_iter().rev() {
        let mut spans = Vec::new();
        for player in line {
            let mut style = Style::default().fg(position_color(position));
            if Some(player.id) == selected_id {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!(" {} ", short_name(&player.name)), style));
            spans.push(Span::raw(" "));
        }
        if spans.is_empty() {
            spans.push(Span::styled(
                format!("no {} available", position.code()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    if state.best_xi.squad.is_empty() {
        lines.push(Line::from("No eligible players for this budget"));
    }
    lines
}

fn player_card_text(player: &Player) -> String {
    let mut lines = vec![
        format!("{} ({})", player.name, player.position.label()),
        format!("{} | £{:.1}m | form {}", player.team, player.price, player.form),
        format!(
            "Points {} | PPG {} | Selected {}%",
            player.total_points, player.points_per_game, player.selected
        ),
        format!(
            "Goals {} | Assists {} | xG {} | CS {}",
            player.goals, player.assists, player.xg, player.clean_sheets
        ),
        format!(
            "Minutes {} | Chance of playing {}% | Next: {}",
            player.minutes_played, player.chance_of_playing, player.next_fixture
        ),
    ];
    if let Some(saves) = player.saves {
        lines.push(format!("Saves {saves} | Pass accuracy {}%", player.passing_accuracy));
    } else {
        lines.push(format!(
            "Tackles {} | Interceptions {} | Key passes {} | Pass accuracy {}%",
            na(player.tackles),
            na(player.interceptions),
            na(player.key_passes),
            player.passing_accuracy
        ));
    }
    lines.join("\n")
}

// ---- player comparison ------------------------------------------------------

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let cmp = &state.players.comparison;
    let picker_width = if state.players.picker_open { 34 } else { 0 };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(picker_width), Constraint::Min(30)])
        .split(area);

    if state.players.picker_open {
        render_player_picker(frame, cols[0], state);
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(4),
        ])
        .split(cols[1]);

    let filter = cmp.filter.map(|p| p.label()).unwrap_or("All Positions");
    let selection: Vec<Span> = cmp
        .selected
        .iter()
        .map(|p| {
            Span::styled(
                format!(" {} ", p.name),
                Style::default().fg(hex_color(cmp.color_of(p.id))),
            )
        })
        .collect();
    let filters = Paragraph::new(vec![
        Line::from(format!(
            "Position: {filter} | Category: {} | Chart: {} | Selected {}/{}",
            cmp.category.label(),
            cmp.chart.label(),
            cmp.selected.len(),
            cmp.limit()
        )),
        Line::from(selection),
    ]);
    frame.render_widget(filters, rows[0]);

    match cmp.view() {
        ComparisonView::Placeholder(msg) => {
            let text = format!("{msg}\n\nPress o to open the player picker, then Enter to pick.");
            let empty = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, rows[1]);
        }
        ComparisonView::Ready => match cmp.chart {
            ChartKind::Radar => render_radar_profile(frame, rows[1], state),
            ChartKind::Bar => render_comparison_bars(frame, rows[1], state),
            ChartKind::Scatter => render_comparison_scatter(frame, rows[1], state),
        },
    }

    let table = Paragraph::new(comparison_table_lines(cmp))
        .block(Block::default().title("Player Stat Comparison").borders(Borders::ALL));
    frame.render_widget(table, rows[2]);

    let insight = Paragraph::new(state.player_insight())
        .wrap(Wrap { trim: true })
        .block(Block::default().title("AI Player Insights").borders(Borders::ALL));
    frame.render_widget(insight, rows[3]);
}

fn render_player_picker(frame: &mut Frame, area: Rect, state: &AppState) {
    let cmp = &state.players.comparison;
    let page = cmp.picker(&state.dataset.players);
    let mut lines: Vec<Line> = page
        .entries
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let picked = cmp.is_selected(p.id);
            let prefix = if idx == state.players.cursor { "> " } else { "  " };
            let mark = if picked { "●" } else { "○" };
            let style = if picked {
                Style::default().fg(hex_color(cmp.color_of(p.id)))
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{prefix}{mark} {} ({})", p.name, p.caption()),
                style,
            ))
        })
        .collect();
    if let Some(hint) = page.hint() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    }
    let picker = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Select Players").borders(Borders::ALL));
    frame.render_widget(picker, area);
}

/// Terminal stand-in for the radar: one row per stat, one bar per player, scaled to the
/// largest value in that row.
fn render_radar_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let cmp = &state.players.comparison;
    let rows = cmp.radar_rows();
    let width = area.width.saturating_sub(30).max(4) as f64;
    let mut lines = Vec::new();
    for row in rows {
        lines.push(Line::from(Span::styled(
            row.stat,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let max = row.values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        for (idx, (name, value)) in row.values.iter().enumerate() {
            let filled = if max > 0.0 { (value / max * width).round() as usize } else { 0 };
            let color = hex_color(fantasy_terminal::comparison::PALETTE[idx % 8]);
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<18}", truncate(name, 18))),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::raw(format!(" {value}")),
            ]));
        }
    }
    let chart = Paragraph::new(lines).block(Block::default().title("Profile").borders(Borders::ALL));
    frame.render_widget(chart, area);
}

fn render_comparison_bars(frame: &mut Frame, area: Rect, state: &AppState) {
    let cmp = &state.players.comparison;
    let rows = cmp.bar_rows();
    let block = Block::default().title("Bar").borders(Borders::ALL);
    let mut chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1);
    for stat in cmp.stats() {
        let bars: Vec<Bar> = rows
            .iter()
            .filter(|r| r.stat == stat.label)
            .map(|r| {
                Bar::default()
                    .value(r.value.max(0.0).round() as u64)
                    .text_value(format!("{} {}", short_name(&r.subject), r.value))
                    .style(Style::default().fg(hex_color(r.color)))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(stat.label)).bars(&bars));
    }
    frame.render_widget(chart, area);
}

fn render_comparison_scatter(frame: &mut Frame, area: Rect, state: &AppState) {
    let cmp = &state.players.comparison;
    let points = cmp.scatter_points();
    let (x_label, y_label) = cmp.axis_labels();
    let series: Vec<(String, Color, Vec<(f64, f64)>)> = points
        .iter()
        .map(|p| (p.name.clone(), hex_color(p.color), vec![(p.x, p.y)]))
        .collect();
    let x_max = points.iter().map(|p| p.x).fold(1.0_f64, f64::max) * 1.1;
    let y_max = points.iter().map(|p| p.y).fold(1.0_f64, f64::max) * 1.1;

    let datasets = series
        .iter()
        .map(|(name, color, data)| {
            ChartSeries::default()
                .name(name.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(data)
        })
        .collect::<Vec<_>>();
    let chart = Chart::new(datasets)
        .block(Block::default().title("Scatter (x/y cycle axes)").borders(Borders::ALL))
        .x_axis(axis(x_label, x_max))
        .y_axis(axis(y_label, y_max));
    frame.render_widget(chart, area);
}

fn comparison_table_lines(
    cmp: &fantasy_terminal::comparison::Comparison<Player>,
) -> Vec<Line<'static>> {
    let rows = cmp.table_rows();
    if rows.is_empty() {
        return vec![Line::from("No players selected")];
    }
    let header = cmp
        .selected
        .iter()
        .map(|p| format!("{:>14}", truncate(&p.name, 14)))
        .collect::<String>();
    let mut lines = vec![Line::from(format!("{:<20}{header}", "Stat"))];
    for row in rows {
        let mut spans = vec![Span::raw(format!("{:<20}", truncate(row.label, 20)))];
        spans.extend(row.cells.iter().map(|v| {
            // N/A cells are dimmed so they do not read as a zero.
            let style = if v.is_missing() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Span::styled(format!("{:>14}", v.to_string()), style)
        }));
        lines.push(Line::from(spans));
    }
    lines
}

// ---- league -----------------------------------------------------------------

fn render_league(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8), Constraint::Length(8)])
        .split(area);

    let tabs = LeagueView::ALL
        .iter()
        .map(|view| {
            let style = if *view == state.league.view {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!(" {} ", view.label()), style)
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

    match state.league.view {
        LeagueView::Table => render_league_table(frame, rows[1], state),
        LeagueView::Attacking => render_xg_vs_goals(frame, rows[1], state),
        LeagueView::Defensive => render_defensive(frame, rows[1], state),
        LeagueView::Possession => render_possession(frame, rows[1], state),
    }

    let mut insights: Vec<String> = state
        .league_insights()
        .into_iter()
        .map(|line| format!("✓ {line}"))
        .collect();
    match state.league.comparison.view() {
        ComparisonView::Placeholder(msg) => insights.push(format!("⇄ {msg} (Space in the table)")),
        ComparisonView::Ready => insights.push(format!("⇄ {}", state.team_insight())),
    }
    let panel = Paragraph::new(insights.join("\n"))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("AI League Insights").borders(Borders::ALL));
    frame.render_widget(panel, rows[2]);
}

fn render_league_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sort = state.league.sort;
    let head = |key: SortKey| {
        if sort.key == key {
            format!("{}{}", key.label(), sort.direction.arrow())
        } else {
            key.label().to_string()
        }
    };
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:>3}  {:<16}{:>5}{:>4}{:>4}{:>4}{:>4}{:>5}{:>5}{:>6}{:>7}{:>7}{:>6}  Last 5",
            head(SortKey::Position),
            "Team",
            head(SortKey::Points),
            "P",
            "W",
            "D",
            "L",
            "GF",
            "GA",
            head(SortKey::GoalDifference),
            head(SortKey::Xg),
            head(SortKey::Xga),
            head(SortKey::Possession),
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let teams = state.sorted_teams();
    let visible = area.height.saturating_sub(3) as usize;
    let (start, end) = visible_range(state.league.cursor, teams.len(), visible);
    for (idx, team) in teams.iter().enumerate().take(end).skip(start) {
        let picked = state.league.comparison.is_selected(team.id);
        let mut style = Style::default().fg(zone_color(team.zone()));
        if idx == state.league.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if picked {
            style = style.add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![Span::styled(
            format!(
                "{:>3}{} {:<16}{:>5}{:>4}{:>4}{:>4}{:>4}{:>5}{:>5}{:>6}{:>7.1}{:>7.1}{:>6.1}  ",
                team.position,
                if picked { "*" } else { " " },
                truncate(&team.name, 16),
                team.points,
                team.played,
                team.won,
                team.drawn,
                team.lost,
                team.gf,
                team.ga,
                team.gd,
                team.xg,
                team.xga,
                team.possession,
            ),
            style,
        )];
        for result in &team.form {
            let color = match result.letter() {
                'W' => Color::Green,
                'D' => Color::Yellow,
                _ => Color::Red,
            };
            spans.push(Span::styled(
                result.letter().to_string(),
                Style::default().fg(Color::Black).bg(color),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    let direction = match sort.direction {
        SortDirection::Asc => "ascending",
        SortDirection::Desc => "descending",
    };
    let table = Paragraph::new(lines).block(
        Block::default()
            .title(format!("League Table (sorted by {} {direction})", sort.key.label()))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

fn render_xg_vs_goals(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = league::by_difference(league::xg_vs_goals(&state.dataset.teams));
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<5}{:>7}{:>7}{:>9}", "Team", "xG", "Goals", "Goals-xG"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for row in rows {
        let color = match row.tone {
            FinishingTone::Over => Color::Green,
            FinishingTone::Under => Color::Red,
            FinishingTone::Even => Color::Blue,
        };
        let bar_len = row.difference.abs().round() as usize;
        lines.push(Line::from(vec![
            Span::raw(format!(
                "{:<5}{:>7.1}{:>7}{:>+9.1} ",
                row.name, row.xg, row.goals, row.difference
            )),
            Span::styled("■".repeat(bar_len), Style::default().fg(color)),
        ]));
    }
    let panel = Paragraph::new(lines)
        .block(Block::default().title("xG vs. Goals Scored").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn render_defensive(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = league::defensive_ranking(&state.dataset.teams);
    let bars: Vec<Bar> = rows
        .iter()
        .map(|r| {
            Bar::default()
                .label(Line::from(r.name.clone()))
                .value(r.clean_sheets as u64)
                .text_value(format!("CS {} | GA {} | xGA {:.1}", r.clean_sheets, r.goals_against, r.xga))
                .style(Style::default().fg(Color::Blue))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Defensive Strength Ranking")
                .borders(Borders::ALL),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_possession(frame: &mut Frame, area: Rect, state: &AppState) {
    let zones = [LeagueZone::Top, LeagueZone::Mid, LeagueZone::Bottom];
    let series: Vec<(LeagueZone, Vec<(f64, f64)>)> = zones
        .iter()
        .map(|zone| {
            let data = state
                .league
                .possession
                .iter()
                .filter(|p| p.zone == *zone)
                .map(|p| (p.possession, p.pass_accuracy))
                .collect();
            (*zone, data)
        })
        .collect();
    let datasets = series
        .iter()
        .map(|(zone, data)| {
            ChartSeries::default()
                .name(zone.label())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(zone_color(*zone)))
                .data(data)
        })
        .collect::<Vec<_>>();
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Possession vs. Pass Accuracy")
                .borders(Borders::ALL),
        )
        .x_axis(bounded_axis("Possession %", 35.0, 70.0))
        .y_axis(bounded_axis("Pass Accuracy %", 30.0, 70.0));
    frame.render_widget(chart, area);
}

// ---- helpers ----------------------------------------------------------------

fn axis(title: &str, max: f64) -> Axis<'static> {
    bounded_axis(title, 0.0, max)
}

fn bounded_axis(title: &str, min: f64, max: f64) -> Axis<'static> {
    Axis::default()
        .title(title.to_string())
        .style(Style::default().fg(Color::Gray))
        .bounds([min, max])
        .labels(vec![
            Span::raw(format!("{min:.0}")),
            Span::raw(format!("{:.0}", (min + max) / 2.0)),
            Span::raw(format!("{max:.0}")),
        ])
}

fn position_color(position: Position) -> Color {
    match position {
        Position::Goalkeeper => Color::Yellow,
        Position::Defender => Color::Blue,
        Position::Midfielder => Color::Green,
        Position::Forward => Color::Red,
    }
}

fn zone_color(zone: LeagueZone) -> Color {
    match zone {
        LeagueZone::Top => Color::Green,
        LeagueZone::Mid => Color::Yellow,
        LeagueZone::Bottom => Color::Red,
    }
}

fn hex_color(hex: &str) -> Color {
    let raw = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        raw.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or(255)
    };
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}

fn short_name(name: &str) -> String {
    match name.split_once(' ') {
        Some((first, last)) => format!("{}. {last}", first.chars().next().unwrap_or(' ')),
        None => name.to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn na(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Fantasy Terminal - Help",
        "",
        "Global:",
        "  1 2 3 4      Home / Best XI / Players / League",
        "  b / Esc      Home",
        "  j/k or ↑/↓   Move",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Best XI:",
        "  f            Next formation",
        "  + / -        Budget ±1, < / > ±10",
        "  s / r        Settings panel / reset",
        "  Enter        Justify the highlighted pick",
        "",
        "Players:",
        "  p c v        Position filter / category / chart",
        "  o, Enter     Picker, pick or drop",
        "  x / y        Scatter axes",
        "",
        "League:",
        "  Tab          Next view",
        "  s / d        Sort column / direction",
        "  n            Season",
        "  Enter        Add team to head-to-head",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
