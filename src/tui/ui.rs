//! UI rendering using ratatui
//!
//! One screen per game phase, framed by a shared header (title, round,
//! rules) and footer (key hints, status line). A pending yes/no prompt is
//! drawn on top of whatever screen is showing.

use crate::app::{App, Prompt, Screen, SetupFocus, SetupForm, SetupRow};
use crate::game::roster::{AssignmentDraft, Standings};
use crate::game::turn::{ReviewDraft, TurnSession, TurnStage};
use crate::game::machine::NextStep;
use crate::game::{Phase, ReviewData, Snapshot, Team, TeamColor};
use crate::words;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Render the screen for the current phase
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let snapshot = app.snapshot();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Body
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], snapshot);

    let body = layout[1];
    match (&snapshot.phase, &app.screen) {
        (Phase::Setup, Screen::Setup(form)) => render_setup(frame, body, app, form),
        (Phase::AssigningTeams, Screen::Assigning { draft, selected }) => {
            render_assignment(frame, body, draft, *selected)
        }
        (Phase::TeamsSummary, _) => render_teams(frame, body, snapshot),
        (Phase::GeneratingWords, _) => render_generating(frame, body),
        (Phase::PlayerTurn, Screen::Turn(session)) => render_turn(frame, body, snapshot, session),
        (Phase::TurnReview(_), Screen::Review { draft, selected }) => {
            render_review(frame, body, draft, *selected)
        }
        (Phase::TurnSummary(data), _) => render_turn_summary(frame, body, snapshot, data),
        (Phase::EndOfRoundSummary, _) => render_standings(frame, body, snapshot, false),
        (Phase::RoundSummary, _) => render_standings(frame, body, snapshot, true),
        _ => {}
    }

    if let Some(status) = &app.status {
        let status = Paragraph::new(status.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(status, layout[2]);
    }

    let footer = Paragraph::new(footer_hints(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);

    if let Some(prompt) = app.prompt {
        render_prompt(frame, area, prompt);
    }
}

fn render_header(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(8), Constraint::Min(20)])
        .split(inner);

    let logo = Paragraph::new("HAT")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(logo, columns[0]);

    let in_rounds = matches!(
        snapshot.phase,
        Phase::PlayerTurn
            | Phase::TurnReview(_)
            | Phase::TurnSummary(_)
            | Phase::EndOfRoundSummary
    );
    let title = if in_rounds {
        let details = snapshot.round_details();
        Line::from(vec![
            Span::styled(
                format!("Round {}: {} ", snapshot.round(), details.name),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::styled(details.description, Style::default().fg(Color::Gray)),
        ])
    } else {
        Line::from(Span::styled(
            phase_title(&snapshot.phase),
            Style::default().fg(Color::Cyan).bold(),
        ))
    };
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Right), columns[1]);
}

fn phase_title(phase: &Phase) -> &'static str {
    match phase {
        Phase::Setup => "New game",
        Phase::AssigningTeams => "Pick teams",
        Phase::TeamsSummary => "Teams",
        Phase::GeneratingWords => "Filling the hat",
        Phase::RoundSummary => "Game over",
        _ => "",
    }
}

fn render_setup(frame: &mut Frame, area: Rect, app: &App, form: &SetupForm) {
    let recent = app.recent_players();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(columns[0]);

    let typing = form.focus == SetupFocus::NameInput;
    let input = Paragraph::new(format!("> {}{}", form.name_input, if typing { "_" } else { "" }))
        .style(if typing {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(Block::default().borders(Borders::ALL).title("Add player"));
    frame.render_widget(input, left[0]);

    let selected = (form.focus == SetupFocus::Rows).then(|| form.selected_row(recent)).flatten();
    let row_style = |row: SetupRow| {
        if selected == Some(row) {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        }
    };
    let prefix = |row: SetupRow| if selected == Some(row) { "> " } else { "  " };

    let mut players: Vec<ListItem> = form
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let row = SetupRow::Player(i);
            ListItem::new(format!("{}{}", prefix(row), name)).style(row_style(row))
        })
        .collect();
    let candidates = form.recent_candidates(recent);
    if !candidates.is_empty() {
        players.push(ListItem::new(""));
        players.push(
            ListItem::new("Recent players (Enter to add)").style(Style::default().fg(Color::DarkGray)),
        );
        players.extend(candidates.iter().enumerate().map(|(i, name)| {
            let row = SetupRow::Recent(i);
            ListItem::new(format!("{}+ {}", prefix(row), name)).style(row_style(row))
        }));
    }
    let roster = List::new(players).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Players ({})", form.names.len())),
    );
    frame.render_widget(roster, left[1]);

    let config = &form.config;
    let counts = app.word_counts();
    let mut settings = vec![
        (SetupRow::Teams, format!("Teams: < {} >", config.team_count)),
        (
            SetupRow::WordsPerPlayer,
            format!("Words per player: < {} >", config.words_per_player),
        ),
        (SetupRow::Timer, format!("Turn timer: < {}s >", config.timer_seconds)),
        (
            SetupRow::Assignment,
            format!("Teams picked: < {} >", config.assignment.label()),
        ),
    ];
    settings.extend(crate::game::Difficulty::all().iter().map(|tier| {
        let mark = if config.difficulties.contains(tier) { "[x]" } else { "[ ]" };
        (
            SetupRow::Tier(*tier),
            format!(
                "{} {} ({} words)",
                mark,
                tier.label(),
                counts.get(tier).copied().unwrap_or(0)
            ),
        )
    }));
    let items: Vec<ListItem> = settings
        .into_iter()
        .map(|(row, text)| ListItem::new(format!("{}{}", prefix(row), text)).style(row_style(row)))
        .collect();
    let settings = List::new(items).block(Block::default().borders(Borders::ALL).title("Settings"));
    frame.render_widget(settings, columns[1]);
}

fn render_assignment(frame: &mut Frame, area: Rect, draft: &AssignmentDraft, selected: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .margin(1)
        .split(area);

    let items: Vec<ListItem> = draft
        .players()
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let team = match draft.team_of(i) {
                Some(t) => Team::new(t).name,
                None => "unassigned".to_string(),
            };
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{} - {}", prefix, player.name, team)).style(style)
        })
        .collect();
    let unassigned = draft.unassigned().count();
    let players = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Players ({unassigned} unassigned)")),
    );
    frame.render_widget(players, columns[0]);

    render_team_columns(frame, columns[1], &draft.teams(), false);
}

fn render_teams(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .margin(1)
        .split(area);
    render_team_columns(frame, layout[0], &snapshot.teams, false);

    let pool = snapshot.player_count() * snapshot.config.words_per_player as usize;
    let tiers: Vec<&str> = snapshot
        .config
        .difficulties
        .iter()
        .map(|t| t.label())
        .collect();
    let info = Paragraph::new(format!(
        "{} words ({}) - {}s turns",
        pool,
        tiers.join(", "),
        snapshot.config.timer_seconds
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(info, layout[1]);
}

/// One bordered column per team, with members and optionally scores.
fn render_team_columns(frame: &mut Frame, area: Rect, teams: &[Team], scores: bool) {
    if teams.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, teams.len() as u32); teams.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (team, column) in teams.iter().zip(columns.iter()) {
        let color = team_color(team.color);
        let items: Vec<ListItem> = team
            .players
            .iter()
            .map(|p| {
                if scores {
                    ListItem::new(format!("{} - {}", p.name, p.score))
                } else {
                    ListItem::new(p.name.clone())
                }
            })
            .collect();
        let title = if scores {
            format!("{} ({})", team.name, team.score())
        } else {
            team.name.clone()
        };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(title, Style::default().fg(color).bold())),
        );
        frame.render_widget(list, *column);
    }
}

fn render_generating(frame: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Putting words in the hat...")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(loading, vertical_center(area, 1));
}

fn render_turn(frame: &mut Frame, area: Rect, snapshot: &Snapshot, session: &TurnSession) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Who is up
            Constraint::Length(1), // Timer gauge
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Word or countdown
            Constraint::Length(1), // Counters
        ])
        .margin(1)
        .split(area);

    let (player, team) = (snapshot.current_player(), snapshot.current_team());
    if let (Some(player), Some(team)) = (player, team) {
        let who = Line::from(vec![
            Span::styled(player.name.clone(), Style::default().fg(Color::White).bold()),
            Span::raw(" explaining for "),
            Span::styled(team.name.clone(), Style::default().fg(team_color(team.color)).bold()),
        ]);
        frame.render_widget(Paragraph::new(who).alignment(Alignment::Center), layout[0]);
    }

    let timer = session.timer();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(timer_color(timer.remaining())))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label(format_timer(timer.remaining()));
    frame.render_widget(gauge, layout[1]);

    let centre = layout[3];
    match session.stage() {
        TurnStage::Ready => {
            let text = if snapshot.bonus.is_some() {
                format!(
                    "Bonus turn: {}s left over. Press ENTER to start",
                    snapshot.turn_duration()
                )
            } else {
                "Press ENTER to start".to_string()
            };
            let ready = Paragraph::new(text)
                .style(Style::default().fg(Color::Green).bold())
                .alignment(Alignment::Center);
            frame.render_widget(ready, vertical_center(centre, 1));
        }
        TurnStage::Countdown(count) => {
            let color = match count {
                3 => Color::Green,
                2 => Color::Yellow,
                _ => Color::Red,
            };
            let countdown = Paragraph::new(count.to_string())
                .style(Style::default().fg(color).bold())
                .alignment(Alignment::Center);
            frame.render_widget(countdown, vertical_center(centre, 1));
        }
        TurnStage::Running if session.is_showing_definition() => {
            render_definition(frame, centre, session.current_word().unwrap_or_default());
        }
        TurnStage::Running => {
            let (text, style) = if session.is_paused() {
                ("PAUSED".to_string(), Style::default().fg(Color::DarkGray).bold())
            } else {
                (
                    session.current_word().unwrap_or_default().to_uppercase(),
                    Style::default().fg(Color::Cyan).bold(),
                )
            };
            let word = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(word, vertical_center(centre, 3));
        }
        TurnStage::Finished => {}
    }

    let counters = Paragraph::new(format!(
        "Guessed: {}   Left in hat: {}",
        session.guessed().len(),
        session.words_left()
    ))
    .style(Style::default().fg(Color::Magenta))
    .alignment(Alignment::Center);
    frame.render_widget(counters, layout[4]);
}

fn render_definition(frame: &mut Frame, area: Rect, word: &str) {
    let mut lines = vec![Line::from(Span::styled(
        word.to_uppercase(),
        Style::default().fg(Color::Cyan).bold(),
    ))];
    match words::define(word) {
        Some(definitions) => lines.extend(
            definitions
                .iter()
                .enumerate()
                .map(|(i, d)| Line::from(format!("{}. {}", i + 1, d))),
        ),
        None => lines.push(Line::from(Span::styled(
            "No definition available",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Definition (timer paused)"));
    frame.render_widget(panel, area);
}

fn render_review(frame: &mut Frame, area: Rect, draft: &ReviewDraft, selected: usize) {
    let mut items: Vec<ListItem> = draft
        .entries()
        .iter()
        .enumerate()
        .map(|(i, (word, confirmed))| review_item(word, *confirmed, i == selected))
        .collect();
    if let Some(last) = draft.last_word() {
        items.push(ListItem::new(""));
        items.push(
            ListItem::new("Beat the buzzer?").style(Style::default().fg(Color::DarkGray)),
        );
        let row = draft.entries().len();
        items.push(review_item(last, draft.is_last_word_added(), row == selected));
    }

    let confirmed = draft.final_words().len();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Review turn ({confirmed} confirmed)")),
    );
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3)])
        .margin(1)
        .split(area);
    frame.render_widget(list, inner[0]);
}

fn review_item(word: &str, confirmed: bool, selected: bool) -> ListItem<'static> {
    let mark = if confirmed { "[x]" } else { "[ ]" };
    let prefix = if selected { "> " } else { "  " };
    let style = match (selected, confirmed) {
        (true, _) => Style::default().fg(Color::Yellow).bold(),
        (false, true) => Style::default().fg(Color::Green),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    ListItem::new(format!("{prefix}{mark} {word}")).style(style)
}

fn render_turn_summary(frame: &mut Frame, area: Rect, snapshot: &Snapshot, data: &ReviewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .margin(1)
        .split(area);

    let name = snapshot
        .current_player()
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    let scored = snapshot.current_turn_words.len();
    let headline = Paragraph::new(format!(
        "{} scored {} point{}",
        name,
        scored,
        if scored == 1 { "" } else { "s" }
    ))
    .style(Style::default().fg(Color::Yellow).bold())
    .alignment(Alignment::Center);
    frame.render_widget(headline, layout[0]);

    let words: Vec<ListItem> = snapshot
        .current_turn_words
        .iter()
        .map(|w| ListItem::new(w.clone()).style(Style::default().fg(Color::Green)))
        .collect();
    let offered = data.words.len() + usize::from(data.last_word.is_some());
    let list = List::new(words).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Counted {scored} of {offered}")),
    );
    frame.render_widget(list, layout[1]);

    let next = match snapshot.next_step() {
        NextStep::Turn => format!("{} words left in the hat", snapshot.remaining_words().len()),
        NextStep::RoundOver => "The hat is empty: round over".to_string(),
        NextStep::GameOver => "The hat is empty: game over".to_string(),
    };
    let next = Paragraph::new(next)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(next, layout[2]);

    render_team_columns(frame, layout[3], &snapshot.teams, true);
}

fn render_standings(frame: &mut Frame, area: Rect, snapshot: &Snapshot, final_results: bool) {
    let standings = snapshot.standings();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Min(4),
        ])
        .margin(1)
        .split(area);

    let headline = Paragraph::new(standings_headline(snapshot, &standings, final_results))
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(headline, layout[0]);

    let ranking: Vec<ListItem> = standings
        .ranking
        .iter()
        .enumerate()
        .filter_map(|(place, (index, score))| {
            let team = snapshot.teams.get(*index)?;
            let medal = if standings.winning_teams.contains(index) { "*" } else { " " };
            Some(
                ListItem::new(format!("{} {}. {} - {}", medal, place + 1, team.name, score))
                    .style(Style::default().fg(team_color(team.color))),
            )
        })
        .collect();
    let list = List::new(ranking).block(Block::default().borders(Borders::ALL).title("Standings"));
    frame.render_widget(list, layout[1]);

    render_team_columns(frame, layout[2], &snapshot.teams, true);
}

fn standings_headline(snapshot: &Snapshot, standings: &Standings, final_results: bool) -> String {
    let title = if final_results {
        "Final results".to_string()
    } else {
        format!("End of round {}", snapshot.round())
    };
    if standings.winning_teams.is_empty() {
        return format!("{title}: nobody has scored yet");
    }
    let teams: Vec<&str> = standings
        .winning_teams
        .iter()
        .filter_map(|i| snapshot.teams.get(*i).map(|t| t.name.as_str()))
        .collect();
    let players: Vec<&str> = snapshot
        .teams
        .iter()
        .flat_map(|t| &t.players)
        .filter(|p| standings.best_players.contains(&p.id))
        .map(|p| p.name.as_str())
        .collect();
    let verb = if final_results { "won" } else { "leading" };
    format!(
        "{title}: {} {verb}. Best explainer: {}",
        teams.join(" & "),
        players.join(" & ")
    )
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: Prompt) {
    let popup = centered_rect(area, 50, 5);
    frame.render_widget(Clear, popup);
    let question = Paragraph::new(prompt.question())
        .style(Style::default().fg(Color::White).bold())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(question, popup);
}

fn footer_hints(app: &App) -> &'static str {
    if app.prompt.is_some() {
        return "y Confirm  any other key Cancel";
    }
    match (&app.snapshot().phase, &app.screen) {
        (Phase::Setup, Screen::Setup(form)) if form.focus == SetupFocus::NameInput => {
            "Type name + Enter Add  Enter (empty) Start  Tab Settings  Esc Quit"
        }
        (Phase::Setup, _) => "↑↓ Move  ←→ Change  Enter Toggle/Add  Del Remove  s Start  Tab Names",
        (Phase::AssigningTeams, _) => "↑↓ Player  ←→ Team  1-8 Team  0 Unassign  r Random  Enter Done  Esc Back",
        (Phase::TeamsSummary, _) => "Enter Fill the hat  Esc Back to setup",
        (Phase::GeneratingWords, _) => "",
        (Phase::PlayerTurn, Screen::Turn(session)) => match session.stage() {
            TurnStage::Ready => "Enter Start turn  Esc Abandon",
            TurnStage::Running if session.is_showing_definition() => "Esc Close definition",
            TurnStage::Running => "Enter Guessed  p Pause  d Define  Esc Abandon",
            _ => "",
        },
        (Phase::TurnReview(_), _) => "↑↓ Move  Space Toggle  Enter Confirm",
        (Phase::TurnSummary(_), _) => "Enter Next  Backspace Back to review  Esc Abandon",
        (Phase::EndOfRoundSummary, _) => "Enter Next round  e End game  Esc Abandon",
        (Phase::RoundSummary, _) => "Enter New game  Esc Quit",
        _ => "",
    }
}

fn team_color(color: TeamColor) -> Color {
    match color {
        TeamColor::Red => Color::Red,
        TeamColor::Blue => Color::Blue,
        TeamColor::Green => Color::Green,
        TeamColor::Yellow => Color::Yellow,
        TeamColor::Purple => Color::Magenta,
        TeamColor::Orange => Color::Rgb(255, 140, 0),
        TeamColor::Pink => Color::LightMagenta,
        TeamColor::Teal => Color::Cyan,
    }
}

fn timer_color(remaining: u32) -> Color {
    if remaining <= 5 {
        Color::Red
    } else if remaining <= 10 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// A `height`-line strip vertically centred in `area`.
fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}

/// A box `percent_x` wide and `height` lines tall, centred in `area`.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Format the timer display
fn format_timer(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(0), "0:00");
        assert_eq!(format_timer(45), "0:45");
        assert_eq!(format_timer(60), "1:00");
        assert_eq!(format_timer(75), "1:15");
    }

    #[test]
    fn test_timer_color_thresholds() {
        assert_eq!(timer_color(30), Color::Green);
        assert_eq!(timer_color(10), Color::Yellow);
        assert_eq!(timer_color(3), Color::Red);
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 50, 5);
        assert_eq!(popup, Rect::new(25, 17, 50, 5));
        let strip = vertical_center(area, 3);
        assert_eq!(strip, Rect::new(0, 18, 100, 3));
    }

    #[test]
    fn test_tiny_area_does_not_overflow() {
        let area = Rect::new(2, 2, 10, 2);
        let popup = centered_rect(area, 50, 5);
        assert_eq!(popup.height, 2);
        assert_eq!(vertical_center(area, 5).height, 2);
    }
}
