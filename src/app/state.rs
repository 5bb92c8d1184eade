//! Application state: the current snapshot and everything around it
//!
//! [`App`] is the only mutator of the game. Keys and elapsed time come in,
//! transitions go out to the state machine, and every accepted snapshot is
//! mirrored to storage.

use super::screen::{Prompt, Screen, SetupFocus, SetupForm, SetupRow};
use crate::config::GENERATION_DELAY;
use crate::device::{Cue, CuePlayer, TICK_CUE_THRESHOLD};
use crate::error::GameError;
use crate::game::roster::AssignmentDraft;
use crate::game::turn::{ReviewDraft, TurnSession, TurnSignal, TurnStage};
use crate::game::{AssignmentMethod, Difficulty, GameConfig, Phase, Snapshot};
use crate::storage::{merge_recent, Storage, RECENT_PLAYERS_LIMIT};
use crate::words::{EmbeddedWords, WordSource};
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::time::Duration;

/// A key press, reduced to what the screens care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Tab,
    Esc,
}

/// Cue to play for a turn signal, if any.
pub fn cue_for(signal: &TurnSignal) -> Option<Cue> {
    match signal {
        TurnSignal::Correct => Some(Cue::Correct),
        TurnSignal::Tick { remaining } if *remaining <= TICK_CUE_THRESHOLD => Some(Cue::Tick),
        TurnSignal::TimeUp => Some(Cue::TimerEnd),
        TurnSignal::Paused => Some(Cue::Pause),
        TurnSignal::Resumed => Some(Cue::Unpause),
        _ => None,
    }
}

/// Main application state
pub struct App {
    snapshot: Snapshot,
    /// Local state of the screen for the current phase
    pub screen: Screen,
    /// Message shown under the current screen until the next key press
    pub status: Option<String>,
    /// Pending yes/no question
    pub prompt: Option<Prompt>,
    /// Whether the application should quit
    pub should_quit: bool,
    storage: Option<Storage>,
    words: EmbeddedWords,
    rng: StdRng,
    cues: Box<dyn CuePlayer>,
    recent: Vec<String>,
    defaults: GameConfig,
}

impl App {
    /// Start from `snapshot` (usually the restored one). Without storage the
    /// session simply is not persisted.
    pub fn new(
        snapshot: Snapshot,
        storage: Option<Storage>,
        rng: StdRng,
        cues: Box<dyn CuePlayer>,
        defaults: GameConfig,
    ) -> Self {
        let recent = storage
            .as_ref()
            .map(|s| {
                s.recent_players().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "could not read recent players");
                    Vec::new()
                })
            })
            .unwrap_or_default();

        let mut app = Self {
            snapshot,
            screen: Screen::Plain,
            status: None,
            prompt: None,
            should_quit: false,
            storage,
            words: EmbeddedWords,
            rng,
            cues,
            recent,
            defaults,
        };
        app.sync_screen();
        app
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn recent_players(&self) -> &[String] {
        &self.recent
    }

    /// Words available per tier, for the setup screen.
    pub fn word_counts(&self) -> BTreeMap<Difficulty, usize> {
        self.words.word_counts()
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Dispatch a key press to the current screen.
    pub fn on_input(&mut self, input: Input) {
        if let Some(prompt) = self.prompt.take() {
            if matches!(input, Input::Char('y' | 'Y')) {
                match prompt {
                    Prompt::Abandon => {
                        tracing::info!(phase = self.snapshot.phase.name(), "game abandoned");
                        self.apply(|s, _| s.abandon());
                    }
                    Prompt::EndGameEarly => {
                        tracing::info!(round = self.snapshot.round(), "game ended early");
                        self.apply(|s, _| s.end_game_early());
                    }
                }
            }
            return;
        }
        self.status = None;

        match self.snapshot.phase {
            Phase::Setup => self.on_setup_input(input),
            Phase::AssigningTeams => self.on_assigning_input(input),
            Phase::TeamsSummary => match input {
                Input::Enter => {
                    self.apply(|s, _| s.confirm_teams());
                }
                Input::Esc => {
                    self.apply(|s, _| s.back_to_setup());
                }
                _ => {}
            },
            Phase::GeneratingWords => {}
            Phase::PlayerTurn => self.on_turn_input(input),
            Phase::TurnReview(_) => self.on_review_input(input),
            Phase::TurnSummary(_) => match input {
                Input::Enter => {
                    self.apply(|s, rng| s.next_player(rng));
                }
                Input::Backspace => {
                    self.apply(|s, _| s.return_to_review());
                }
                Input::Esc => self.ask(Prompt::Abandon),
                _ => {}
            },
            Phase::EndOfRoundSummary => match input {
                Input::Enter => {
                    self.apply(|s, rng| s.start_next_round(rng));
                }
                Input::Char('e') => self.ask(Prompt::EndGameEarly),
                Input::Esc => self.ask(Prompt::Abandon),
                _ => {}
            },
            Phase::RoundSummary => match input {
                Input::Enter => {
                    self.apply(|s, _| s.new_game());
                }
                Input::Esc => self.quit(),
                _ => {}
            },
        }
    }

    /// Feed elapsed wall time to whatever is counting. Nothing counts
    /// while a prompt is open.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.prompt.is_some() {
            return;
        }
        match &mut self.screen {
            Screen::Generating { waited } => {
                *waited += elapsed;
                if *waited >= GENERATION_DELAY {
                    self.generate();
                }
            }
            Screen::Turn(session) => {
                let signals = session.advance(elapsed);
                self.handle_signals(signals);
            }
            _ => {}
        }
    }

    fn ask(&mut self, prompt: Prompt) {
        let allowed = match prompt {
            Prompt::Abandon => self.snapshot.can_abandon(),
            Prompt::EndGameEarly => self.snapshot.phase == Phase::EndOfRoundSummary,
        };
        if allowed {
            self.prompt = Some(prompt);
        }
    }

    fn on_setup_input(&mut self, input: Input) {
        let Screen::Setup(form) = &mut self.screen else {
            return;
        };
        let recent = &self.recent;
        let mut start = false;

        let result = match (form.focus, input) {
            (_, Input::Esc) => {
                self.should_quit = true;
                Ok(())
            }
            (SetupFocus::NameInput, Input::Tab | Input::Down) => {
                form.focus = SetupFocus::Rows;
                Ok(())
            }
            (SetupFocus::Rows, Input::Tab) => {
                form.focus = SetupFocus::NameInput;
                Ok(())
            }
            (SetupFocus::NameInput, Input::Char(c)) => {
                form.push_char(c);
                Ok(())
            }
            (SetupFocus::NameInput, Input::Backspace) => {
                form.pop_char();
                Ok(())
            }
            (SetupFocus::NameInput, Input::Enter) if form.name_input.trim().is_empty() => {
                start = true;
                Ok(())
            }
            (SetupFocus::NameInput, Input::Enter) => form.add_typed_name(),
            (SetupFocus::Rows, Input::Up) if form.selected == 0 => {
                form.focus = SetupFocus::NameInput;
                Ok(())
            }
            (SetupFocus::Rows, Input::Up | Input::Down) => {
                form.move_selection(recent, input == Input::Down);
                Ok(())
            }
            (SetupFocus::Rows, Input::Left | Input::Right) => match form.selected_row(recent) {
                Some(row) if row.is_setting() => form.adjust(row, input == Input::Right),
                _ => Ok(()),
            },
            (SetupFocus::Rows, Input::Enter | Input::Char(' ')) => {
                match form.selected_row(recent) {
                    Some(SetupRow::Recent(i)) => form.add_recent(recent, i),
                    Some(row) if row.is_setting() => form.adjust(row, true),
                    _ => Ok(()),
                }
            }
            (SetupFocus::Rows, Input::Backspace | Input::Delete) => {
                if let Some(SetupRow::Player(i)) = form.selected_row(recent) {
                    form.remove_player(recent, i);
                }
                Ok(())
            }
            (SetupFocus::Rows, Input::Char('s')) => {
                start = true;
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(message) = result {
            self.status = Some(message);
        }
        if start {
            self.start_game();
        }
    }

    fn start_game(&mut self) {
        let Screen::Setup(form) = &self.screen else {
            return;
        };
        let names = form.names.clone();
        let config = form.config.clone();

        if !self.apply(|s, _| s.confirm_setup(&names, config)) {
            return;
        }
        tracing::info!(players = names.len(), teams = self.snapshot.config.team_count, "game started");
        self.remember_players(&names);

        if self.snapshot.config.assignment == AssignmentMethod::Random {
            self.apply(|s, rng| s.assign_randomly(rng));
        }
    }

    fn remember_players(&mut self, names: &[String]) {
        let stored = self.storage.as_ref().map(|s| s.remember_players(names));
        self.recent = match stored {
            Some(Ok(list)) => list,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "could not save recent players");
                merge_recent(names, &self.recent, RECENT_PLAYERS_LIMIT)
            }
            None => merge_recent(names, &self.recent, RECENT_PLAYERS_LIMIT),
        };
    }

    fn on_assigning_input(&mut self, input: Input) {
        let Screen::Assigning { draft, selected } = &mut self.screen else {
            return;
        };
        let last = draft.players().len().saturating_sub(1);

        match input {
            Input::Up => *selected = selected.saturating_sub(1),
            Input::Down => *selected = (*selected + 1).min(last),
            Input::Left | Input::Right => draft.cycle(*selected, input == Input::Right),
            Input::Backspace | Input::Delete | Input::Char('0') => draft.unassign(*selected),
            Input::Char(c @ '1'..='9') => {
                let team = c as usize - '1' as usize;
                if team < draft.team_count() {
                    draft.assign(*selected, team);
                } else {
                    self.status = Some(format!("There are only {} teams", draft.team_count()));
                }
            }
            Input::Char('r') => {
                self.apply(|s, rng| s.assign_randomly(rng));
            }
            Input::Enter => {
                let teams = draft.teams();
                self.apply(|s, _| s.complete_assignment(teams));
            }
            Input::Esc => {
                self.apply(|s, _| s.back_to_setup());
            }
            _ => {}
        }
    }

    fn on_turn_input(&mut self, input: Input) {
        let Screen::Turn(session) = &mut self.screen else {
            return;
        };
        let mut signals = Vec::new();
        let mut abandon = false;

        match (session.stage(), input) {
            (TurnStage::Ready, Input::Enter | Input::Char(' ')) => {
                session.begin_countdown();
            }
            (TurnStage::Running, Input::Esc | Input::Enter | Input::Char('d'))
                if session.is_showing_definition() =>
            {
                signals.extend(session.hide_definition());
            }
            (TurnStage::Running, _) if session.is_showing_definition() => {}
            (TurnStage::Running, Input::Enter | Input::Char(' ')) => {
                signals = session.mark_guessed();
            }
            (TurnStage::Running, Input::Char('p')) => signals.extend(session.toggle_pause()),
            (TurnStage::Running, Input::Char('d')) => signals.extend(session.show_definition()),
            (_, Input::Esc) => abandon = true,
            _ => {}
        }

        if abandon {
            self.ask(Prompt::Abandon);
        }
        self.handle_signals(signals);
    }

    fn on_review_input(&mut self, input: Input) {
        let Screen::Review { draft, selected } = &mut self.screen else {
            return;
        };
        let rows = Screen::review_rows(draft);

        match input {
            Input::Up => *selected = selected.saturating_sub(1),
            Input::Down => *selected = (*selected + 1).min(rows.saturating_sub(1)),
            Input::Char(' ') | Input::Left | Input::Right => {
                if *selected < draft.entries().len() {
                    draft.toggle(*selected);
                } else {
                    draft.toggle_last_word();
                }
            }
            Input::Enter => {
                let words = draft.final_words();
                self.apply(|s, _| s.confirm_review(words));
            }
            Input::Esc => self.ask(Prompt::Abandon),
            _ => {}
        }
    }

    fn generate(&mut self) {
        let words = self.words;
        if !self.apply(|s, rng| s.generate_words(&words, rng)) {
            let reason = self.status.take();
            self.apply(|s, _| s.abort_generation());
            self.status = reason;
        }
    }

    fn handle_signals(&mut self, signals: Vec<TurnSignal>) {
        for signal in signals {
            if let Some(cue) = cue_for(&signal) {
                self.cues.play(cue);
            }
            match signal {
                TurnSignal::Started => tracing::debug!("turn timer started"),
                TurnSignal::TimeUp => tracing::debug!("time is up"),
                TurnSignal::Finished(outcome) => {
                    tracing::debug!(
                        words = outcome.words.len(),
                        remaining = ?outcome.remaining_time,
                        "turn finished"
                    );
                    self.apply(|s, _| s.finish_turn(outcome));
                }
                _ => {}
            }
        }
    }

    /// Run a transition. On success the new snapshot replaces the old one;
    /// on failure the error is shown and nothing changes.
    fn apply<F>(&mut self, transition: F) -> bool
    where
        F: FnOnce(&Snapshot, &mut StdRng) -> Result<Snapshot, GameError>,
    {
        match transition(&self.snapshot, &mut self.rng) {
            Ok(next) => {
                self.commit(next);
                true
            }
            Err(e) => {
                match &e {
                    GameError::InvalidTransition(_) => tracing::error!(error = %e, "rejected transition"),
                    _ => tracing::debug!(error = %e, "transition refused"),
                }
                self.status = Some(e.to_string());
                false
            }
        }
    }

    fn commit(&mut self, next: Snapshot) {
        if next.phase.name() != self.snapshot.phase.name() {
            tracing::info!(
                from = self.snapshot.phase.name(),
                to = next.phase.name(),
                round = next.round(),
                "phase changed"
            );
        }
        self.snapshot = next;
        self.persist();
        self.sync_screen();
    }

    /// Mirror the snapshot to storage. A blank game clears the saved one.
    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let result = if self.snapshot == Snapshot::default() {
            storage.clear_snapshot()
        } else {
            storage.save_snapshot(&self.snapshot)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not save game");
        }
    }

    /// Rebuild the screen-local state for the current phase.
    fn sync_screen(&mut self) {
        let snapshot = &self.snapshot;
        self.screen = match &snapshot.phase {
            Phase::Setup => {
                let (names, config) = if snapshot.players.is_empty() {
                    (Vec::new(), self.defaults.clone())
                } else {
                    (
                        snapshot.players.iter().map(|p| p.name.clone()).collect(),
                        snapshot.config.clone(),
                    )
                };
                Screen::Setup(SetupForm::new(names, config))
            }
            Phase::AssigningTeams => Screen::Assigning {
                draft: AssignmentDraft::new(&snapshot.players, snapshot.config.team_count),
                selected: 0,
            },
            Phase::GeneratingWords => Screen::Generating {
                waited: Duration::ZERO,
            },
            Phase::PlayerTurn => Screen::Turn(TurnSession::new(
                snapshot.remaining_words(),
                snapshot.turn_duration(),
            )),
            Phase::TurnReview(data) => Screen::Review {
                draft: ReviewDraft::new(data),
                selected: 0,
            },
            Phase::TeamsSummary
            | Phase::TurnSummary(_)
            | Phase::EndOfRoundSummary
            | Phase::RoundSummary => Screen::Plain,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Muted;
    use crate::game::{Player, Team, TurnPosition};
    use rand::SeedableRng;

    fn app_with(snapshot: Snapshot) -> App {
        App::new(
            snapshot,
            Some(Storage::open_in_memory().unwrap()),
            StdRng::seed_from_u64(42),
            Box::new(Muted),
            GameConfig::default(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.on_input(Input::Char(c));
        }
    }

    fn add_players(app: &mut App, names: &[&str]) {
        for name in names {
            type_text(app, name);
            app.on_input(Input::Enter);
        }
    }

    fn stored(app: &App) -> Option<Snapshot> {
        app.storage.as_ref().unwrap().load_snapshot().unwrap()
    }

    /// Setup through word generation, ending on a fresh PlayerTurn.
    fn app_in_turn() -> App {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob", "Cid", "Dee"]);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::TeamsSummary);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::GeneratingWords);
        app.tick(GENERATION_DELAY);
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);
        app
    }

    fn start_turn(app: &mut App) {
        app.on_input(Input::Enter);
        app.tick(Duration::from_secs(3));
        let Screen::Turn(session) = &app.screen else {
            panic!("not in a turn");
        };
        assert_eq!(session.stage(), TurnStage::Running);
    }

    #[test]
    fn test_cue_mapping() {
        assert_eq!(cue_for(&TurnSignal::Correct), Some(Cue::Correct));
        assert_eq!(cue_for(&TurnSignal::Tick { remaining: 3 }), Some(Cue::Tick));
        assert_eq!(cue_for(&TurnSignal::Tick { remaining: 4 }), None);
        assert_eq!(cue_for(&TurnSignal::TimeUp), Some(Cue::TimerEnd));
        assert_eq!(cue_for(&TurnSignal::Paused), Some(Cue::Pause));
        assert_eq!(cue_for(&TurnSignal::Resumed), Some(Cue::Unpause));
        assert_eq!(cue_for(&TurnSignal::Started), None);
    }

    #[test]
    fn test_setup_refuses_single_player() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann"]);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::Setup);
        assert!(app.status.as_deref().unwrap().starts_with("minimum players"));
    }

    #[test]
    fn test_duplicate_name_reported() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "ann"]);
        assert!(app.status.is_some());
        let Screen::Setup(form) = &app.screen else {
            panic!("not on setup");
        };
        assert_eq!(form.names, vec!["Ann".to_string()]);
    }

    #[test]
    fn test_start_remembers_players() {
        let app = app_in_turn();
        assert_eq!(app.recent_players().len(), 4);
        assert_eq!(app.recent_players()[0], "Ann");
        let storage = app.storage.as_ref().unwrap();
        assert_eq!(storage.recent_players().unwrap().len(), 4);
    }

    #[test]
    fn test_random_assignment_skips_to_summary() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob", "Cid"]);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::TeamsSummary);
        assert_eq!(app.snapshot().teams.len(), 2);
    }

    #[test]
    fn test_manual_assignment_flow() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob"]);
        // Assignment row is the fourth setting
        app.on_input(Input::Tab);
        for _ in 0..3 {
            app.on_input(Input::Down);
        }
        app.on_input(Input::Right);
        app.on_input(Input::Tab);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::AssigningTeams);

        // Nobody assigned yet
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::AssigningTeams);
        assert!(app.status.is_some());

        // Only two teams to pick from
        app.on_input(Input::Char('3'));
        assert_eq!(app.status.as_deref(), Some("There are only 2 teams"));
        let Screen::Assigning { draft, .. } = &app.screen else {
            panic!("not assigning");
        };
        assert_eq!(draft.team_of(0), None);

        app.on_input(Input::Char('1'));
        app.on_input(Input::Down);
        app.on_input(Input::Char('2'));
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::TeamsSummary);
        assert_eq!(app.snapshot().teams[0].players[0].name, "Ann");
        assert_eq!(app.snapshot().teams[1].players[0].name, "Bob");
    }

    #[test]
    fn test_back_to_setup_keeps_roster() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob"]);
        app.on_input(Input::Enter);
        app.on_input(Input::Esc);
        assert_eq!(app.snapshot().phase, Phase::Setup);
        let Screen::Setup(form) = &app.screen else {
            panic!("not on setup");
        };
        assert_eq!(form.names.len(), 2);
    }

    #[test]
    fn test_generation_waits_for_delay() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob"]);
        app.on_input(Input::Enter);
        app.on_input(Input::Enter);
        app.tick(GENERATION_DELAY / 2);
        assert_eq!(app.snapshot().phase, Phase::GeneratingWords);
        app.tick(GENERATION_DELAY / 2);
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);
        assert_eq!(app.snapshot().word_pool.len(), 10);
    }

    #[test]
    fn test_full_turn_is_scored_and_saved() {
        let mut app = app_in_turn();
        let actor = app.snapshot().current_player().unwrap().id;
        start_turn(&mut app);
        app.on_input(Input::Enter);
        app.on_input(Input::Enter);
        app.tick(Duration::from_secs(30));
        assert!(matches!(app.snapshot().phase, Phase::TurnReview(_)));

        app.on_input(Input::Enter);
        assert!(matches!(app.snapshot().phase, Phase::TurnSummary(_)));
        let scorer = app
            .snapshot()
            .teams
            .iter()
            .flat_map(|t| &t.players)
            .find(|p| p.id == actor)
            .unwrap();
        assert_eq!(scorer.score, 2);
        assert_eq!(stored(&app).as_ref(), Some(app.snapshot()));

        app.on_input(Input::Backspace);
        assert!(matches!(app.snapshot().phase, Phase::TurnReview(_)));
        assert!(app.snapshot().guessed_words.is_empty());

        app.on_input(Input::Enter);
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);
        assert_ne!(app.snapshot().current_player().unwrap().id, actor);
    }

    #[test]
    fn test_review_toggles_change_final_words() {
        let mut app = app_in_turn();
        start_turn(&mut app);
        app.on_input(Input::Enter);
        app.tick(Duration::from_secs(30));

        // Reject the guessed word, accept the buzzer word
        app.on_input(Input::Char(' '));
        app.on_input(Input::Down);
        app.on_input(Input::Char(' '));
        app.on_input(Input::Enter);
        assert_eq!(app.snapshot().guessed_words.len(), 1);
        let Phase::TurnSummary(data) = &app.snapshot().phase else {
            panic!("not on summary");
        };
        assert_eq!(app.snapshot().guessed_words.first(), data.last_word.as_ref());
    }

    #[test]
    fn test_definition_lookup_pauses_and_resumes() {
        let mut app = app_in_turn();
        start_turn(&mut app);
        app.on_input(Input::Char('d'));
        app.tick(Duration::from_secs(10));
        let Screen::Turn(session) = &app.screen else {
            panic!("not in a turn");
        };
        assert!(session.is_paused());
        assert_eq!(session.timer().remaining(), 30);

        app.on_input(Input::Esc);
        let Screen::Turn(session) = &app.screen else {
            panic!("not in a turn");
        };
        assert!(!session.is_paused());
        assert!(app.prompt.is_none());
    }

    #[test]
    fn test_abandon_needs_confirmation() {
        let mut app = app_in_turn();
        app.on_input(Input::Esc);
        assert_eq!(app.prompt, Some(Prompt::Abandon));
        app.on_input(Input::Char('n'));
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);

        app.on_input(Input::Esc);
        app.on_input(Input::Char('y'));
        assert_eq!(app.snapshot(), &Snapshot::default());
        assert_eq!(stored(&app), None);
    }

    #[test]
    fn test_timer_frozen_while_prompt_open() {
        let mut app = app_in_turn();
        start_turn(&mut app);
        app.on_input(Input::Esc);
        app.tick(Duration::from_secs(60));
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);

        app.on_input(Input::Char('n'));
        let Screen::Turn(session) = &app.screen else {
            panic!("not in a turn");
        };
        assert_eq!(session.stage(), TurnStage::Running);
        assert_eq!(session.timer().remaining(), 30);
    }

    #[test]
    fn test_end_game_early_needs_confirmation() {
        let mut red = Team::new(0);
        red.players = vec![Player::new(1, "Ann")];
        let mut blue = Team::new(1);
        blue.players = vec![Player::new(2, "Bob")];
        let snapshot = Snapshot {
            phase: Phase::EndOfRoundSummary,
            players: vec![Player::new(1, "Ann"), Player::new(2, "Bob")],
            teams: vec![red, blue],
            word_pool: vec!["apple".into(), "river".into()],
            guessed_words: vec!["apple".into(), "river".into()],
            position: TurnPosition {
                team: 1,
                cursors: vec![0, 0],
                round: 1,
            },
            ..Default::default()
        };
        let mut app = app_with(snapshot);

        app.on_input(Input::Char('e'));
        assert_eq!(app.prompt, Some(Prompt::EndGameEarly));
        app.on_input(Input::Char('n'));
        assert!(app.prompt.is_none());
        assert_eq!(app.snapshot().phase, Phase::EndOfRoundSummary);

        app.on_input(Input::Char('e'));
        app.on_input(Input::Char('y'));
        assert_eq!(app.snapshot().phase, Phase::RoundSummary);
        assert_eq!(stored(&app).map(|s| s.phase), Some(Phase::RoundSummary));
    }

    #[test]
    fn test_no_abandon_prompt_on_teams_summary() {
        let mut app = app_with(Snapshot::default());
        add_players(&mut app, &["Ann", "Bob"]);
        app.on_input(Input::Enter);
        app.on_input(Input::Esc);
        assert!(app.prompt.is_none());
    }

    #[test]
    fn test_restored_turn_starts_fresh_session() {
        let mut red = Team::new(0);
        red.players = vec![Player::new(1, "Ann")];
        let mut blue = Team::new(1);
        blue.players = vec![Player::new(2, "Bob")];
        let snapshot = Snapshot {
            phase: Phase::PlayerTurn,
            players: vec![Player::new(1, "Ann"), Player::new(2, "Bob")],
            teams: vec![red, blue],
            word_pool: vec!["apple".into(), "river".into(), "cloud".into()],
            guessed_words: vec!["river".into()],
            position: TurnPosition {
                team: 1,
                cursors: vec![0, 0],
                round: 2,
            },
            ..Default::default()
        };
        let app = app_with(snapshot);
        let Screen::Turn(session) = &app.screen else {
            panic!("not in a turn");
        };
        assert_eq!(session.stage(), TurnStage::Ready);
        assert_eq!(session.words_left(), 2);
        assert_eq!(session.timer().duration(), 30);
    }

    #[test]
    fn test_restored_generation_reruns() {
        let mut red = Team::new(0);
        red.players = vec![Player::new(1, "Ann")];
        let mut blue = Team::new(1);
        blue.players = vec![Player::new(2, "Bob")];
        let snapshot = Snapshot {
            phase: Phase::GeneratingWords,
            players: vec![Player::new(1, "Ann"), Player::new(2, "Bob")],
            teams: vec![red, blue],
            position: TurnPosition {
                team: 0,
                cursors: vec![0, 0],
                round: 1,
            },
            ..Default::default()
        };
        let mut app = app_with(snapshot);
        app.tick(GENERATION_DELAY);
        assert_eq!(app.snapshot().phase, Phase::PlayerTurn);
        assert_eq!(app.snapshot().word_pool.len(), 10);
    }

    #[test]
    fn test_setup_uses_defaults_for_new_game() {
        let app = App::new(
            Snapshot::default(),
            None,
            StdRng::seed_from_u64(1),
            Box::new(Muted),
            GameConfig {
                timer_seconds: 60,
                ..Default::default()
            },
        );
        let Screen::Setup(form) = &app.screen else {
            panic!("not on setup");
        };
        assert_eq!(form.config.timer_seconds, 60);
    }
}
