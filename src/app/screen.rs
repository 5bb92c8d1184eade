//! Screen-local state
//!
//! Everything here is scratch state for the screen currently shown: the
//! setup form, the manual assignment draft, the running turn and the review
//! draft. None of it is persisted; the screen is rebuilt from the snapshot
//! whenever the phase changes.

use crate::game::roster::{contains_name, AssignmentDraft};
use crate::game::turn::{ReviewDraft, TurnSession};
use crate::game::{AssignmentMethod, Difficulty, GameConfig, MIN_TEAMS, TIMER_CHOICES};
use std::time::Duration;

/// Longest player name the setup form accepts.
pub const MAX_NAME_LEN: usize = 20;

/// Most teams the setup form offers.
pub const MAX_TEAMS: usize = 8;

/// Most words per player the setup form offers.
pub const MAX_WORDS_PER_PLAYER: u32 = 20;

/// A row of the setup form below the name input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupRow {
    Teams,
    WordsPerPlayer,
    Timer,
    Assignment,
    Tier(Difficulty),
    Player(usize),
    Recent(usize),
}

impl SetupRow {
    pub fn is_setting(&self) -> bool {
        !matches!(self, SetupRow::Player(_) | SetupRow::Recent(_))
    }
}

/// Which part of the setup form receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    NameInput,
    Rows,
}

/// The roster and settings being edited before a game starts.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub names: Vec<String>,
    pub name_input: String,
    pub config: GameConfig,
    pub focus: SetupFocus,
    pub selected: usize,
}

impl SetupForm {
    pub fn new(names: Vec<String>, config: GameConfig) -> Self {
        Self {
            names,
            name_input: String::new(),
            config,
            focus: SetupFocus::NameInput,
            selected: 0,
        }
    }

    /// Recent names not already on the roster.
    pub fn recent_candidates<'a>(&self, recent: &'a [String]) -> Vec<&'a String> {
        recent
            .iter()
            .filter(|name| !contains_name(&self.names, name))
            .collect()
    }

    /// All rows in display order.
    pub fn rows(&self, recent: &[String]) -> Vec<SetupRow> {
        let mut rows = vec![
            SetupRow::Teams,
            SetupRow::WordsPerPlayer,
            SetupRow::Timer,
            SetupRow::Assignment,
        ];
        rows.extend(Difficulty::all().iter().map(|d| SetupRow::Tier(*d)));
        rows.extend((0..self.names.len()).map(SetupRow::Player));
        rows.extend((0..self.recent_candidates(recent).len()).map(SetupRow::Recent));
        rows
    }

    pub fn selected_row(&self, recent: &[String]) -> Option<SetupRow> {
        self.rows(recent).get(self.selected).copied()
    }

    pub fn move_selection(&mut self, recent: &[String], down: bool) {
        let count = self.rows(recent).len();
        if count == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(count - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    pub fn push_char(&mut self, c: char) {
        if self.name_input.chars().count() < MAX_NAME_LEN && !c.is_control() {
            self.name_input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.name_input.pop();
    }

    /// Add the typed name to the roster. Returns why it was refused, if it was.
    pub fn add_typed_name(&mut self) -> Result<(), String> {
        let name = self.name_input.trim().to_string();
        self.add_name(&name)?;
        self.name_input.clear();
        Ok(())
    }

    pub fn add_name(&mut self, name: &str) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Player name cannot be empty".to_string());
        }
        if contains_name(&self.names, name) {
            return Err(format!("{name} is already playing"));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn add_recent(&mut self, recent: &[String], index: usize) -> Result<(), String> {
        let name = self
            .recent_candidates(recent)
            .get(index)
            .map(|n| n.to_string())
            .ok_or_else(|| "No such recent player".to_string())?;
        self.add_name(&name)?;
        self.clamp_selection(recent);
        Ok(())
    }

    pub fn remove_player(&mut self, recent: &[String], index: usize) {
        if index < self.names.len() {
            self.names.remove(index);
            self.clamp_selection(recent);
        }
    }

    /// Step the setting on `row` up or down (or toggle it).
    pub fn adjust(&mut self, row: SetupRow, up: bool) -> Result<(), String> {
        let config = &mut self.config;
        match row {
            SetupRow::Teams => {
                config.team_count = step(config.team_count, up, MIN_TEAMS, MAX_TEAMS);
            }
            SetupRow::WordsPerPlayer => {
                config.words_per_player =
                    step(config.words_per_player, up, 1, MAX_WORDS_PER_PLAYER);
            }
            SetupRow::Timer => config.timer_seconds = cycle_timer(config.timer_seconds, up),
            SetupRow::Assignment => {
                config.assignment = match config.assignment {
                    AssignmentMethod::Random => AssignmentMethod::Manual,
                    AssignmentMethod::Manual => AssignmentMethod::Random,
                };
            }
            SetupRow::Tier(tier) => return self.toggle_tier(tier),
            SetupRow::Player(_) | SetupRow::Recent(_) => {}
        }
        Ok(())
    }

    /// Select or deselect a tier, keeping selection order. The last
    /// selected tier stays selected.
    pub fn toggle_tier(&mut self, tier: Difficulty) -> Result<(), String> {
        let tiers = &mut self.config.difficulties;
        if let Some(pos) = tiers.iter().position(|t| *t == tier) {
            if tiers.len() == 1 {
                return Err("At least one difficulty must stay selected".to_string());
            }
            tiers.remove(pos);
        } else {
            tiers.push(tier);
        }
        Ok(())
    }

    fn clamp_selection(&mut self, recent: &[String]) {
        let count = self.rows(recent).len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

fn step<T>(value: T, up: bool, min: T, max: T) -> T
where
    T: Copy + Ord + std::ops::Add<Output = T> + std::ops::Sub<Output = T> + From<u8>,
{
    let one = T::from(1);
    if up {
        if value >= max {
            max
        } else {
            value + one
        }
    } else if value <= min {
        min
    } else {
        value - one
    }
}

/// Next (or previous) entry of [`TIMER_CHOICES`], wrapping around.
pub fn cycle_timer(current: u32, forward: bool) -> u32 {
    let n = TIMER_CHOICES.len();
    let index = TIMER_CHOICES.iter().position(|t| *t == current);
    let next = match (index, forward) {
        (Some(i), true) => (i + 1) % n,
        (Some(i), false) => (i + n - 1) % n,
        (None, _) => 0,
    };
    TIMER_CHOICES[next]
}

/// Confirmation waiting for a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Abandon,
    EndGameEarly,
}

impl Prompt {
    pub fn question(&self) -> &'static str {
        match self {
            Prompt::Abandon => "Abandon this game? All progress will be lost. (y/n)",
            Prompt::EndGameEarly => "End the game now and show final scores? (y/n)",
        }
    }
}

/// Local state for the screen of the current phase.
#[derive(Debug, Clone, Default)]
pub enum Screen {
    #[default]
    Plain,
    Setup(SetupForm),
    Assigning {
        draft: AssignmentDraft,
        selected: usize,
    },
    Generating {
        waited: Duration,
    },
    Turn(TurnSession),
    Review {
        draft: ReviewDraft,
        selected: usize,
    },
}

impl Screen {
    /// Rows in the review list: one per guessed word plus the buzzer word.
    pub fn review_rows(draft: &ReviewDraft) -> usize {
        draft.entries().len() + usize::from(draft.last_word().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::pool::allocate;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_add_typed_name_trims_and_clears() {
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        for c in "  Ann ".chars() {
            form.push_char(c);
        }
        form.add_typed_name().unwrap();
        assert_eq!(form.names, names(&["Ann"]));
        assert!(form.name_input.is_empty());
    }

    #[test]
    fn test_add_refuses_blank_and_duplicates() {
        let mut form = SetupForm::new(names(&["Ann"]), GameConfig::default());
        assert!(form.add_name("   ").is_err());
        assert!(form.add_name("ANN").is_err());
        assert_eq!(form.names.len(), 1);
    }

    #[test]
    fn test_name_length_is_capped() {
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        for _ in 0..MAX_NAME_LEN + 5 {
            form.push_char('x');
        }
        assert_eq!(form.name_input.len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_recent_candidates_skip_roster() {
        let form = SetupForm::new(names(&["bob"]), GameConfig::default());
        let recent = names(&["Ann", "Bob", "Cid"]);
        assert_eq!(form.recent_candidates(&recent), vec!["Ann", "Cid"]);
    }

    #[test]
    fn test_add_recent_and_remove() {
        let recent = names(&["Ann", "Bob"]);
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        form.add_recent(&recent, 1).unwrap();
        assert_eq!(form.names, names(&["Bob"]));
        // Bob is no longer offered
        assert_eq!(form.recent_candidates(&recent), vec!["Ann"]);
        form.remove_player(&recent, 0);
        assert!(form.names.is_empty());
    }

    #[test]
    fn test_last_tier_cannot_be_deselected() {
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        assert!(form.toggle_tier(Difficulty::Easy).is_err());
        form.toggle_tier(Difficulty::Hard).unwrap();
        form.toggle_tier(Difficulty::Medium).unwrap();
        assert_eq!(
            form.config.difficulties,
            vec![Difficulty::Easy, Difficulty::Hard, Difficulty::Medium]
        );
        form.toggle_tier(Difficulty::Easy).unwrap();
        assert_eq!(
            form.config.difficulties,
            vec![Difficulty::Hard, Difficulty::Medium]
        );
    }

    #[test]
    fn test_tiers_keep_selection_order() {
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        form.toggle_tier(Difficulty::Hard).unwrap();
        form.toggle_tier(Difficulty::Easy).unwrap();
        form.toggle_tier(Difficulty::Medium).unwrap();
        assert_eq!(
            form.config.difficulties,
            vec![Difficulty::Hard, Difficulty::Medium]
        );
        // Hard was picked first, so it takes the extra word
        assert_eq!(
            allocate(5, &form.config.difficulties),
            vec![(Difficulty::Hard, 3), (Difficulty::Medium, 2)]
        );
    }

    #[test]
    fn test_adjust_respects_bounds() {
        let mut form = SetupForm::new(Vec::new(), GameConfig::default());
        form.adjust(SetupRow::Teams, false).unwrap();
        assert_eq!(form.config.team_count, MIN_TEAMS);
        form.adjust(SetupRow::Teams, true).unwrap();
        assert_eq!(form.config.team_count, 3);

        form.config.words_per_player = 1;
        form.adjust(SetupRow::WordsPerPlayer, false).unwrap();
        assert_eq!(form.config.words_per_player, 1);

        form.adjust(SetupRow::Assignment, true).unwrap();
        assert_eq!(form.config.assignment, AssignmentMethod::Manual);
    }

    #[test]
    fn test_cycle_timer_wraps() {
        assert_eq!(cycle_timer(30, true), 45);
        assert_eq!(cycle_timer(60, true), 30);
        assert_eq!(cycle_timer(30, false), 60);
        assert_eq!(cycle_timer(17, true), 30);
    }

    #[test]
    fn test_rows_include_players_and_recent() {
        let recent = names(&["Cid"]);
        let form = SetupForm::new(names(&["Ann", "Bob"]), GameConfig::default());
        let rows = form.rows(&recent);
        assert_eq!(rows.len(), 4 + Difficulty::all().len() + 2 + 1);
        assert_eq!(rows.last(), Some(&SetupRow::Recent(0)));
    }

    #[test]
    fn test_selection_stays_in_range() {
        let recent = names(&["Cid"]);
        let mut form = SetupForm::new(names(&["Ann"]), GameConfig::default());
        for _ in 0..50 {
            form.move_selection(&recent, true);
        }
        let last = form.rows(&recent).len() - 1;
        assert_eq!(form.selected, last);
        form.add_recent(&recent, 0).unwrap();
        assert!(form.selected < form.rows(&recent).len());
    }
}
