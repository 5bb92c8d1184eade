//! Game logic: roster, word pool, turn rotation, scoring
//!
//! The [`Snapshot`] is the single authoritative value describing a game.
//! Transitions live in [`machine`] and always produce a fresh snapshot.

pub mod machine;
pub mod pool;
pub mod roster;
pub mod timer;
pub mod turn;

use crate::error::InconsistentSnapshot;
use serde::{Deserialize, Serialize};

/// Number of rounds in a full game.
pub const TOTAL_ROUNDS: u8 = 3;

/// Minimum roster size accepted at setup.
pub const MIN_PLAYERS: usize = 2;

/// Minimum number of teams accepted at setup.
pub const MIN_TEAMS: usize = 2;

/// Turn lengths offered by the setup screen, in seconds.
pub const TIMER_CHOICES: [u32; 3] = [30, 45, 60];

/// Name and rules of one of the three rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundDetails {
    pub name: &'static str,
    pub description: &'static str,
}

const ROUNDS: [RoundDetails; TOTAL_ROUNDS as usize] = [
    RoundDetails {
        name: "Explain",
        description: "Describe the word without saying it or any word sharing its root.",
    },
    RoundDetails {
        name: "Mime",
        description: "Act the word out with gestures only. No sounds, no words.",
    },
    RoundDetails {
        name: "Association",
        description: "Give exactly one word as a hint.",
    },
];

impl RoundDetails {
    /// Details for a 1-based round number, clamped to the valid range.
    pub fn for_round(round: u8) -> &'static RoundDetails {
        let index = usize::from(round.clamp(1, TOTAL_ROUNDS)) - 1;
        &ROUNDS[index]
    }
}

/// Word difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in display order
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// How players are split into teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignmentMethod {
    #[default]
    Random,
    Manual,
}

impl AssignmentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentMethod::Random => "Random",
            AssignmentMethod::Manual => "Manual",
        }
    }
}

/// Team color palette, cycled by team index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Teal,
}

impl TeamColor {
    const PALETTE: [TeamColor; 8] = [
        TeamColor::Red,
        TeamColor::Blue,
        TeamColor::Green,
        TeamColor::Yellow,
        TeamColor::Purple,
        TeamColor::Orange,
        TeamColor::Pink,
        TeamColor::Teal,
    ];

    /// Color for the team at `index`, wrapping around the palette.
    pub fn from_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamColor::Red => "Red",
            TeamColor::Blue => "Blue",
            TeamColor::Green => "Green",
            TeamColor::Yellow => "Yellow",
            TeamColor::Purple => "Purple",
            TeamColor::Orange => "Orange",
            TeamColor::Pink => "Pink",
            TeamColor::Teal => "Teal",
        }
    }
}

/// Stable player identifier, unique within a game.
pub type PlayerId = u32;

/// A player and their running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
        }
    }
}

/// A team: ordered players whose order drives turn rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub color: TeamColor,
    pub players: Vec<Player>,
}

impl Team {
    /// Empty team for slot `index`, named after its palette color.
    pub fn new(index: usize) -> Self {
        let color = TeamColor::from_index(index);
        Self {
            name: format!("Team {}", color.label()),
            color,
            players: Vec::new(),
        }
    }

    /// Aggregate score: the sum of the players' scores.
    pub fn score(&self) -> u32 {
        self.players.iter().map(|p| p.score).sum()
    }

    pub fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }
}

/// Settings collected on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulties: Vec<Difficulty>,
    pub words_per_player: u32,
    pub team_count: usize,
    pub timer_seconds: u32,
    pub assignment: AssignmentMethod,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulties: vec![Difficulty::Easy],
            words_per_player: 5,
            team_count: MIN_TEAMS,
            timer_seconds: TIMER_CHOICES[0],
            assignment: AssignmentMethod::Random,
        }
    }
}

/// Leftover time owed to the player who emptied the pool early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub remaining: u32,
    pub player_id: PlayerId,
}

/// Whose turn it is: the active team, each team's cursor, and the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPosition {
    pub team: usize,
    pub cursors: Vec<usize>,
    pub round: u8,
}

impl Default for TurnPosition {
    fn default() -> Self {
        Self {
            team: 0,
            cursors: Vec::new(),
            round: 1,
        }
    }
}

/// Words up for review after a turn, plus the word cut off by the buzzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewData {
    pub words: Vec<String>,
    pub last_word: Option<String>,
}

/// Current state tag, with the payload that only exists in that state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data")]
pub enum Phase {
    #[default]
    Setup,
    AssigningTeams,
    TeamsSummary,
    GeneratingWords,
    PlayerTurn,
    TurnReview(ReviewData),
    TurnSummary(ReviewData),
    EndOfRoundSummary,
    RoundSummary,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::AssigningTeams => "AssigningTeams",
            Phase::TeamsSummary => "TeamsSummary",
            Phase::GeneratingWords => "GeneratingWords",
            Phase::PlayerTurn => "PlayerTurn",
            Phase::TurnReview(_) => "TurnReview",
            Phase::TurnSummary(_) => "TurnSummary",
            Phase::EndOfRoundSummary => "EndOfRoundSummary",
            Phase::RoundSummary => "RoundSummary",
        }
    }
}

/// Complete, serializable game state. The unit of persistence and rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub config: GameConfig,
    /// Roster as entered at setup, kept for going back from team assignment.
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub word_pool: Vec<String>,
    /// Words confirmed guessed during the current round.
    pub guessed_words: Vec<String>,
    /// Words committed by the most recent review, used for reversal.
    pub current_turn_words: Vec<String>,
    pub position: TurnPosition,
    pub bonus: Option<Bonus>,
}

impl Snapshot {
    pub fn round(&self) -> u8 {
        self.position.round
    }

    pub fn round_details(&self) -> &'static RoundDetails {
        RoundDetails::for_round(self.position.round)
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.position.team)
    }

    /// The player in the active seat.
    pub fn current_player(&self) -> Option<&Player> {
        let team = self.current_team()?;
        let cursor = *self.position.cursors.get(self.position.team)?;
        team.players.get(cursor)
    }

    /// Pool words not yet guessed this round, in pool order.
    pub fn remaining_words(&self) -> Vec<String> {
        self.word_pool
            .iter()
            .filter(|w| !self.guessed_words.contains(w))
            .cloned()
            .collect()
    }

    /// Timer budget for the next turn: pending bonus time wins over the setting.
    pub fn turn_duration(&self) -> u32 {
        self.bonus
            .map(|b| b.remaining)
            .unwrap_or(self.config.timer_seconds)
    }

    /// True once every pool word has been confirmed this round.
    pub fn is_round_complete(&self) -> bool {
        self.guessed_words.len() >= self.word_pool.len()
    }

    pub fn is_final_round(&self) -> bool {
        self.position.round >= TOTAL_ROUNDS
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Verify the structural invariants a restored snapshot must satisfy.
    pub fn check_invariants(&self) -> Result<(), InconsistentSnapshot> {
        let fail = |msg: String| Err(InconsistentSnapshot(msg));

        if !(1..=TOTAL_ROUNDS).contains(&self.position.round) {
            return fail(format!("round {} out of range", self.position.round));
        }
        if self.guessed_words.len() > self.word_pool.len() {
            return fail("more guessed words than pool words".to_string());
        }
        if let Some(word) = self
            .guessed_words
            .iter()
            .find(|w| !self.word_pool.contains(w))
        {
            return fail(format!("guessed word {word:?} is not in the pool"));
        }

        let in_game = !matches!(self.phase, Phase::Setup | Phase::AssigningTeams);
        if in_game {
            if self.teams.is_empty() {
                return fail(format!("no teams in phase {}", self.phase.name()));
            }
            if self.position.cursors.len() != self.teams.len() {
                return fail("cursor count does not match team count".to_string());
            }
            if self.position.team >= self.teams.len() {
                return fail("active team index out of range".to_string());
            }
            for (team, cursor) in self.teams.iter().zip(&self.position.cursors) {
                if team.players.is_empty() || *cursor >= team.players.len() {
                    return fail(format!("cursor out of range for {}", team.name));
                }
            }
        }

        Ok(())
    }
}
