//! Command-line configuration

use crate::game::{AssignmentMethod, Difficulty, GameConfig, MIN_TEAMS, TIMER_CHOICES};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Pause on the loading screen before a generated pool is revealed.
pub const GENERATION_DELAY: Duration = Duration::from_millis(500);

/// How often the event loop wakes up when no key is pressed.
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Hat: a party word-guessing game for the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "hat", version, about)]
pub struct Args {
    /// Default turn length in seconds
    #[arg(long, default_value_t = TIMER_CHOICES[0], value_parser = clap::value_parser!(u32).range(1..))]
    pub timer: u32,

    /// Default number of words each player contributes to the pool
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub words_per_player: u32,

    /// Default number of teams
    #[arg(long, default_value_t = MIN_TEAMS)]
    pub teams: usize,

    /// Seed the random generator for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable audio cues
    #[arg(long)]
    pub mute: bool,

    /// Store the saved game and logs here instead of the OS data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Ignore any saved game and start at setup
    #[arg(long)]
    pub fresh: bool,

    /// Log filter, e.g. `info` or `hat=debug` (overrides RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Setup defaults derived from the command line.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            difficulties: vec![Difficulty::Easy],
            words_per_player: self.words_per_player,
            team_count: self.teams.max(MIN_TEAMS),
            timer_seconds: self.timer,
            assignment: AssignmentMethod::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_setup_defaults() {
        let args = Args::parse_from(["hat"]);
        assert_eq!(args.game_config(), GameConfig::default());
        assert!(!args.mute);
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "hat",
            "--timer",
            "45",
            "--words-per-player",
            "3",
            "--teams",
            "3",
            "--seed",
            "7",
            "--mute",
        ]);
        let config = args.game_config();
        assert_eq!(config.timer_seconds, 45);
        assert_eq!(config.words_per_player, 3);
        assert_eq!(config.team_count, 3);
        assert_eq!(args.seed, Some(7));
        assert!(args.mute);
    }

    #[test]
    fn test_single_team_is_raised_to_minimum() {
        let args = Args::parse_from(["hat", "--teams", "1"]);
        assert_eq!(args.game_config().team_count, MIN_TEAMS);
    }

    #[test]
    fn test_zero_timer_rejected() {
        assert!(Args::try_parse_from(["hat", "--timer", "0"]).is_err());
    }
}
