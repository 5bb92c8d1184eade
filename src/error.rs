//! Error types shared across the game core

use crate::game::machine::InvalidTransition;
use thiserror::Error;

/// Errors returned by game transitions. The snapshot is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Too few players or teams, or more teams than players.
    #[error(
        "minimum players: need at least 2 players, at least 2 teams, and no more teams than players (got {players} players for {teams} teams)"
    )]
    MinimumPlayers { players: usize, teams: usize },
    /// A player name was blank after trimming.
    #[error("player name cannot be empty")]
    EmptyName,
    /// Two players share a name (case-insensitive).
    #[error("duplicate player name: {0}")]
    DuplicateName(String),
    /// No difficulty tier selected.
    #[error("select at least one difficulty")]
    NoDifficulty,
    #[error("words per player must be at least 1")]
    NoWordsPerPlayer,
    #[error("turn timer must be at least 1 second")]
    NoTimer,
    /// Manual assignment confirmed while players are still unassigned.
    #[error("{count} player(s) still unassigned")]
    UnassignedPlayers { count: usize },
    /// Submitted teams do not match the roster.
    #[error("invalid team assignment: {0}")]
    InvalidAssignment(String),
    /// The word source produced nothing for the selected tiers.
    #[error("no words available for the selected difficulties")]
    EmptyWordPool,
    /// Reviewed word list does not fit the remaining pool.
    #[error("invalid review: {0}")]
    InvalidReview(String),
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

/// A parsed snapshot that breaks the data-model invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inconsistent snapshot: {0}")]
pub struct InconsistentSnapshot(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_players_message() {
        let err = GameError::MinimumPlayers {
            players: 2,
            teams: 1,
        };
        assert!(err.to_string().starts_with("minimum players"));
    }

    #[test]
    fn test_duplicate_name_message() {
        let err = GameError::DuplicateName("Ann".into());
        assert_eq!(err.to_string(), "duplicate player name: Ann");
    }
}
