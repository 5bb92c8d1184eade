//! Game state machine
//!
//! Every transition borrows the current [`Snapshot`] and returns the next
//! one. A transition that is not defined for the current phase returns
//! [`InvalidTransition`] and the caller keeps the old snapshot.

use super::pool;
use super::roster::{self, build_roster, check_assignment};
use super::turn::TurnOutcome;
use super::{Bonus, GameConfig, Phase, ReviewData, Snapshot, Team, TurnPosition};
use crate::error::GameError;
use crate::words::WordSource;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ConfirmSetup,
    CompleteAssignment,
    BackToSetup,
    ConfirmTeams,
    GenerateWords,
    AbortGeneration,
    FinishTurn,
    ConfirmReview,
    NextPlayer,
    ReturnToReview,
    StartNextRound,
    EndGameEarly,
    NewGame,
    Abandon,
}

/// Error returned when an event is applied in a phase that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from}")]
pub struct InvalidTransition {
    pub from: &'static str,
    pub event: GameEvent,
}

/// Where `next_player` sends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Turn,
    RoundOver,
    GameOver,
}

impl Snapshot {
    fn invalid(&self, event: GameEvent) -> GameError {
        GameError::InvalidTransition(InvalidTransition {
            from: self.phase.name(),
            event,
        })
    }

    fn expect_phase(&self, ok: bool, event: GameEvent) -> Result<(), GameError> {
        if ok {
            Ok(())
        } else {
            Err(self.invalid(event))
        }
    }

    /// Setup → AssigningTeams, once the roster and settings pass validation.
    pub fn confirm_setup(&self, names: &[String], config: GameConfig) -> Result<Snapshot, GameError> {
        self.expect_phase(self.phase == Phase::Setup, GameEvent::ConfirmSetup)?;
        let players = build_roster(names, &config)?;
        Ok(Snapshot {
            phase: Phase::AssigningTeams,
            config,
            players,
            ..Snapshot::default()
        })
    }

    /// AssigningTeams → TeamsSummary with the given teams.
    pub fn complete_assignment(&self, teams: Vec<Team>) -> Result<Snapshot, GameError> {
        self.expect_phase(
            self.phase == Phase::AssigningTeams,
            GameEvent::CompleteAssignment,
        )?;
        let teams = check_assignment(&self.players, teams, self.config.team_count)?;
        let team_count = teams.len();
        Ok(Snapshot {
            phase: Phase::TeamsSummary,
            teams,
            position: TurnPosition {
                team: 0,
                cursors: vec![0; team_count],
                round: 1,
            },
            word_pool: Vec::new(),
            guessed_words: Vec::new(),
            current_turn_words: Vec::new(),
            bonus: None,
            ..self.clone()
        })
    }

    /// Random assignment: shuffle the roster and deal it into teams.
    pub fn assign_randomly<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Snapshot, GameError> {
        self.expect_phase(
            self.phase == Phase::AssigningTeams,
            GameEvent::CompleteAssignment,
        )?;
        let teams = roster::deal_teams(&self.players, self.config.team_count, rng);
        self.complete_assignment(teams)
    }

    /// AssigningTeams or TeamsSummary → Setup. Teams are discarded.
    pub fn back_to_setup(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(
            matches!(self.phase, Phase::AssigningTeams | Phase::TeamsSummary),
            GameEvent::BackToSetup,
        )?;
        Ok(Snapshot {
            phase: Phase::Setup,
            config: self.config.clone(),
            players: self.players.clone(),
            ..Snapshot::default()
        })
    }

    /// TeamsSummary → GeneratingWords.
    pub fn confirm_teams(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(self.phase == Phase::TeamsSummary, GameEvent::ConfirmTeams)?;
        Ok(Snapshot {
            phase: Phase::GeneratingWords,
            ..self.clone()
        })
    }

    /// GeneratingWords → PlayerTurn with a freshly built round-one pool.
    ///
    /// Fails with [`GameError::NoDifficulty`] or [`GameError::EmptyWordPool`];
    /// the caller then reverts with [`Snapshot::abort_generation`].
    pub fn generate_words<W, R>(&self, source: &W, rng: &mut R) -> Result<Snapshot, GameError>
    where
        W: WordSource,
        R: Rng + ?Sized,
    {
        self.expect_phase(
            self.phase == Phase::GeneratingWords,
            GameEvent::GenerateWords,
        )?;
        if self.config.difficulties.is_empty() {
            return Err(GameError::NoDifficulty);
        }

        let total = self.players.len() * self.config.words_per_player as usize;
        let word_pool = pool::build_pool(source, total, &self.config.difficulties, rng);
        if word_pool.is_empty() {
            return Err(GameError::EmptyWordPool);
        }

        Ok(Snapshot {
            phase: Phase::PlayerTurn,
            word_pool,
            guessed_words: Vec::new(),
            current_turn_words: Vec::new(),
            ..self.clone()
        })
    }

    /// GeneratingWords → TeamsSummary after a failed generation.
    pub fn abort_generation(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(
            self.phase == Phase::GeneratingWords,
            GameEvent::AbortGeneration,
        )?;
        Ok(Snapshot {
            phase: Phase::TeamsSummary,
            ..self.clone()
        })
    }

    /// PlayerTurn → TurnReview.
    ///
    /// Any pending bonus is consumed here. A new one is recorded when the
    /// pool ran out with time left.
    pub fn finish_turn(&self, outcome: TurnOutcome) -> Result<Snapshot, GameError> {
        self.expect_phase(self.phase == Phase::PlayerTurn, GameEvent::FinishTurn)?;

        let bonus = match (outcome.remaining_time, self.current_player()) {
            (Some(remaining), Some(player)) if remaining > 0 => Some(Bonus {
                remaining,
                player_id: player.id,
            }),
            _ => None,
        };

        Ok(Snapshot {
            phase: Phase::TurnReview(ReviewData {
                words: outcome.words,
                last_word: outcome.last_word,
            }),
            bonus,
            ..self.clone()
        })
    }

    /// TurnReview → TurnSummary, committing `final_words` to the round and
    /// crediting the active player (and so their team).
    pub fn confirm_review(&self, final_words: Vec<String>) -> Result<Snapshot, GameError> {
        let Phase::TurnReview(review) = &self.phase else {
            return Err(self.invalid(GameEvent::ConfirmReview));
        };

        let mut seen = HashSet::new();
        for word in &final_words {
            if !self.word_pool.contains(word) {
                return Err(GameError::InvalidReview(format!("{word:?} is not in the pool")));
            }
            if self.guessed_words.contains(word) {
                return Err(GameError::InvalidReview(format!(
                    "{word:?} was already guessed this round"
                )));
            }
            if !seen.insert(word) {
                return Err(GameError::InvalidReview(format!("{word:?} listed twice")));
            }
        }

        let mut next = Snapshot {
            phase: Phase::TurnSummary(review.clone()),
            ..self.clone()
        };
        next.credit_active_player(final_words.len() as u32, true);
        next.guessed_words.extend(final_words.iter().cloned());
        next.current_turn_words = final_words;
        Ok(next)
    }

    /// TurnSummary → TurnReview, undoing exactly what `confirm_review` committed.
    pub fn return_to_review(&self) -> Result<Snapshot, GameError> {
        let Phase::TurnSummary(review) = &self.phase else {
            return Err(self.invalid(GameEvent::ReturnToReview));
        };

        let mut next = Snapshot {
            phase: Phase::TurnReview(review.clone()),
            ..self.clone()
        };
        next.credit_active_player(self.current_turn_words.len() as u32, false);
        next.guessed_words
            .retain(|w| !self.current_turn_words.contains(w));
        next.current_turn_words.clear();
        Ok(next)
    }

    /// Where `next_player` will lead from the current summary.
    pub fn next_step(&self) -> NextStep {
        if !self.is_round_complete() {
            NextStep::Turn
        } else if self.is_final_round() {
            NextStep::GameOver
        } else {
            NextStep::RoundOver
        }
    }

    /// TurnSummary → PlayerTurn for the next seat, or to the round/game
    /// summary once every pool word is guessed.
    pub fn next_player<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Snapshot, GameError> {
        self.expect_phase(
            matches!(self.phase, Phase::TurnSummary(_)),
            GameEvent::NextPlayer,
        )?;

        let phase = match self.next_step() {
            NextStep::RoundOver => Phase::EndOfRoundSummary,
            NextStep::GameOver => Phase::RoundSummary,
            NextStep::Turn => {
                return Ok(Snapshot {
                    phase: Phase::PlayerTurn,
                    word_pool: pool::reshuffle(&self.word_pool, rng),
                    current_turn_words: Vec::new(),
                    position: self.rotated(),
                    ..self.clone()
                });
            }
        };
        Ok(Snapshot {
            phase,
            ..self.clone()
        })
    }

    /// EndOfRoundSummary → PlayerTurn in the next round. A pending bonus
    /// player takes the first seat; otherwise rotation continues.
    pub fn start_next_round<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Snapshot, GameError> {
        self.expect_phase(
            self.phase == Phase::EndOfRoundSummary,
            GameEvent::StartNextRound,
        )?;

        let mut position = self
            .bonus
            .and_then(|bonus| self.seat_of(bonus.player_id))
            .map(|(team, index)| {
                let mut position = self.position.clone();
                position.team = team;
                position.cursors[team] = index;
                position
            })
            .unwrap_or_else(|| self.rotated());
        position.round = self.position.round + 1;

        Ok(Snapshot {
            phase: Phase::PlayerTurn,
            word_pool: pool::reshuffle(&self.word_pool, rng),
            guessed_words: Vec::new(),
            current_turn_words: Vec::new(),
            position,
            ..self.clone()
        })
    }

    /// EndOfRoundSummary → RoundSummary without playing the remaining rounds.
    pub fn end_game_early(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(
            self.phase == Phase::EndOfRoundSummary,
            GameEvent::EndGameEarly,
        )?;
        Ok(Snapshot {
            phase: Phase::RoundSummary,
            ..self.clone()
        })
    }

    /// RoundSummary → a blank Setup.
    pub fn new_game(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(self.phase == Phase::RoundSummary, GameEvent::NewGame)?;
        Ok(Snapshot::default())
    }

    /// Drop a game in progress and return to a blank Setup.
    pub fn abandon(&self) -> Result<Snapshot, GameError> {
        self.expect_phase(self.can_abandon(), GameEvent::Abandon)?;
        Ok(Snapshot::default())
    }

    pub fn can_abandon(&self) -> bool {
        !matches!(
            self.phase,
            Phase::Setup | Phase::TeamsSummary | Phase::GeneratingWords
        )
    }

    /// Final results for the summary screens.
    pub fn standings(&self) -> roster::Standings {
        roster::standings(&self.teams)
    }

    /// Round-robin advance: the next team becomes active and its cursor moves on.
    fn rotated(&self) -> TurnPosition {
        let mut position = self.position.clone();
        let team_count = self.teams.len();
        if team_count == 0 {
            return position;
        }
        let next = (position.team + 1) % team_count;
        let roster_size = self.teams[next].players.len().max(1);
        position.team = next;
        position.cursors[next] = (position.cursors[next] + 1) % roster_size;
        position
    }

    /// `(team index, player index)` of a player.
    fn seat_of(&self, id: super::PlayerId) -> Option<(usize, usize)> {
        self.teams
            .iter()
            .enumerate()
            .find_map(|(t, team)| team.position_of(id).map(|p| (t, p)))
    }

    fn credit_active_player(&mut self, points: u32, add: bool) {
        let team = self.position.team;
        let Some(cursor) = self.position.cursors.get(team).copied() else {
            return;
        };
        if let Some(player) = self
            .teams
            .get_mut(team)
            .and_then(|t| t.players.get_mut(cursor))
        {
            player.score = if add {
                player.score + points
            } else {
                player.score.saturating_sub(points)
            };
        }
    }
}
