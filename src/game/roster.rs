//! Roster building, team assignment, and standings

use super::{GameConfig, Player, PlayerId, Team, MIN_PLAYERS, MIN_TEAMS};
use crate::error::GameError;
use rand::prelude::*;
use std::collections::HashSet;

/// Check the setup preconditions and build the roster.
///
/// Names are trimmed. Ids are assigned in entry order starting at 1.
pub fn build_roster(names: &[String], config: &GameConfig) -> Result<Vec<Player>, GameError> {
    let players = names.len();
    let teams = config.team_count;
    if players < MIN_PLAYERS || teams < MIN_TEAMS || players < teams {
        return Err(GameError::MinimumPlayers { players, teams });
    }
    if config.difficulties.is_empty() {
        return Err(GameError::NoDifficulty);
    }
    if config.words_per_player == 0 {
        return Err(GameError::NoWordsPerPlayer);
    }
    if config.timer_seconds == 0 {
        return Err(GameError::NoTimer);
    }

    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(players);
    for (id, raw) in (1..).zip(names) {
        let name = raw.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(GameError::DuplicateName(name.to_string()));
        }
        roster.push(Player::new(id, name));
    }
    Ok(roster)
}

/// Case-insensitive membership check used by the setup form.
pub fn contains_name(names: &[String], candidate: &str) -> bool {
    let candidate = candidate.trim().to_lowercase();
    names.iter().any(|n| n.trim().to_lowercase() == candidate)
}

/// Shuffle the roster and deal it round-robin into `team_count` teams.
pub fn deal_teams<R: Rng + ?Sized>(players: &[Player], team_count: usize, rng: &mut R) -> Vec<Team> {
    let mut teams: Vec<Team> = (0..team_count).map(Team::new).collect();
    if team_count == 0 {
        return teams;
    }
    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    for (i, player) in shuffled.into_iter().enumerate() {
        teams[i % team_count].players.push(player);
    }
    teams
}

/// Check submitted teams against the roster: every player exactly once,
/// right number of teams, no empty team. Scores are reset.
pub fn check_assignment(
    roster: &[Player],
    teams: Vec<Team>,
    team_count: usize,
) -> Result<Vec<Team>, GameError> {
    if teams.len() != team_count {
        return Err(GameError::InvalidAssignment(format!(
            "expected {} teams, got {}",
            team_count,
            teams.len()
        )));
    }

    let roster_ids: HashSet<PlayerId> = roster.iter().map(|p| p.id).collect();
    let mut assigned = HashSet::new();
    for player in teams.iter().flat_map(|t| &t.players) {
        if !roster_ids.contains(&player.id) {
            return Err(GameError::InvalidAssignment(format!(
                "{} is not on the roster",
                player.name
            )));
        }
        if !assigned.insert(player.id) {
            return Err(GameError::InvalidAssignment(format!(
                "{} is on more than one team",
                player.name
            )));
        }
    }

    let unassigned = roster_ids.len() - assigned.len();
    if unassigned > 0 {
        return Err(GameError::UnassignedPlayers { count: unassigned });
    }
    if let Some(empty) = teams.iter().find(|t| t.players.is_empty()) {
        return Err(GameError::InvalidAssignment(format!("{} has no players", empty.name)));
    }

    Ok(teams
        .into_iter()
        .map(|mut team| {
            team.players.iter_mut().for_each(|p| p.score = 0);
            team
        })
        .collect())
}

/// Manual assignment in progress: each player is on one team or unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    players: Vec<Player>,
    slots: Vec<Option<usize>>,
    team_count: usize,
}

impl AssignmentDraft {
    pub fn new(players: &[Player], team_count: usize) -> Self {
        Self {
            players: players.to_vec(),
            slots: vec![None; players.len()],
            team_count,
        }
    }

    pub fn assign(&mut self, player: usize, team: usize) {
        if team < self.team_count {
            if let Some(slot) = self.slots.get_mut(player) {
                *slot = Some(team);
            }
        }
    }

    pub fn unassign(&mut self, player: usize) {
        if let Some(slot) = self.slots.get_mut(player) {
            *slot = None;
        }
    }

    /// Move a player to the next team, wrapping through "unassigned".
    pub fn cycle(&mut self, player: usize, forward: bool) {
        let Some(slot) = self.slots.get(player).copied() else {
            return;
        };
        let next = match (slot, forward) {
            (None, true) => Some(0),
            (None, false) => self.team_count.checked_sub(1),
            (Some(t), true) if t + 1 < self.team_count => Some(t + 1),
            (Some(t), false) if t > 0 => Some(t - 1),
            _ => None,
        };
        self.slots[player] = next;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn team_of(&self, player: usize) -> Option<usize> {
        self.slots.get(player).copied().flatten()
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .zip(&self.slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(p, _)| p)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Teams in palette order, members in the order they appear on the roster.
    pub fn teams(&self) -> Vec<Team> {
        let mut teams: Vec<Team> = (0..self.team_count).map(Team::new).collect();
        for (player, slot) in self.players.iter().zip(&self.slots) {
            if let Some(team) = slot {
                teams[*team].players.push(player.clone());
            }
        }
        teams
    }
}

/// End-of-round or final results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    /// `(team index, score)`, highest score first.
    pub ranking: Vec<(usize, u32)>,
    /// Team indices sharing the top score. Empty when nobody scored.
    pub winning_teams: Vec<usize>,
    /// Players sharing the top individual score. Empty when nobody scored.
    pub best_players: Vec<PlayerId>,
}

pub fn standings(teams: &[Team]) -> Standings {
    let mut ranking: Vec<(usize, u32)> = teams.iter().map(Team::score).enumerate().collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let top_team = ranking.first().map(|(_, s)| *s).unwrap_or(0);
    let winning_teams = if top_team > 0 {
        ranking
            .iter()
            .filter(|(_, s)| *s == top_team)
            .map(|(i, _)| *i)
            .collect()
    } else {
        Vec::new()
    };

    let players = teams.iter().flat_map(|t| &t.players);
    let top_player = players.clone().map(|p| p.score).max().unwrap_or(0);
    let best_players = if top_player > 0 {
        players
            .filter(|p| p.score == top_player)
            .map(|p| p.id)
            .collect()
    } else {
        Vec::new()
    };

    Standings {
        ranking,
        winning_teams,
        best_players,
    }
}
