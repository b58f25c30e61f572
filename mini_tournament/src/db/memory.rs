//! In-memory storage backend.
//!
//! Implements both repository traits over a single mutex-guarded state, so
//! the capacity check and the insert of a registration happen under one lock.
//! Unique names, unique `(email, tournament_id)` pairs, and cascading deletes
//! behave as they do in PostgreSQL. Used for local runs without a database and
//! as the test double for services and HTTP handlers.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::repository::{PlayerRepository, TournamentRepository};
use crate::player::{Player, PlayerError, PlayerId, PlayerInput, PlayerResult};
use crate::tournament::{
    Tournament, TournamentError, TournamentId, TournamentInput, TournamentResult,
};

#[derive(Debug, Default)]
struct MemoryState {
    tournaments: BTreeMap<TournamentId, Tournament>,
    players: BTreeMap<PlayerId, Player>,
    last_tournament_id: TournamentId,
    last_player_id: PlayerId,
}

impl MemoryState {
    fn registered_count(&self, tournament_id: TournamentId) -> i64 {
        self.players
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .count() as i64
    }

    /// Tournament with a freshly computed registration count
    fn tournament_view(&self, tournament: &Tournament) -> Tournament {
        Tournament {
            registered_players: self.registered_count(tournament.id),
            ..tournament.clone()
        }
    }

    fn name_taken(&self, name: &str, except: Option<TournamentId>) -> bool {
        self.tournaments
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }

    fn email_taken(&self, input: &PlayerInput, except: Option<PlayerId>) -> bool {
        self.players.values().any(|p| {
            p.tournament_id == input.tournament_id && p.email == input.email && Some(p.id) != except
        })
    }

    fn check_open_slot(&self, tournament_id: TournamentId) -> PlayerResult<()> {
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(PlayerError::TournamentNotFound(tournament_id))?;

        if self.registered_count(tournament_id) >= i64::from(tournament.max_players) {
            return Err(PlayerError::CapacityExceeded(tournament_id));
        }
        Ok(())
    }
}

/// Mutex-guarded in-memory store implementing both repositories
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TournamentRepository for MemoryStore {
    async fn create_tournament(&self, input: &TournamentInput) -> TournamentResult<Tournament> {
        let mut state = self.state.lock();

        if state.name_taken(&input.name, None) {
            return Err(TournamentError::NameExists(input.name.clone()));
        }

        state.last_tournament_id += 1;
        let tournament = Tournament {
            id: state.last_tournament_id,
            name: input.name.clone(),
            max_players: input.max_players,
            start_at: input.start_at,
            created_at: Utc::now(),
            registered_players: 0,
        };
        state.tournaments.insert(tournament.id, tournament.clone());

        Ok(tournament)
    }

    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let state = self.state.lock();
        state
            .tournaments
            .get(&tournament_id)
            .map(|t| state.tournament_view(t))
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let state = self.state.lock();
        Ok(state
            .tournaments
            .values()
            .map(|t| state.tournament_view(t))
            .collect())
    }

    async fn update_tournament(
        &self,
        tournament_id: TournamentId,
        input: &TournamentInput,
    ) -> TournamentResult<Tournament> {
        let mut state = self.state.lock();

        if !state.tournaments.contains_key(&tournament_id) {
            return Err(TournamentError::NotFound(tournament_id));
        }
        if state.name_taken(&input.name, Some(tournament_id)) {
            return Err(TournamentError::NameExists(input.name.clone()));
        }

        let updated = match state.tournaments.get_mut(&tournament_id) {
            Some(tournament) => {
                tournament.name = input.name.clone();
                tournament.max_players = input.max_players;
                tournament.start_at = input.start_at;
                tournament.clone()
            }
            None => return Err(TournamentError::NotFound(tournament_id)),
        };

        Ok(state.tournament_view(&updated))
    }

    async fn delete_tournament(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let mut state = self.state.lock();

        if state.tournaments.remove(&tournament_id).is_none() {
            return Err(TournamentError::NotFound(tournament_id));
        }
        state.players.retain(|_, p| p.tournament_id != tournament_id);

        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn create_player(&self, input: &PlayerInput) -> PlayerResult<Player> {
        let mut state = self.state.lock();

        state.check_open_slot(input.tournament_id)?;
        if state.email_taken(input, None) {
            return Err(PlayerError::EmailExists {
                email: input.email.clone(),
                tournament_id: input.tournament_id,
            });
        }

        state.last_player_id += 1;
        let player = Player {
            id: state.last_player_id,
            name: input.name.clone(),
            email: input.email.clone(),
            tournament_id: input.tournament_id,
            registered_at: Utc::now(),
        };
        state.players.insert(player.id, player.clone());

        Ok(player)
    }

    async fn get_player(&self, player_id: PlayerId) -> PlayerResult<Player> {
        self.state
            .lock()
            .players
            .get(&player_id)
            .cloned()
            .ok_or(PlayerError::NotFound(player_id))
    }

    async fn list_players(&self) -> PlayerResult<Vec<Player>> {
        Ok(self.state.lock().players.values().cloned().collect())
    }

    async fn list_players_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<Vec<Player>> {
        Ok(self
            .state
            .lock()
            .players
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    async fn count_players_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<i64> {
        Ok(self.state.lock().registered_count(tournament_id))
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        input: &PlayerInput,
    ) -> PlayerResult<Player> {
        let mut state = self.state.lock();

        let current_tournament = state
            .players
            .get(&player_id)
            .map(|p| p.tournament_id)
            .ok_or(PlayerError::NotFound(player_id))?;

        if current_tournament != input.tournament_id {
            state.check_open_slot(input.tournament_id)?;
        }
        if state.email_taken(input, Some(player_id)) {
            return Err(PlayerError::EmailExists {
                email: input.email.clone(),
                tournament_id: input.tournament_id,
            });
        }

        let player = state
            .players
            .get_mut(&player_id)
            .ok_or(PlayerError::NotFound(player_id))?;
        player.name = input.name.clone();
        player.email = input.email.clone();
        player.tournament_id = input.tournament_id;

        Ok(player.clone())
    }

    async fn delete_player(&self, player_id: PlayerId) -> PlayerResult<()> {
        self.state
            .lock()
            .players
            .remove(&player_id)
            .map(|_| ())
            .ok_or(PlayerError::NotFound(player_id))
    }
}
