//! Repository trait definitions for testability and dependency injection.
//!
//! Services only see these traits. [`crate::db::postgres`] provides the
//! PostgreSQL implementations and [`crate::db::memory`] an in-memory store
//! that enforces the same constraints.

use async_trait::async_trait;

use crate::player::{Player, PlayerId, PlayerInput, PlayerResult};
use crate::tournament::{Tournament, TournamentId, TournamentInput, TournamentResult};

/// Trait for tournament repository operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a new tournament
    ///
    /// Fails with `NameExists` when the unique name constraint is violated.
    async fn create_tournament(&self, input: &TournamentInput) -> TournamentResult<Tournament>;

    /// Find tournament by ID
    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament>;

    /// List all tournaments ordered by ID
    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>>;

    /// Replace all writable fields of a tournament
    async fn update_tournament(
        &self,
        tournament_id: TournamentId,
        input: &TournamentInput,
    ) -> TournamentResult<Tournament>;

    /// Delete a tournament and, by cascade, its players
    async fn delete_tournament(&self, tournament_id: TournamentId) -> TournamentResult<()>;
}

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Register a player if the target tournament still has room
    ///
    /// The capacity check and the insert happen atomically with respect to
    /// other registrations for the same tournament.
    ///
    /// # Errors
    ///
    /// * `PlayerError::TournamentNotFound` - Target tournament does not exist
    /// * `PlayerError::CapacityExceeded` - Tournament already holds `max_players` players
    /// * `PlayerError::EmailExists` - Email already registered in the tournament
    async fn create_player(&self, input: &PlayerInput) -> PlayerResult<Player>;

    /// Find player by ID
    async fn get_player(&self, player_id: PlayerId) -> PlayerResult<Player>;

    /// List all players ordered by ID
    async fn list_players(&self) -> PlayerResult<Vec<Player>>;

    /// List the players of one tournament; unknown tournaments yield an empty list
    async fn list_players_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<Vec<Player>>;

    /// Count the players of one tournament
    async fn count_players_by_tournament(&self, tournament_id: TournamentId)
    -> PlayerResult<i64>;

    /// Replace all writable fields of a player
    ///
    /// Moving a player into another tournament is subject to that
    /// tournament's capacity.
    async fn update_player(&self, player_id: PlayerId, input: &PlayerInput)
    -> PlayerResult<Player>;

    /// Delete a player
    async fn delete_player(&self, player_id: PlayerId) -> PlayerResult<()>;
}
