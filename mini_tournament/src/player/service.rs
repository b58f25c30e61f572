//! Player service: registration and player management.

use log::{debug, info};
use std::sync::Arc;

use super::errors::{PlayerError, PlayerResult};
use super::models::{Player, PlayerId, PlayerInput, PlayerRegistration};
use crate::db::PlayerRepository;
use crate::tournament::TournamentId;

/// Player service
#[derive(Clone)]
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository>) -> Self {
        Self { repository }
    }

    /// Register a player for a tournament
    ///
    /// The repository enforces capacity atomically: the tournament's
    /// registration count is compared with `max_players` and the player is
    /// inserted in the same critical section.
    ///
    /// # Errors
    ///
    /// * `PlayerError::Invalid` - Blank name or email
    /// * `PlayerError::TournamentNotFound` - Tournament does not exist
    /// * `PlayerError::CapacityExceeded` - Tournament is full
    /// * `PlayerError::EmailExists` - Email already registered in this tournament
    pub async fn register(
        &self,
        tournament_id: TournamentId,
        registration: PlayerRegistration,
    ) -> PlayerResult<Player> {
        self.create(registration.into_input(tournament_id)).await
    }

    /// Create a player from a full input record
    pub async fn create(&self, input: PlayerInput) -> PlayerResult<Player> {
        input.validate()?;

        let player = self
            .repository
            .create_player(&input)
            .await
            .inspect_err(|e| log_failure("registration", input.tournament_id, e))?;

        info!(
            "Registered player {} in tournament {}",
            player.id, player.tournament_id
        );
        Ok(player)
    }

    /// Fetch a player by ID
    pub async fn get(&self, player_id: PlayerId) -> PlayerResult<Player> {
        self.repository
            .get_player(player_id)
            .await
            .inspect_err(|e| log_failure("get", player_id, e))
    }

    /// List all players
    pub async fn list(&self) -> PlayerResult<Vec<Player>> {
        self.repository
            .list_players()
            .await
            .inspect_err(|e| log_failure("list", 0, e))
    }

    /// List players registered in a tournament
    pub async fn list_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<Vec<Player>> {
        self.repository
            .list_players_by_tournament(tournament_id)
            .await
            .inspect_err(|e| log_failure("list by tournament", tournament_id, e))
    }

    /// Number of players registered in a tournament
    pub async fn count_by_tournament(&self, tournament_id: TournamentId) -> PlayerResult<i64> {
        self.repository
            .count_players_by_tournament(tournament_id)
            .await
            .inspect_err(|e| log_failure("count", tournament_id, e))
    }

    /// Replace name, email and tournament of a player
    pub async fn update(&self, player_id: PlayerId, input: PlayerInput) -> PlayerResult<Player> {
        input.validate()?;

        let player = self
            .repository
            .update_player(player_id, &input)
            .await
            .inspect_err(|e| log_failure("update", player_id, e))?;

        info!("Updated player {}", player.id);
        Ok(player)
    }

    /// Delete a player
    pub async fn delete(&self, player_id: PlayerId) -> PlayerResult<()> {
        self.repository
            .delete_player(player_id)
            .await
            .inspect_err(|e| log_failure("delete", player_id, e))?;

        info!("Deleted player {}", player_id);
        Ok(())
    }
}

fn log_failure(operation: &str, id: i64, err: &PlayerError) {
    if err.kind().is_storage_failure() {
        log::error!(
            "Player {} failed ({}): {} ({:?})",
            operation,
            id,
            err,
            std::error::Error::source(err)
        );
    } else {
        debug!("Player {} rejected ({}): {}", operation, id, err);
    }
}
