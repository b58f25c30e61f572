//! Tournament service: validation and orchestration on top of the repository.

use log::{info, warn};
use std::sync::Arc;

use super::errors::{TournamentError, TournamentResult};
use super::models::{Tournament, TournamentId, TournamentInput};
use crate::db::TournamentRepository;

/// Tournament service
#[derive(Clone)]
pub struct TournamentService {
    repository: Arc<dyn TournamentRepository>,
}

impl TournamentService {
    pub fn new(repository: Arc<dyn TournamentRepository>) -> Self {
        Self { repository }
    }

    /// Create a new tournament
    ///
    /// # Errors
    ///
    /// * `TournamentError::Invalid` - Blank name or non-positive capacity
    /// * `TournamentError::NameExists` - Another tournament already uses the name
    pub async fn create(&self, input: TournamentInput) -> TournamentResult<Tournament> {
        input.validate()?;

        let tournament = self
            .repository
            .create_tournament(&input)
            .await
            .inspect_err(|e| log_failure("create", None, e))?;

        info!(
            "Created tournament {} '{}' ({} players max)",
            tournament.id, tournament.name, tournament.max_players
        );
        Ok(tournament)
    }

    /// Fetch a tournament by ID
    pub async fn get(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        self.repository
            .get_tournament(tournament_id)
            .await
            .inspect_err(|e| log_failure("get", Some(tournament_id), e))
    }

    /// List all tournaments
    pub async fn list(&self) -> TournamentResult<Vec<Tournament>> {
        self.repository
            .list_tournaments()
            .await
            .inspect_err(|e| log_failure("list", None, e))
    }

    /// Replace name, capacity and start time of a tournament
    ///
    /// Lowering `max_players` below the current registration count is allowed;
    /// it only blocks further registrations.
    pub async fn update(
        &self,
        tournament_id: TournamentId,
        input: TournamentInput,
    ) -> TournamentResult<Tournament> {
        input.validate()?;

        let tournament = self
            .repository
            .update_tournament(tournament_id, &input)
            .await
            .inspect_err(|e| log_failure("update", Some(tournament_id), e))?;

        if tournament.registered_players > i64::from(tournament.max_players) {
            warn!(
                "Tournament {} now holds {} players over a limit of {}",
                tournament.id, tournament.registered_players, tournament.max_players
            );
        }
        info!("Updated tournament {}", tournament.id);
        Ok(tournament)
    }

    /// Delete a tournament together with its players
    pub async fn delete(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        self.repository
            .delete_tournament(tournament_id)
            .await
            .inspect_err(|e| log_failure("delete", Some(tournament_id), e))?;

        info!("Deleted tournament {}", tournament_id);
        Ok(())
    }
}

fn log_failure(operation: &str, tournament_id: Option<TournamentId>, err: &TournamentError) {
    if err.kind().is_storage_failure() {
        log::error!(
            "Tournament {} failed (id {:?}): {} ({:?})",
            operation,
            tournament_id,
            err,
            std::error::Error::source(err)
        );
    } else {
        log::debug!("Tournament {} rejected (id {:?}): {}", operation, tournament_id, err);
    }
}
