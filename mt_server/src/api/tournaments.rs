//! Tournament API handlers.
//!
//! This module provides HTTP REST endpoints for:
//! - Creating, reading, replacing and deleting tournaments
//! - Listing the players registered in a tournament
//! - Registering a player into a tournament
//!
//! # Examples
//!
//! Create a tournament:
//! ```bash
//! curl -X POST http://localhost:8000/tournaments \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Friday Open", "max_players": 16, "start_at": "2025-05-10T18:00:00Z"}'
//! ```
//!
//! Register a player:
//! ```bash
//! curl -X POST http://localhost:8000/tournaments/1/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Alice", "email": "alice@example.com"}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mini_tournament::{Player, PlayerRegistration, Tournament, TournamentId, TournamentInput};

use super::AppState;
use super::error::{ApiError, player_error, tournament_error};
use crate::metrics;

/// Create a tournament.
///
/// # Response
///
/// Returns `201 Created` with the stored tournament:
/// ```json
/// {
///   "id": 1,
///   "name": "Friday Open",
///   "max_players": 16,
///   "start_at": "2025-05-10T18:00:00.000000Z",
///   "created_at": "2025-05-01T09:12:44.123456Z",
///   "registered_players": 0
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Name already used by another tournament
/// - `422 Unprocessable Entity`: Blank name or non-positive `max_players`
/// - `500 Internal Server Error`: Storage failure
pub async fn create_tournament(
    State(state): State<AppState>,
    Json(input): Json<TournamentInput>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    let tournament = state
        .tournaments
        .create(input)
        .await
        .map_err(tournament_error)?;

    tracing::info!(tournament_id = tournament.id, "Tournament created");
    Ok((StatusCode::CREATED, Json(tournament)))
}

/// Get a tournament with its current registration count.
///
/// # Errors
///
/// - `404 Not Found`: Tournament doesn't exist
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<Tournament>, ApiError> {
    state
        .tournaments
        .get(tournament_id)
        .await
        .map(Json)
        .map_err(tournament_error)
}

/// List all tournaments ordered by id.
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tournament>>, ApiError> {
    state
        .tournaments
        .list()
        .await
        .map(Json)
        .map_err(tournament_error)
}

/// Replace name, capacity and start time of a tournament.
///
/// # Errors
///
/// - `404 Not Found`: Tournament doesn't exist
/// - `409 Conflict`: Name already used by another tournament
/// - `422 Unprocessable Entity`: Invalid fields
pub async fn update_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    Json(input): Json<TournamentInput>,
) -> Result<Json<Tournament>, ApiError> {
    state
        .tournaments
        .update(tournament_id, input)
        .await
        .map(Json)
        .map_err(tournament_error)
}

/// Delete a tournament together with its players.
///
/// Returns `204 No Content` on success.
pub async fn delete_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<StatusCode, ApiError> {
    state
        .tournaments
        .delete(tournament_id)
        .await
        .map_err(tournament_error)?;

    tracing::info!(tournament_id, "Tournament deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// List the players registered in a tournament.
///
/// An unknown tournament yields an empty list.
pub async fn list_tournament_players(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
) -> Result<Json<Vec<Player>>, ApiError> {
    state
        .players
        .list_by_tournament(tournament_id)
        .await
        .map(Json)
        .map_err(player_error)
}

/// Register a player into a tournament.
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// Returns `201 Created` with the tournament, including the updated
/// `registered_players` count.
///
/// # Errors
///
/// - `404 Not Found`: Tournament doesn't exist
/// - `409 Conflict`: Tournament is full, or the email is already registered in it
/// - `422 Unprocessable Entity`: Blank name or email
pub async fn register_player(
    State(state): State<AppState>,
    Path(tournament_id): Path<TournamentId>,
    Json(registration): Json<PlayerRegistration>,
) -> Result<(StatusCode, Json<Tournament>), ApiError> {
    let player = match state.players.register(tournament_id, registration).await {
        Ok(player) => {
            metrics::registrations_total("accepted");
            player
        }
        Err(e) => {
            metrics::registrations_total(&e.kind().to_string());
            tracing::warn!(tournament_id, error = %e, "Registration rejected");
            return Err(player_error(e));
        }
    };

    tracing::info!(tournament_id, player_id = player.id, "Player registered");

    let tournament = state
        .tournaments
        .get(tournament_id)
        .await
        .map_err(tournament_error)?;

    Ok((StatusCode::CREATED, Json(tournament)))
}
