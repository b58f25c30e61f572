//! Player API handlers.
//!
//! Registration goes through `POST /tournaments/{id}/register`; these
//! endpoints read, replace and remove existing players.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mini_tournament::{Player, PlayerId, PlayerInput};

use super::AppState;
use super::error::{ApiError, player_error};

/// List all players ordered by id.
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    state.players.list().await.map(Json).map_err(player_error)
}

/// Get a player.
///
/// # Errors
///
/// - `404 Not Found`: Player doesn't exist
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<Player>, ApiError> {
    state
        .players
        .get(player_id)
        .await
        .map(Json)
        .map_err(player_error)
}

/// Replace name, email and tournament of a player.
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "email": "alice@example.com", "tournament_id": 2 }
/// ```
///
/// Moving the player to another tournament is subject to that tournament's
/// capacity.
///
/// # Errors
///
/// - `404 Not Found`: Player or target tournament doesn't exist
/// - `409 Conflict`: Target tournament is full, or the email is taken there
/// - `422 Unprocessable Entity`: Blank name or email
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
    Json(input): Json<PlayerInput>,
) -> Result<Json<Player>, ApiError> {
    state
        .players
        .update(player_id, input)
        .await
        .map(Json)
        .map_err(player_error)
}

/// Remove a player from its tournament.
///
/// Returns `204 No Content` on success.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Result<StatusCode, ApiError> {
    state
        .players
        .delete(player_id)
        .await
        .map_err(player_error)?;

    tracing::info!(player_id, "Player deleted");
    Ok(StatusCode::NO_CONTENT)
}
