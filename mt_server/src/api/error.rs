//! Error responses for the HTTP API.
//!
//! Library errors are classified by [`ErrorKind`]; this module maps each kind
//! to a status code and wraps the client-safe message in `{"error": "..."}`.

use axum::{Json, http::StatusCode};
use mini_tournament::{ErrorKind, PlayerError, TournamentError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Rejection type returned by every handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// HTTP status for a kind of failure
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict | ErrorKind::CapacityExceeded => StatusCode::CONFLICT,
        ErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Connection
        | ErrorKind::Fetch
        | ErrorKind::Creation
        | ErrorKind::Update
        | ErrorKind::Deletion => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(kind: ErrorKind, error: String) -> ApiError {
    (status_for(kind), Json(ErrorResponse { error }))
}

pub fn tournament_error(err: TournamentError) -> ApiError {
    error_response(err.kind(), err.client_message())
}

pub fn player_error(err: PlayerError) -> ApiError {
    error_response(err.kind(), err.client_message())
}
