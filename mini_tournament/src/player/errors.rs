//! Player error types.

use thiserror::Error;

use super::models::PlayerId;
use crate::error::{ErrorKind, is_connection_error};
use crate::tournament::TournamentId;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No database connection could be obtained
    #[error("Failed to connect to database")]
    Connection(#[source] sqlx::Error),

    /// Reading players failed
    #[error("Failed to fetch players")]
    Fetch(#[source] sqlx::Error),

    /// Player not found
    #[error("Player with id {0} not found")]
    NotFound(PlayerId),

    /// Target tournament does not exist
    #[error("Tournament with id {0} not found")]
    TournamentNotFound(TournamentId),

    /// Inserting a player failed
    #[error("Failed to create player")]
    Creation(#[source] sqlx::Error),

    /// Updating a player failed
    #[error("Failed to update player")]
    Update(#[source] sqlx::Error),

    /// Deleting a player failed
    #[error("Failed to delete player")]
    Deletion(#[source] sqlx::Error),

    /// Email already registered in the tournament
    #[error("Player with email '{email}' already exists in tournament {tournament_id}")]
    EmailExists {
        email: String,
        tournament_id: TournamentId,
    },

    /// Tournament has no open slots
    #[error("Tournament {0} has reached its player limit")]
    CapacityExceeded(TournamentId),

    /// Input failed validation
    #[error("Invalid player: {0}")]
    Invalid(String),
}

impl PlayerError {
    /// Kind of failure, used by the transport layer to pick a status code
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlayerError::Connection(_) => ErrorKind::Connection,
            PlayerError::Fetch(_) => ErrorKind::Fetch,
            PlayerError::NotFound(_) | PlayerError::TournamentNotFound(_) => ErrorKind::NotFound,
            PlayerError::Creation(_) => ErrorKind::Creation,
            PlayerError::Update(_) => ErrorKind::Update,
            PlayerError::Deletion(_) => ErrorKind::Deletion,
            PlayerError::EmailExists { .. } => ErrorKind::Conflict,
            PlayerError::CapacityExceeded(_) => ErrorKind::CapacityExceeded,
            PlayerError::Invalid(_) => ErrorKind::Invalid,
        }
    }

    /// Get a client-safe error message
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn storage(err: sqlx::Error, op: fn(sqlx::Error) -> Self) -> Self {
        if is_connection_error(&err) {
            PlayerError::Connection(err)
        } else {
            op(err)
        }
    }
}

/// Result type for player operations
pub type PlayerResult<T> = Result<T, PlayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_exists_message() {
        let err = PlayerError::EmailExists {
            email: "test@example.com".to_string(),
            tournament_id: 1,
        };
        assert_eq!(
            err.to_string(),
            "Player with email 'test@example.com' already exists in tournament 1"
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PlayerError::NotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(PlayerError::TournamentNotFound(1).kind(), ErrorKind::NotFound);
        assert_eq!(
            PlayerError::CapacityExceeded(3).kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(
            PlayerError::storage(sqlx::Error::PoolClosed, PlayerError::Creation).kind(),
            ErrorKind::Connection
        );
    }
}
