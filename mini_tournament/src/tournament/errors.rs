//! Tournament error types.

use thiserror::Error;

use super::models::TournamentId;
use crate::error::{ErrorKind, is_connection_error};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// No database connection could be obtained
    #[error("Failed to connect to database")]
    Connection(#[source] sqlx::Error),

    /// Reading tournaments failed
    #[error("Failed to fetch tournaments")]
    Fetch(#[source] sqlx::Error),

    /// Tournament not found
    #[error("Tournament with id {0} not found")]
    NotFound(TournamentId),

    /// Inserting a tournament failed
    #[error("Failed to create tournament")]
    Creation(#[source] sqlx::Error),

    /// Updating a tournament failed
    #[error("Failed to update tournament")]
    Update(#[source] sqlx::Error),

    /// Deleting a tournament failed
    #[error("Failed to delete tournament")]
    Deletion(#[source] sqlx::Error),

    /// Name already taken by another tournament
    #[error("Tournament with name '{0}' already exists")]
    NameExists(String),

    /// Input failed validation
    #[error("Invalid tournament: {0}")]
    Invalid(String),
}

impl TournamentError {
    /// Kind of failure, used by the transport layer to pick a status code
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::Connection(_) => ErrorKind::Connection,
            TournamentError::Fetch(_) => ErrorKind::Fetch,
            TournamentError::NotFound(_) => ErrorKind::NotFound,
            TournamentError::Creation(_) => ErrorKind::Creation,
            TournamentError::Update(_) => ErrorKind::Update,
            TournamentError::Deletion(_) => ErrorKind::Deletion,
            TournamentError::NameExists(_) => ErrorKind::Conflict,
            TournamentError::Invalid(_) => ErrorKind::Invalid,
        }
    }

    /// Get a client-safe error message
    ///
    /// The display text of storage variants never includes the underlying
    /// SQL error, so it is safe to return as is.
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Wrap a storage error, preferring `Connection` when no connection could be acquired
    pub(crate) fn storage(err: sqlx::Error, op: fn(sqlx::Error) -> Self) -> Self {
        if is_connection_error(&err) {
            TournamentError::Connection(err)
        } else {
            op(err)
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TournamentError::NotFound(999).to_string(),
            "Tournament with id 999 not found"
        );
        assert_eq!(
            TournamentError::NameExists("Test Tournament".to_string()).to_string(),
            "Tournament with name 'Test Tournament' already exists"
        );
    }

    #[test]
    fn test_storage_message_hides_sql_details() {
        let err = TournamentError::Creation(sqlx::Error::Protocol("secret detail".into()));
        assert_eq!(err.client_message(), "Failed to create tournament");
        assert_eq!(err.kind(), ErrorKind::Creation);
    }

    #[test]
    fn test_storage_prefers_connection() {
        let err = TournamentError::storage(sqlx::Error::PoolTimedOut, TournamentError::Fetch);
        assert!(matches!(err, TournamentError::Connection(_)));

        let err = TournamentError::storage(sqlx::Error::RowNotFound, TournamentError::Fetch);
        assert!(matches!(err, TournamentError::Fetch(_)));
    }
}
