//! Error kinds shared by the tournament and player error types.
//!
//! Each entity has its own error enum, but the transport layer only needs to
//! know which *kind* of failure happened to pick a response status.

use std::fmt;

/// Kind of failure reported by a repository or service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Could not acquire a database connection
    Connection,
    /// Reading records failed
    Fetch,
    /// Requested record does not exist
    NotFound,
    /// Inserting a record failed
    Creation,
    /// Updating a record failed
    Update,
    /// Deleting a record failed
    Deletion,
    /// A uniqueness constraint was violated
    Conflict,
    /// The tournament has no free slots left
    CapacityExceeded,
    /// Input failed validation
    Invalid,
}

impl ErrorKind {
    /// Whether the failure originated in the storage layer rather than in the request.
    pub fn is_storage_failure(self) -> bool {
        matches!(
            self,
            ErrorKind::Connection
                | ErrorKind::Fetch
                | ErrorKind::Creation
                | ErrorKind::Update
                | ErrorKind::Deletion
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Fetch => "fetch",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Creation => "creation",
            ErrorKind::Update => "update",
            ErrorKind::Deletion => "deletion",
            ErrorKind::Conflict => "conflict",
            ErrorKind::CapacityExceeded => "capacity_exceeded",
            ErrorKind::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Returns true if the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if the error is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Returns true if the error means no connection could be obtained.
pub(crate) fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}
