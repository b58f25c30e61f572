//! Player data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{PlayerError, PlayerResult};
use crate::time::utc_z;
use crate::tournament::TournamentId;

/// Player ID type
pub type PlayerId = i64;

/// A player registered to exactly one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Unique within the owning tournament
    pub email: String,
    pub tournament_id: TournamentId,
    #[serde(with = "utc_z")]
    pub registered_at: DateTime<Utc>,
}

/// Writable player fields, used for both create and full update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    pub email: String,
    pub tournament_id: TournamentId,
}

impl PlayerInput {
    /// Reject blank names and emails
    pub fn validate(&self) -> PlayerResult<()> {
        if self.name.trim().is_empty() {
            return Err(PlayerError::Invalid("name must not be empty".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(PlayerError::Invalid("email must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Registration request body; the tournament comes from the request path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistration {
    pub name: String,
    pub email: String,
}

impl PlayerRegistration {
    /// Attach the target tournament
    pub fn into_input(self, tournament_id: TournamentId) -> PlayerInput {
        PlayerInput {
            name: self.name,
            email: self.email,
            tournament_id,
        }
    }
}
