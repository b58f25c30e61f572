//! Tournament data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};
use crate::time::utc_z;

/// Tournament ID type
pub type TournamentId = i64;

/// A stored tournament together with its current registration count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// Unique across all tournaments
    pub name: String,
    /// Registration capacity
    pub max_players: i32,
    #[serde(with = "utc_z")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "utc_z")]
    pub created_at: DateTime<Utc>,
    /// Number of players currently registered (computed on read)
    pub registered_players: i64,
}

impl Tournament {
    /// Whether the tournament has reached its capacity
    pub fn is_full(&self) -> bool {
        self.registered_players >= i64::from(self.max_players)
    }

    /// Number of registrations still accepted
    pub fn open_slots(&self) -> i64 {
        (i64::from(self.max_players) - self.registered_players).max(0)
    }
}

/// Full set of writable tournament fields, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentInput {
    pub name: String,
    pub max_players: i32,
    #[serde(with = "utc_z")]
    pub start_at: DateTime<Utc>,
}

impl TournamentInput {
    pub fn new(name: impl Into<String>, max_players: i32, start_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            max_players,
            start_at,
        }
    }

    /// Check field constraints that the database would otherwise report late
    ///
    /// # Errors
    ///
    /// * `TournamentError::Invalid` - Blank name or non-positive capacity
    pub fn validate(&self) -> TournamentResult<()> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::Invalid(
                "name must not be empty".to_string(),
            ));
        }

        if self.max_players < 1 {
            return Err(TournamentError::Invalid(format!(
                "max_players must be at least 1, got {}",
                self.max_players
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(max_players: i32, registered_players: i64) -> Tournament {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        Tournament {
            id: 1,
            name: "Spring Open".to_string(),
            max_players,
            start_at: ts,
            created_at: ts,
            registered_players,
        }
    }

    #[test]
    fn test_is_full() {
        assert!(!sample(2, 1).is_full());
        assert!(sample(2, 2).is_full());
        assert_eq!(sample(8, 3).open_slots(), 5);
        assert_eq!(sample(1, 4).open_slots(), 0);
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let input = TournamentInput::new("   ", 8, Utc::now());
        assert!(matches!(input.validate(), Err(TournamentError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_capacity() {
        assert!(TournamentInput::new("Cup", 0, Utc::now()).validate().is_err());
        assert!(TournamentInput::new("Cup", -3, Utc::now()).validate().is_err());
        assert!(TournamentInput::new("Cup", 1, Utc::now()).validate().is_ok());
    }

    #[test]
    fn test_serialize_timestamps_with_z() {
        let json = serde_json::to_value(sample(4, 0)).unwrap();
        assert_eq!(json["start_at"], "2025-06-01T18:00:00.000000Z");
        assert_eq!(json["registered_players"], 0);
    }

    #[test]
    fn test_deserialize_requires_offset() {
        let ok = serde_json::from_str::<TournamentInput>(
            r#"{"name":"Cup","max_players":4,"start_at":"2025-06-01T20:00:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(ok.start_at, Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap());

        let naive = serde_json::from_str::<TournamentInput>(
            r#"{"name":"Cup","max_players":4,"start_at":"2025-06-01T20:00:00"}"#,
        );
        assert!(naive.is_err());
    }
}
