//! # Mini Tournament
//!
//! Tournament and player registration with capacity-limited enrollment.
//!
//! A tournament has a unique name, a start time and a `max_players` limit.
//! Players register into exactly one tournament; an email may appear at most
//! once per tournament, and a registration is rejected once the tournament
//! holds `max_players` players.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Tournament models, errors and service
//! - [`player`]: Player models, errors and registration service
//! - [`db`]: Repository traits with PostgreSQL and in-memory backends
//! - [`error`]: Error classification shared by both entities
//! - [`time`]: UTC timestamp formatting (`Z` suffix)
//!
//! ## Example
//!
//! ```
//! use mini_tournament::db::MemoryStore;
//! use mini_tournament::{PlayerRegistration, PlayerService, TournamentInput, TournamentService};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = Arc::new(MemoryStore::new());
//! let tournaments = TournamentService::new(store.clone());
//! let players = PlayerService::new(store);
//!
//! let tournament = tournaments
//!     .create(TournamentInput::new("Friday Open", 1, chrono::Utc::now()))
//!     .await
//!     .unwrap();
//!
//! let registration = PlayerRegistration {
//!     name: "Alice".to_string(),
//!     email: "alice@example.com".to_string(),
//! };
//! players.register(tournament.id, registration).await.unwrap();
//! # }
//! ```

/// Storage backends and repository traits.
pub mod db;

/// Error classification shared across entities.
pub mod error;
pub use error::ErrorKind;

/// Player registration.
pub mod player;
pub use player::{Player, PlayerError, PlayerId, PlayerInput, PlayerRegistration, PlayerService};

pub mod time;

/// Tournament management.
pub mod tournament;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentInput, TournamentService};
