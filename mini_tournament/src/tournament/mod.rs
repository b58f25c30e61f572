//! Tournament module.
//!
//! A tournament has a unique name, a registration capacity and a start time,
//! and owns the players registered to it.
//!
//! ## Example
//!
//! ```no_run
//! use mini_tournament::db::{Database, DatabaseConfig, PgTournamentRepository};
//! use mini_tournament::tournament::{TournamentInput, TournamentService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::development()).await?;
//!     let repository = PgTournamentRepository::new(Arc::new(db.pool().clone()));
//!     let service = TournamentService::new(Arc::new(repository));
//!
//!     let start_at = chrono::Utc::now() + chrono::Duration::days(7);
//!     let tournament = service
//!         .create(TournamentInput::new("Sunday Special", 16, start_at))
//!         .await?;
//!     println!("Created tournament: {}", tournament.id);
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{TournamentError, TournamentResult};
pub use models::{Tournament, TournamentId, TournamentInput};
pub use service::TournamentService;
