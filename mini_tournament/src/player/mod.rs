//! Player module.
//!
//! Players register to exactly one tournament; an email may appear once per
//! tournament, and a tournament accepts at most `max_players` registrations.

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{PlayerError, PlayerResult};
pub use models::{Player, PlayerId, PlayerInput, PlayerRegistration};
pub use service::PlayerService;
