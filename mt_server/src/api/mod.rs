//! HTTP API for tournament management and player registration.
//!
//! # Modules
//!
//! - [`tournaments`]: Tournament CRUD, per-tournament player listing and registration
//! - [`players`]: Player listing, lookup, update and removal
//! - [`error`]: Error kind to status code mapping
//! - [`request_id`]: Request correlation and per-request metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! POST   /tournaments                  - Create tournament
//! GET    /tournaments                  - List tournaments
//! GET    /tournaments/{id}             - Get tournament
//! PUT    /tournaments/{id}             - Replace tournament fields
//! DELETE /tournaments/{id}             - Delete tournament and its players
//! GET    /tournaments/{id}/players     - List players of a tournament
//! POST   /tournaments/{id}/register    - Register a player, returns the tournament
//! GET    /players                      - List players
//! GET    /players/{id}                 - Get player
//! PUT    /players/{id}                 - Replace player fields
//! DELETE /players/{id}                 - Delete player
//! GET    /health                       - Health check
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use mini_tournament::db::MemoryStore;
//! use mt_server::api::{AppState, create_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_router(AppState::in_memory(MemoryStore::new()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod players;
pub mod request_id;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use mini_tournament::{
    PlayerService, TournamentService,
    db::{MemoryStore, PgPlayerRepository, PgTournamentRepository},
    time::format_utc,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub tournaments: Arc<TournamentService>,
    pub players: Arc<PlayerService>,
    /// Present with the PostgreSQL backend, used by the health check
    pub pool: Option<Arc<PgPool>>,
}

impl AppState {
    pub fn new(
        tournaments: TournamentService,
        players: PlayerService,
        pool: Option<Arc<PgPool>>,
    ) -> Self {
        Self {
            tournaments: Arc::new(tournaments),
            players: Arc::new(players),
            pool,
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self::new(
            TournamentService::new(Arc::new(PgTournamentRepository::new(pool.clone()))),
            PlayerService::new(Arc::new(PgPlayerRepository::new(pool.clone()))),
            Some(pool),
        )
    }

    /// State backed by a process-local store
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(
            TournamentService::new(Arc::new(store.clone())),
            PlayerService::new(Arc::new(store)),
            None,
        )
    }
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route(
            "/tournaments/{tournament_id}",
            get(tournaments::get_tournament)
                .put(tournaments::update_tournament)
                .delete(tournaments::delete_tournament),
        )
        .route(
            "/tournaments/{tournament_id}/players",
            get(tournaments::list_tournament_players),
        )
        .route(
            "/tournaments/{tournament_id}/register",
            post(tournaments::register_player),
        )
        .route("/players", get(players::list_players))
        .route(
            "/players/{player_id}",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the storage backend is reachable, `503 Service
/// Unavailable` otherwise. The in-memory backend is always healthy.
///
/// ```bash
/// curl http://localhost:8000/health
/// # {"status":"healthy","storage":"postgres","database":true,"timestamp":"2025-05-10T14:30:54.852821Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (storage, db_healthy) = match &state.pool {
        Some(pool) => {
            let healthy = sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await.is_ok();
            ("postgres", Some(healthy))
        }
        None => ("memory", None),
    };

    let healthy = db_healthy.unwrap_or(true);
    let status_code = if healthy {
        StatusCode::OK
    } else {
        tracing::warn!("Health check failed: database unreachable");
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "storage": storage,
        "database": db_healthy,
        "timestamp": format_utc(&chrono::Utc::now()),
    });

    (status_code, Json(response))
}
