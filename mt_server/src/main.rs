//! Tournament registration server.
//!
//! Serves the REST API from `mt_server::api` on top of PostgreSQL or an
//! in-memory store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use mini_tournament::db::{Database, MemoryStore};
use mt_server::{
    api,
    config::{ServerConfig, StorageBackend},
    logging, metrics,
};
use pico_args::Arguments;
use tracing::info;

const HELP: &str = "\
Run the tournament registration server

USAGE:
  mt_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --storage    BACKEND     postgres or memory          [default: env STORAGE_BACKEND or postgres]

FLAGS:
  --memory                 Shorthand for --storage memory
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8000)
  STORAGE_BACKEND          postgres | memory
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Pool size upper bound
  RUN_MIGRATIONS           Apply pending migrations at startup (default true)
  METRICS_BIND             Prometheus exporter address (disabled when unset)
  RUST_LOG                 Log filter (default info,sqlx=warn,hyper=warn)
";

struct Args {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
    storage: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let memory = pargs.contains("--memory");
    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        storage: if memory {
            Some(StorageBackend::Memory)
        } else {
            pargs.opt_value_from_str("--storage")?
        },
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.database_url, args.storage)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(Error::msg)?;
        info!("Prometheus metrics exported on http://{}/metrics", addr);
    }

    let (state, db) = match config.storage {
        StorageBackend::Postgres => {
            info!("Connecting to database");
            let db = Database::new(&config.database)
                .await
                .context("Failed to connect to database")?;

            if config.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
            }

            info!("Database connected successfully");
            (api::AppState::postgres(Arc::new(db.pool().clone())), Some(db))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            (api::AppState::in_memory(MemoryStore::new()), None)
        }
    };

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{} ({} storage). Press Ctrl+C to stop.",
        config.bind, config.storage
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    if let Some(db) = db {
        db.close().await;
    }

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
