//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use mini_tournament::db::DatabaseConfig;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Default bind address when neither `--bind` nor `SERVER_BIND` is given
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Storage implementation behind the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// PostgreSQL through a sqlx connection pool
    #[default]
    Postgres,
    /// Process-local store, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "mem" | "local" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid {
                var: "STORAGE_BACKEND".to_string(),
                reason: format!("Unknown storage backend '{other}' (expected postgres or memory)"),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => f.write_str("postgres"),
            StorageBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Selected storage backend
    pub storage: StorageBackend,
    /// Database configuration (unused with the memory backend)
    pub database: DatabaseConfig,
    /// Apply pending migrations at startup
    pub run_migrations: bool,
    /// Prometheus exporter address; metrics are disabled when absent
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `storage_override` - Optional storage backend override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a set variable cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
        storage_override: Option<StorageBackend>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            bind_override,
            database_url_override,
            storage_override,
        )
    }

    /// Load configuration from an arbitrary variable source
    fn from_lookup<F>(
        lookup: F,
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
        storage_override: Option<StorageBackend>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Bind address
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_addr(
                "SERVER_BIND",
                &lookup("SERVER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            )?,
        };

        let storage = match storage_override {
            Some(storage) => storage,
            None => lookup("STORAGE_BACKEND")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        };

        // Database configuration
        let database_url = database_url_override
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or_default();

        let database = DatabaseConfig {
            database_url,
            max_connections: parse_var_or(&lookup, "DB_MAX_CONNECTIONS", 20),
            min_connections: parse_var_or(&lookup, "DB_MIN_CONNECTIONS", 1),
            connection_timeout_secs: parse_var_or(&lookup, "DB_CONNECTION_TIMEOUT_SECS", 5),
            idle_timeout_secs: parse_var_or(&lookup, "DB_IDLE_TIMEOUT_SECS", 600),
            max_lifetime_secs: parse_var_or(&lookup, "DB_MAX_LIFETIME_SECS", 1800),
        };

        let run_migrations = parse_var_or(&lookup, "RUN_MIGRATIONS", true);

        let metrics_bind = lookup("METRICS_BIND")
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_addr("METRICS_BIND", &v))
            .transpose()?;

        Ok(ServerConfig {
            bind,
            storage,
            database,
            run_migrations,
            metrics_bind,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage != StorageBackend::Postgres {
            return Ok(());
        }

        if self.database.database_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Set it to a postgres:// URL or run with --memory".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        if self.database.connection_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_CONNECTION_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_addr(var: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        reason: format!("'{value}' is not a valid IP:PORT address"),
    })
}

/// Helper to parse a variable with default fallback
fn parse_var_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
