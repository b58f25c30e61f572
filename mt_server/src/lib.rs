//! HTTP server for tournament management and player registration.
//!
//! Exposes the [`api`] router together with the configuration, logging and
//! metrics setup used by the `mt_server` binary.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
