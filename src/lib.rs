//! GameVault Server Library
//!
//! Game catalog backend: accounts, listings, reviews and per-user libraries.
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod security;
pub mod uploads;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};
pub use routes::router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}
