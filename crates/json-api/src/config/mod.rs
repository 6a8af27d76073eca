//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, import::ImportConfig, observability::LoggingConfig,
    security::SecurityConfig, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod import;
pub(crate) mod observability;
pub(crate) mod security;
pub(crate) mod server;

/// Inventory JSON server configuration
#[derive(Debug, Parser)]
#[command(name = "inventory-json", about = "Inventory JSON Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Request forgery protection.
    #[command(flatten)]
    pub security: SecurityConfig,

    /// Spreadsheet import settings.
    #[command(flatten)]
    pub import: ImportConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
