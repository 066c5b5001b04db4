//! Configuration management for the task board service.
//!
//! Values come from built-in defaults, overridden by environment variables
//! prefixed with `TASKBOARD` and nested with `__`, for example
//! `TASKBOARD__SERVER__PORT=8080` or `TASKBOARD__DATABASE__RESET_SCHEMA=true`.
//!
//! # Example
//!
//! ```
//! use taskboard::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! assert!(settings.server.port > 0);
//! ```

pub mod database;
pub mod server;
pub mod telemetry;

pub use database::DatabaseSettings;
pub use server::ServerSettings;
pub use telemetry::TelemetrySettings;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Server settings.
    pub server: ServerSettings,
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
    /// Database settings.
    pub database: DatabaseSettings,
}

impl Settings {
    /// Creates a new settings instance from environment variables and defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("TASKBOARD").separator("__"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("telemetry.service_name", "taskboard")?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.json", true)?
            .set_default("telemetry.sampling_ratio", telemetry::default_sampling())?
            .set_default("database.url", "sqlite://task-manager.sqlite")?
            .set_default(
                "database.max_connections",
                i64::from(database::default_max_connections()),
            )?
            .set_default("database.reset_schema", false)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

/// Helper for strong typing addresses
pub struct BindAddress(pub String, pub u16);

impl BindAddress {
    /// Converts the bind address to a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP address string cannot be parsed.
    pub fn to_socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let ip = self
            .0
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IP address '{}': {e}", self.0))?;
        Ok(std::net::SocketAddr::new(ip, self.1))
    }
}

impl From<&ServerSettings> for BindAddress {
    fn from(server: &ServerSettings) -> Self {
        Self(server.host.clone(), server.port)
    }
}
