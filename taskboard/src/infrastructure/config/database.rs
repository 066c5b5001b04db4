//! Store connection settings.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Relational store settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// `SQLite` connection URL, e.g. `sqlite://task-manager.sqlite`.
    pub url: SecretString,
    /// Pool size. One connection gives the single logical writer.
    ///
    /// Ignored for in-memory URLs: each pooled connection would open its own
    /// empty database, so those always get one connection.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Drop and recreate every table when the store is opened.
    #[serde(default)]
    pub reset_schema: bool,
}

impl DatabaseSettings {
    /// Settings for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: SecretString::from("sqlite::memory:"),
            max_connections: 1,
            reset_schema: false,
        }
    }

    /// Whether the URL names a database that lives only in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        let url = self.url.expose_secret();
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// Connections the pool may open.
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }
}

pub(super) const fn default_max_connections() -> u32 {
    1
}
