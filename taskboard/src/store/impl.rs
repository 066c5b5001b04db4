//! Store handle over the `SQLite` connection pool.
//!
//! The handle is constructed explicitly by the composition root and passed to
//! every repository and to the assembler. Opening it establishes the schema;
//! closing it is the caller's job at shutdown.

use secrecy::ExposeSecret;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions},
    Sqlite, Transaction,
};
use std::str::FromStr;
use tracing::{info, instrument, warn};

use super::error::{StoreError, StoreResult};
use super::schema;
use crate::domain::Entity;
use crate::infrastructure::audit::{self, AuditEvent};
use crate::infrastructure::config::DatabaseSettings;

/// Shared access to the relational store.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the store described by `settings` and establishes the schema.
    ///
    /// When `settings.reset_schema` is set, all tables are dropped and
    /// recreated; otherwise missing tables are created and existing data is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the URL is invalid, the database
    /// cannot be opened, or schema setup fails.
    pub async fn connect(settings: &DatabaseSettings) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(settings.url.expose_secret())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_size = settings.pool_size();
        if pool_size < settings.max_connections {
            warn!(
                requested = settings.max_connections,
                pool_size, "In-memory database limited to one connection"
            );
        }

        // An in-memory database lives as long as its connection, so the pool
        // must never retire the last one.
        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        if settings.reset_schema {
            schema::reset(&store.pool).await?;
            audit::log_audit(&AuditEvent::SchemaReset);
        } else {
            schema::ensure(&store.pool).await?;
        }

        info!(pool_size, "Store opened");
        Ok(store)
    }

    /// Opens a private in-memory store with the schema in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if `SQLite` cannot be initialised.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect(&DatabaseSettings::in_memory()).await
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Starts a transaction. Dropping it without commit rolls back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if no connection is available.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Checks whether a row with `id` exists in the table of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the query fails.
    #[instrument(skip(self))]
    pub async fn exists(&self, entity: Entity, id: i64) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Self::exists_on(&mut conn, entity, id).await
    }

    /// [`Store::exists`] on an open connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the query fails.
    pub async fn exists_on(
        conn: &mut SqliteConnection,
        entity: Entity,
        id: i64,
    ) -> StoreResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", entity.table());
        let found: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(conn).await?;
        Ok(found != 0)
    }

    /// Fails with [`StoreError::Referential`] unless `id` exists in `entity`.
    ///
    /// An absent id is left for the `NOT NULL` constraint to reject.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Referential`] for a missing parent row or
    /// [`StoreError::Storage`] if the lookup fails.
    pub async fn require(&self, entity: Entity, id: Option<i64>) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::require_on(&mut conn, entity, id).await
    }

    /// [`Store::require`] on an open connection or transaction.
    ///
    /// # Errors
    ///
    /// Same as [`Store::require`].
    pub async fn require_on(
        conn: &mut SqliteConnection,
        entity: Entity,
        id: Option<i64>,
    ) -> StoreResult<()> {
        match id {
            Some(id) if !Self::exists_on(conn, entity, id).await? => {
                Err(StoreError::missing_parent(entity, id))
            }
            _ => Ok(()),
        }
    }

    /// Runs a trivial query to confirm the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the store does not answer.
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes every connection. Further calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Store closed");
    }
}
