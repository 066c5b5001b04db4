//! Users table access.

use async_trait::async_trait;
use tracing::instrument;

use super::EntityRepository;
use crate::domain::{Entity, User, UserInput};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, username, dateCreated";

/// Reads and writes [`User`] rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EntityRepository for UserRepository {
    type Record = User;
    type Input = UserInput;

    const ENTITY: Entity = Entity::User;

    #[instrument(skip(self, input))]
    async fn create(&self, input: UserInput) -> StoreResult<User> {
        let sql = format!("INSERT INTO Users (username) VALUES (?) RETURNING {COLUMNS}");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(input.username)
            .fetch_one(self.store.pool())
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {COLUMNS} FROM Users ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<User> {
        let sql = format!("SELECT {COLUMNS} FROM Users WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: UserInput) -> StoreResult<User> {
        let sql = format!("UPDATE Users SET username = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as(&sql)
            .bind(input.username)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::User, id).await
    }
}
