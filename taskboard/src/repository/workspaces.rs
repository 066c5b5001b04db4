//! Workspaces table access.

use async_trait::async_trait;
use tracing::instrument;

use super::EntityRepository;
use crate::domain::{Entity, Workspace, WorkspaceInput};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, dateCreated, owner";

/// Reads and writes [`Workspace`] rows.
#[derive(Debug, Clone)]
pub struct WorkspaceRepository {
    store: Store,
}

impl WorkspaceRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EntityRepository for WorkspaceRepository {
    type Record = Workspace;
    type Input = WorkspaceInput;

    const ENTITY: Entity = Entity::Workspace;

    #[instrument(skip(self, input))]
    async fn create(&self, input: WorkspaceInput) -> StoreResult<Workspace> {
        self.store.require(Entity::User, input.owner).await?;
        let sql = format!("INSERT INTO Workspaces (title, owner) VALUES (?, ?) RETURNING {COLUMNS}");
        let workspace = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.owner)
            .fetch_one(self.store.pool())
            .await?;
        Ok(workspace)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Workspace>> {
        let sql = format!("SELECT {COLUMNS} FROM Workspaces ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<Workspace> {
        let sql = format!("SELECT {COLUMNS} FROM Workspaces WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: WorkspaceInput) -> StoreResult<Workspace> {
        self.store.require(Entity::User, input.owner).await?;
        let sql =
            format!("UPDATE Workspaces SET title = ?, owner = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.owner)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::Workspace, id).await
    }
}
