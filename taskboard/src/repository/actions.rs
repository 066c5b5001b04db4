//! Task action audit trail.

use async_trait::async_trait;
use tracing::instrument;

use super::EntityRepository;
use crate::domain::{Entity, TaskAction, TaskActionInput};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, taskId, userId, action, date";

/// Reads and writes [`TaskAction`] rows.
#[derive(Debug, Clone)]
pub struct TaskActionRepository {
    store: Store,
}

impl TaskActionRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Actions recorded against `task_id`, oldest first.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_task(&self, task_id: i64) -> StoreResult<Vec<TaskAction>> {
        let sql = format!("SELECT {COLUMNS} FROM TaskActions WHERE taskId = ? ORDER BY date, id");
        Ok(sqlx::query_as(&sql)
            .bind(task_id)
            .fetch_all(self.store.pool())
            .await?)
    }

    async fn require_parents(&self, input: &TaskActionInput) -> StoreResult<()> {
        self.store.require(Entity::Task, input.task_id).await?;
        self.store.require(Entity::User, input.user_id).await
    }
}

#[async_trait]
impl EntityRepository for TaskActionRepository {
    type Record = TaskAction;
    type Input = TaskActionInput;

    const ENTITY: Entity = Entity::TaskAction;

    #[instrument(skip(self, input))]
    async fn create(&self, input: TaskActionInput) -> StoreResult<TaskAction> {
        self.require_parents(&input).await?;
        let sql = format!(
            "INSERT INTO TaskActions (taskId, userId, action) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        );
        let action = sqlx::query_as(&sql)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(input.action)
            .fetch_one(self.store.pool())
            .await?;
        Ok(action)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<TaskAction>> {
        let sql = format!("SELECT {COLUMNS} FROM TaskActions ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<TaskAction> {
        let sql = format!("SELECT {COLUMNS} FROM TaskActions WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: TaskActionInput) -> StoreResult<TaskAction> {
        self.require_parents(&input).await?;
        let sql = format!(
            "UPDATE TaskActions SET taskId = ?, userId = ?, action = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(input.action)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::TaskAction, id).await
    }
}
