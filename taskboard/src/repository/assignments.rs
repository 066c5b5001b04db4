//! User-to-task assignment links.

use tracing::instrument;

use crate::domain::{Assignment, AssignmentInput, Entity, TaskSummary, UserSummary};
use crate::store::{Store, StoreError, StoreResult};

/// Reads and writes [`Assignment`] rows.
///
/// The (task, user) pair is the key, so this repository does not implement
/// [`EntityRepository`](super::EntityRepository).
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    store: Store,
}

impl AssignmentRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Assigns a user to a task.
    ///
    /// # Errors
    /// - `Referential` when the task or user does not exist
    /// - `Constraint` when an id is absent or the pair is already assigned
    #[instrument(skip(self))]
    pub async fn assign(&self, input: AssignmentInput) -> StoreResult<Assignment> {
        self.store.require(Entity::Task, input.task_id).await?;
        self.store.require(Entity::User, input.user_id).await?;
        sqlx::query_as(
            "INSERT INTO UserTaskAssignments (taskId, userId) VALUES (?, ?) \
             ON CONFLICT (taskId, userId) DO NOTHING RETURNING taskId, userId",
        )
        .bind(input.task_id)
        .bind(input.user_id)
        .fetch_optional(self.store.pool())
        .await?
        .ok_or_else(|| {
            StoreError::Constraint(format!(
                "User {} is already assigned to task {}",
                input.user_id.unwrap_or_default(),
                input.task_id.unwrap_or_default()
            ))
        })
    }

    /// Users assigned to `task_id`, ascending by username.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_task(&self, task_id: i64) -> StoreResult<Vec<UserSummary>> {
        let users = sqlx::query_as(
            "SELECT u.id, u.username FROM Users u \
             JOIN UserTaskAssignments a ON a.userId = u.id \
             WHERE a.taskId = ? ORDER BY u.username",
        )
        .bind(task_id)
        .fetch_all(self.store.pool())
        .await?;
        Ok(users)
    }

    /// Tasks assigned to `user_id`, ascending by id.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<TaskSummary>> {
        let tasks = sqlx::query_as(
            "SELECT t.id, t.title, t.description FROM Tasks t \
             JOIN UserTaskAssignments a ON a.taskId = t.id \
             WHERE a.userId = ? ORDER BY t.id",
        )
        .bind(user_id)
        .fetch_all(self.store.pool())
        .await?;
        Ok(tasks)
    }

    /// Removes the assignment of a user to a task.
    ///
    /// # Errors
    /// - `InvalidInput` when either id is absent
    /// - `NotFound` when the pair is not assigned
    #[instrument(skip(self))]
    pub async fn unassign(&self, input: AssignmentInput) -> StoreResult<()> {
        let (Some(task_id), Some(user_id)) = (input.task_id, input.user_id) else {
            return Err(StoreError::InvalidInput(
                "taskId and userId are required".into(),
            ));
        };
        let removed = sqlx::query("DELETE FROM UserTaskAssignments WHERE taskId = ? AND userId = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(self.store.pool())
            .await?
            .rows_affected();
        if removed == 0 {
            return Err(StoreError::not_found(
                Entity::Assignment,
                format!("task {task_id}, user {user_id}"),
            ));
        }
        Ok(())
    }
}
