//! Tasks table access, including assignee aggregation.

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::instrument;

use super::EntityRepository;
use crate::domain::{Entity, Task, TaskInput, TaskView, TaskWithAssigneesRow};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, description, dateCreated, dueDate, priority, status, \
                       timeEstimate, timeSpent, columnId, boardId";

/// Task columns plus the `char(31)`-joined usernames of its assignees.
const WITH_ASSIGNEES: &str = "SELECT t.id, t.title, t.description, t.dateCreated, t.dueDate, \
     t.priority, t.status, t.timeEstimate, t.timeSpent, t.columnId, t.boardId, \
     group_concat(u.username, char(31)) AS assignees \
     FROM Tasks t \
     LEFT JOIN UserTaskAssignments a ON a.taskId = t.id \
     LEFT JOIN Users u ON u.id = a.userId";

/// Reads and writes [`Task`] rows.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    store: Store,
}

impl TaskRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolves the board a task belongs to from its column.
    ///
    /// A supplied board must be the column's board. Without a column the
    /// board is checked on its own and the `NOT NULL` constraint on the
    /// column rejects the write. Runs on the caller's transaction so the
    /// column cannot move before the task is written.
    async fn resolve_board(
        conn: &mut SqliteConnection,
        input: &TaskInput,
    ) -> StoreResult<Option<i64>> {
        let Some(column_id) = input.column else {
            Store::require_on(conn, Entity::Board, input.board).await?;
            return Ok(input.board);
        };
        let board_id: i64 = sqlx::query_scalar("SELECT boardId FROM Columns WHERE id = ?")
            .bind(column_id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| StoreError::missing_parent(Entity::Column, column_id))?;
        match input.board {
            Some(board) if board != board_id => Err(StoreError::Referential(format!(
                "Column {column_id} does not belong to board {board}"
            ))),
            _ => Ok(Some(board_id)),
        }
    }

    /// Every task with its sorted assignee usernames, ascending by id.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_with_assignees(&self) -> StoreResult<Vec<TaskView>> {
        let sql = format!("{WITH_ASSIGNEES} GROUP BY t.id ORDER BY t.id");
        let rows: Vec<TaskWithAssigneesRow> =
            sqlx::query_as(&sql).fetch_all(self.store.pool()).await?;
        Ok(rows.into_iter().map(TaskView::from).collect())
    }

    /// Tasks placed in any column of `board_id`, with assignees.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_board(&self, board_id: i64) -> StoreResult<Vec<TaskView>> {
        let sql = format!(
            "{WITH_ASSIGNEES} WHERE t.columnId IN (SELECT id FROM Columns WHERE boardId = ?) \
             GROUP BY t.id ORDER BY t.id"
        );
        let rows: Vec<TaskWithAssigneesRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(self.store.pool())
            .await?;
        Ok(rows.into_iter().map(TaskView::from).collect())
    }

    /// One task with its sorted assignee usernames.
    ///
    /// # Errors
    /// Returns `NotFound` when no such task exists.
    #[instrument(skip(self))]
    pub async fn get_with_assignees(&self, id: i64) -> StoreResult<TaskView> {
        let sql = format!("{WITH_ASSIGNEES} WHERE t.id = ? GROUP BY t.id");
        let row: TaskWithAssigneesRow = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Entity::Task, id))?;
        Ok(row.into())
    }
}

#[async_trait]
impl EntityRepository for TaskRepository {
    type Record = Task;
    type Input = TaskInput;

    const ENTITY: Entity = Entity::Task;

    #[instrument(skip(self, input))]
    async fn create(&self, input: TaskInput) -> StoreResult<Task> {
        let mut tx = self.store.begin().await?;
        let board_id = Self::resolve_board(&mut *tx, &input).await?;
        let sql = format!(
            "INSERT INTO Tasks (title, description, dueDate, priority, status, timeEstimate, \
             timeSpent, columnId, boardId) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let task: Task = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.description)
            .bind(input.due_date)
            .bind(input.priority)
            .bind(input.status)
            .bind(input.time_estimate)
            .bind(input.time_spent)
            .bind(input.column)
            .bind(board_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Task>> {
        let sql = format!("SELECT {COLUMNS} FROM Tasks ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<Task> {
        let sql = format!("SELECT {COLUMNS} FROM Tasks WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: TaskInput) -> StoreResult<Task> {
        let mut tx = self.store.begin().await?;
        let board_id = Self::resolve_board(&mut *tx, &input).await?;
        let sql = format!(
            "UPDATE Tasks SET title = ?, description = ?, dueDate = ?, priority = ?, status = ?, \
             timeEstimate = ?, timeSpent = ?, columnId = ?, boardId = ? WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        let task: Task = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.description)
            .bind(input.due_date)
            .bind(input.priority)
            .bind(input.status)
            .bind(input.time_estimate)
            .bind(input.time_spent)
            .bind(input.column)
            .bind(board_id)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))?;
        tx.commit().await?;
        Ok(task)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::Task, id).await
    }
}
