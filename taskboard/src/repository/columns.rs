//! Columns table access and the batch reorder operator.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::EntityRepository;
use crate::domain::{Column, ColumnInput, ColumnRename, ColumnUpdate, Entity};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, boardId, position";

/// Reads and writes [`Column`] rows.
#[derive(Debug, Clone)]
pub struct ColumnRepository {
    store: Store,
}

impl ColumnRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Columns of `board_id` in display order (position, then id).
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_board(&self, board_id: i64) -> StoreResult<Vec<Column>> {
        let sql =
            format!("SELECT {COLUMNS} FROM Columns WHERE boardId = ? ORDER BY position, id");
        Ok(sqlx::query_as(&sql)
            .bind(board_id)
            .fetch_all(self.store.pool())
            .await?)
    }

    /// Changes the title of a column, provided it belongs to `board_id`.
    ///
    /// # Errors
    /// `NotFound` when the column does not exist on that board; constraint
    /// error when the title is absent.
    #[instrument(skip(self, rename))]
    pub async fn rename(
        &self,
        board_id: i64,
        column_id: i64,
        rename: ColumnRename,
    ) -> StoreResult<Column> {
        let sql = format!(
            "UPDATE Columns SET title = ? WHERE id = ? AND boardId = ? RETURNING {COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(rename.title)
            .bind(column_id)
            .bind(board_id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Entity::Column, column_id))
    }

    /// Deletes a column and its tasks, provided it belongs to `board_id`.
    ///
    /// The ownership check and the cascade share one transaction.
    ///
    /// # Errors
    /// `NotFound` when the column does not exist on that board.
    #[instrument(skip(self))]
    pub async fn delete_in_board(&self, board_id: i64, column_id: i64) -> StoreResult<u64> {
        let mut tx = self.store.begin().await?;
        let owned: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Columns WHERE id = ? AND boardId = ?)")
                .bind(column_id)
                .bind(board_id)
                .fetch_one(&mut *tx)
                .await?;
        if owned == 0 {
            return Err(StoreError::not_found(Entity::Column, column_id));
        }
        let removed = cascade::run(&mut tx, CascadeRoot::Column, column_id).await?;
        tx.commit().await?;
        cascade::record(CascadeRoot::Column, column_id, removed);
        Ok(removed)
    }

    /// Applies a batch of title and position changes to columns of one board.
    ///
    /// An entry only applies when its column id belongs to `board_id`;
    /// entries for other boards or unknown ids change nothing. The batch runs
    /// in one transaction, so a storage failure leaves every column as it was.
    /// Returns the number of rows changed.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty batch
    /// - `NoColumnsUpdated` when no entry matched, in which case nothing is kept
    /// - the classified storage error of a failing statement
    #[instrument(skip(self, updates), fields(batch = updates.len()))]
    pub async fn reorder(&self, board_id: i64, updates: &[ColumnUpdate]) -> StoreResult<u64> {
        if updates.is_empty() {
            return Err(StoreError::InvalidInput(
                "updates must be a non-empty array".into(),
            ));
        }

        let mut tx = self.store.begin().await?;
        let mut changed = 0;
        for update in updates {
            let affected =
                sqlx::query("UPDATE Columns SET title = ?, position = ? WHERE id = ? AND boardId = ?")
                    .bind(&update.title)
                    .bind(update.position)
                    .bind(update.id)
                    .bind(board_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
            if affected == 0 {
                debug!(column_id = update.id, "Column not on board, skipped");
            }
            changed += affected;
        }

        if changed == 0 {
            return Err(StoreError::NoColumnsUpdated { board_id });
        }
        tx.commit().await?;
        info!(changed, "Columns reordered");
        Ok(changed)
    }
}

#[async_trait]
impl EntityRepository for ColumnRepository {
    type Record = Column;
    type Input = ColumnInput;

    const ENTITY: Entity = Entity::Column;

    /// Appends after the board's last column when no position is given.
    #[instrument(skip(self, input))]
    async fn create(&self, input: ColumnInput) -> StoreResult<Column> {
        self.store.require(Entity::Board, input.board_id).await?;
        let sql = format!(
            "INSERT INTO Columns (title, boardId, position) \
             VALUES (?, ?, COALESCE(?, (SELECT COALESCE(MAX(position), 0) + 1 FROM Columns WHERE boardId = ?))) \
             RETURNING {COLUMNS}"
        );
        let column = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.board_id)
            .bind(input.position)
            .bind(input.board_id)
            .fetch_one(self.store.pool())
            .await?;
        Ok(column)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Column>> {
        let sql = format!("SELECT {COLUMNS} FROM Columns ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<Column> {
        let sql = format!("SELECT {COLUMNS} FROM Columns WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    /// Moving a column to another board carries its tasks along, so every
    /// task keeps the board of its column.
    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: ColumnInput) -> StoreResult<Column> {
        let mut tx = self.store.begin().await?;
        Store::require_on(&mut *tx, Entity::Board, input.board_id).await?;
        let sql = format!(
            "UPDATE Columns SET title = ?, boardId = ?, position = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        let column: Column = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.board_id)
            .bind(input.position)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))?;
        let moved = sqlx::query("UPDATE Tasks SET boardId = ? WHERE columnId = ? AND boardId <> ?")
            .bind(column.board_id)
            .bind(column.id)
            .bind(column.board_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        if moved > 0 {
            debug!(column_id = column.id, moved, "Tasks followed column to board");
        }
        Ok(column)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::Column, id).await
    }
}
