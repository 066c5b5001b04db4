//! Boards table access.

use async_trait::async_trait;
use tracing::instrument;

use super::EntityRepository;
use crate::domain::{Board, BoardInput, BoardSummary, Entity};
use crate::store::cascade::{self, CascadeRoot};
use crate::store::{Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, dateCreated, workspace";

/// Reads and writes [`Board`] rows.
#[derive(Debug, Clone)]
pub struct BoardRepository {
    store: Store,
}

impl BoardRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Id and title of every board in `workspace_id`, ascending by id.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_workspace(&self, workspace_id: i64) -> StoreResult<Vec<BoardSummary>> {
        let boards = sqlx::query_as("SELECT id, title FROM Boards WHERE workspace = ? ORDER BY id")
            .bind(workspace_id)
            .fetch_all(self.store.pool())
            .await?;
        Ok(boards)
    }
}

#[async_trait]
impl EntityRepository for BoardRepository {
    type Record = Board;
    type Input = BoardInput;

    const ENTITY: Entity = Entity::Board;

    #[instrument(skip(self, input))]
    async fn create(&self, input: BoardInput) -> StoreResult<Board> {
        self.store.require(Entity::Workspace, input.workspace).await?;
        let sql = format!("INSERT INTO Boards (title, workspace) VALUES (?, ?) RETURNING {COLUMNS}");
        let board = sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.workspace)
            .fetch_one(self.store.pool())
            .await?;
        Ok(board)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<Board>> {
        let sql = format!("SELECT {COLUMNS} FROM Boards ORDER BY id");
        Ok(sqlx::query_as(&sql).fetch_all(self.store.pool()).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i64) -> StoreResult<Board> {
        let sql = format!("SELECT {COLUMNS} FROM Boards WHERE id = ?");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: BoardInput) -> StoreResult<Board> {
        self.store.require(Entity::Workspace, input.workspace).await?;
        let sql =
            format!("UPDATE Boards SET title = ?, workspace = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as(&sql)
            .bind(input.title)
            .bind(input.workspace)
            .bind(id)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or_else(|| StoreError::not_found(Self::ENTITY, id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        cascade::delete(&self.store, CascadeRoot::Board, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_list_for_workspace_only_returns_its_boards() -> anyhow::Result<()> {
        let seed = fixtures::seed().await?;
        let boards = BoardRepository::new(seed.store.clone());
        let second = boards
            .create(BoardInput::new("Backlog", seed.workspace.id))
            .await?;

        let summaries = boards.list_for_workspace(seed.workspace.id).await?;
        assert_eq!(
            summaries,
            vec![
                BoardSummary {
                    id: seed.board.id,
                    title: "Sprint".into()
                },
                BoardSummary {
                    id: second.id,
                    title: "Backlog".into()
                },
            ]
        );
        assert!(boards.list_for_workspace(seed.workspace.id + 1).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_in_missing_workspace_is_referential() -> anyhow::Result<()> {
        let seed = fixtures::seed().await?;
        let boards = BoardRepository::new(seed.store);
        let err = boards.create(BoardInput::new("Lost", 404)).await.unwrap_err();
        assert!(matches!(err, StoreError::Referential(_)), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_reports_dependents() -> anyhow::Result<()> {
        let seed = fixtures::seed().await?;
        let boards = BoardRepository::new(seed.store);
        // column + task
        assert_eq!(boards.delete(seed.board.id).await?, 2);
        assert!(matches!(
            boards.get(seed.board.id).await,
            Err(StoreError::NotFound { .. })
        ));
        Ok(())
    }
}
