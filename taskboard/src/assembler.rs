//! Composite reads for nested resources.
//!
//! The parent row is looked up first and gates everything else: a missing
//! board or workspace is reported as `NotFound` before any child query runs.
//! Independent child reads are issued concurrently.

use tracing::instrument;

use crate::domain::{BoardDetail, WorkspaceDetail};
use crate::repository::{
    BoardRepository, ColumnRepository, EntityRepository, TaskRepository, WorkspaceRepository,
};
use crate::store::{Store, StoreResult};

/// Builds board and workspace detail views.
#[derive(Debug, Clone)]
pub struct Assembler {
    workspaces: WorkspaceRepository,
    boards: BoardRepository,
    columns: ColumnRepository,
    tasks: TaskRepository,
}

impl Assembler {
    /// Creates an assembler reading through `store`.
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            workspaces: WorkspaceRepository::new(store.clone()),
            boards: BoardRepository::new(store.clone()),
            columns: ColumnRepository::new(store.clone()),
            tasks: TaskRepository::new(store.clone()),
        }
    }

    /// The board with its columns in position order and its tasks with
    /// assignees.
    ///
    /// # Errors
    /// `NotFound` for a missing board; storage error if any read fails.
    #[instrument(skip(self))]
    pub async fn board_detail(&self, board_id: i64) -> StoreResult<BoardDetail> {
        let board = self.boards.get(board_id).await?;
        let (columns, tasks) = tokio::try_join!(
            self.columns.list_for_board(board_id),
            self.tasks.list_for_board(board_id),
        )?;
        Ok(BoardDetail {
            board,
            columns,
            tasks,
        })
    }

    /// The workspace with the id and title of each of its boards.
    ///
    /// # Errors
    /// `NotFound` for a missing workspace; storage error if any read fails.
    #[instrument(skip(self))]
    pub async fn workspace_detail(&self, workspace_id: i64) -> StoreResult<WorkspaceDetail> {
        let workspace = self.workspaces.get(workspace_id).await?;
        let boards = self.boards.list_for_workspace(workspace_id).await?;
        Ok(WorkspaceDetail { workspace, boards })
    }
}
