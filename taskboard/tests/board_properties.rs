//! Cross-module properties of the repositories and the assembler, driven
//! through the public crate API.

use anyhow::Result;
use taskboard::assembler::Assembler;
use taskboard::domain::{
    AssignmentInput, BoardInput, ColumnInput, ColumnUpdate, TaskActionInput, TaskInput, UserInput,
    WorkspaceInput,
};
use taskboard::repository::{
    AssignmentRepository, BoardRepository, ColumnRepository, EntityRepository,
    TaskActionRepository, TaskRepository, UserRepository, WorkspaceRepository,
};
use taskboard::store::{Store, StoreError};

struct Board {
    store: Store,
    user: i64,
    workspace: i64,
    board: i64,
}

async fn board() -> Result<Board> {
    let store = Store::in_memory().await?;
    let user = UserRepository::new(store.clone())
        .create(UserInput::new("owner"))
        .await?
        .id;
    let workspace = WorkspaceRepository::new(store.clone())
        .create(WorkspaceInput::new("Team", user))
        .await?
        .id;
    let board = BoardRepository::new(store.clone())
        .create(BoardInput::new("Roadmap", workspace))
        .await?
        .id;
    Ok(Board {
        store,
        user,
        workspace,
        board,
    })
}

#[tokio::test]
async fn test_board_detail_counts_and_order() -> Result<()> {
    let fx = board().await?;
    let columns = ColumnRepository::new(fx.store.clone());
    let tasks = TaskRepository::new(fx.store.clone());

    // positions deliberately out of insertion order
    let mut column_ids = Vec::new();
    for position in [3, 1, 2] {
        let column = columns
            .create(ColumnInput::new(format!("col {position}"), fx.board, position))
            .await?;
        column_ids.push(column.id);
    }
    for (i, column) in column_ids.iter().enumerate() {
        for n in 0..=i {
            tasks
                .create(TaskInput::new(format!("task {i}.{n}"), *column))
                .await?;
        }
    }

    let detail = Assembler::new(&fx.store).board_detail(fx.board).await?;
    assert_eq!(detail.columns.len(), 3);
    assert_eq!(detail.tasks.len(), 6);
    let positions: Vec<i64> = detail.columns.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert!(detail.tasks.iter().all(|t| t.assignees.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_reorder_reports_matched_rows_only() -> Result<()> {
    let fx = board().await?;
    let other = BoardRepository::new(fx.store.clone())
        .create(BoardInput::new("Elsewhere", fx.workspace))
        .await?;
    let columns = ColumnRepository::new(fx.store.clone());
    let mine = columns.create(ColumnInput::new("Mine", fx.board, 1)).await?;
    let theirs = columns.create(ColumnInput::new("Theirs", other.id, 1)).await?;

    let batch = |title: &str| {
        vec![
            ColumnUpdate {
                id: theirs.id,
                title: title.into(),
                position: 2,
            },
            ColumnUpdate {
                id: mine.id,
                title: title.into(),
                position: 5,
            },
        ]
    };
    assert_eq!(columns.reorder(fx.board, &batch("Moved")).await?, 1);
    assert_eq!(columns.get(theirs.id).await?.title, "Theirs");
    assert_eq!(columns.get(mine.id).await?.position, 5);

    assert!(matches!(
        columns.reorder(other.id + 1, &batch("None")).await,
        Err(StoreError::NoColumnsUpdated { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_delete_of_missing_row_is_not_found_everywhere() -> Result<()> {
    let fx = board().await?;
    let store = fx.store;
    let missing = 10_000;

    let results = [
        UserRepository::new(store.clone()).delete(missing).await,
        WorkspaceRepository::new(store.clone()).delete(missing).await,
        BoardRepository::new(store.clone()).delete(missing).await,
        ColumnRepository::new(store.clone()).delete(missing).await,
        TaskRepository::new(store.clone()).delete(missing).await,
        TaskActionRepository::new(store.clone()).delete(missing).await,
    ];
    for result in results {
        assert!(matches!(result, Err(StoreError::NotFound { .. })), "{result:?}");
    }
    assert!(matches!(
        AssignmentRepository::new(store)
            .unassign(AssignmentInput::new(missing, missing))
            .await,
        Err(StoreError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_nothing_reachable_from_deleted_workspace_survives() -> Result<()> {
    let fx = board().await?;
    let column = ColumnRepository::new(fx.store.clone())
        .create(ColumnInput::new("Todo", fx.board, 1))
        .await?;
    let tasks = TaskRepository::new(fx.store.clone());
    let task = tasks.create(TaskInput::new("Ship", column.id)).await?;
    AssignmentRepository::new(fx.store.clone())
        .assign(AssignmentInput::new(task.id, fx.user))
        .await?;
    let actions = TaskActionRepository::new(fx.store.clone());
    let action = actions
        .create(TaskActionInput::new(task.id, fx.user, "opened"))
        .await?;

    WorkspaceRepository::new(fx.store.clone())
        .delete(fx.workspace)
        .await?;

    assert!(BoardRepository::new(fx.store.clone()).get(fx.board).await.is_err());
    assert!(ColumnRepository::new(fx.store.clone()).get(column.id).await.is_err());
    assert!(tasks.get(task.id).await.is_err());
    assert!(actions.get(action.id).await.is_err());
    assert!(AssignmentRepository::new(fx.store.clone())
        .list_for_user(fx.user)
        .await?
        .is_empty());
    assert!(UserRepository::new(fx.store).get(fx.user).await.is_ok());
    Ok(())
}
