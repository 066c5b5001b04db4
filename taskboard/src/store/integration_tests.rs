//! Store-level tests: schema lifecycle, persistence and cascade integrity.

use secrecy::SecretString;

use super::cascade::{self, CascadeRoot};
use super::schema;
use super::{Store, StoreError};
use crate::domain::{
    AssignmentInput, BoardInput, ColumnInput, Entity, TaskActionInput, TaskInput, UserInput,
};
use crate::infrastructure::config::DatabaseSettings;
use crate::repository::{
    fixtures, AssignmentRepository, BoardRepository, ColumnRepository, EntityRepository,
    TaskActionRepository, TaskRepository, UserRepository, WorkspaceRepository,
};

async fn count(store: &Store, table: &str) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(sqlx::query_scalar(&sql).fetch_one(store.pool()).await?)
}

fn file_settings(path: &std::path::Path, reset_schema: bool) -> DatabaseSettings {
    DatabaseSettings {
        url: SecretString::from(format!("sqlite://{}", path.display())),
        max_connections: 1,
        reset_schema,
    }
}

/// Seed plus an assignment and an action on the task.
async fn linked_seed() -> anyhow::Result<fixtures::Seed> {
    let seed = fixtures::seed().await?;
    AssignmentRepository::new(seed.store.clone())
        .assign(AssignmentInput::new(seed.task.id, seed.user.id))
        .await?;
    TaskActionRepository::new(seed.store.clone())
        .create(TaskActionInput::new(seed.task.id, seed.user.id, "created"))
        .await?;
    Ok(seed)
}

#[tokio::test]
async fn test_schema_ensure_is_idempotent() -> anyhow::Result<()> {
    let seed = fixtures::seed().await?;
    schema::ensure(seed.store.pool()).await?;
    assert_eq!(count(&seed.store, "Tasks").await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_memory_store_shares_one_database_across_concurrent_queries() -> anyhow::Result<()> {
    let store = Store::connect(&DatabaseSettings {
        max_connections: 4,
        ..DatabaseSettings::in_memory()
    })
    .await?;
    let user = UserRepository::new(store.clone())
        .create(UserInput::new("ann"))
        .await?;

    let (a, b, c, d) = tokio::try_join!(
        store.exists(Entity::User, user.id),
        store.exists(Entity::User, user.id),
        store.exists(Entity::User, user.id),
        store.exists(Entity::User, user.id),
    )?;
    assert!(a && b && c && d);
    assert_eq!(store.pool().size(), 1);
    Ok(())
}

#[tokio::test]
async fn test_data_survives_reopen_and_reset_clears_it() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("board.sqlite");

    let store = Store::connect(&file_settings(&path, false)).await?;
    UserRepository::new(store.clone())
        .create(UserInput::new("ann"))
        .await?;
    store.close().await;

    let store = Store::connect(&file_settings(&path, false)).await?;
    assert_eq!(count(&store, "Users").await?, 1);
    store.close().await;

    let store = Store::connect(&file_settings(&path, true)).await?;
    for table in schema::TABLES {
        assert_eq!(count(&store, table).await?, 0, "{table}");
    }
    store.close().await;
    Ok(())
}

#[tokio::test]
async fn test_closed_store_reports_storage_error() -> anyhow::Result<()> {
    let store = Store::in_memory().await?;
    store.close().await;
    assert!(matches!(store.ping().await, Err(StoreError::Storage(_))));
    Ok(())
}

#[tokio::test]
async fn test_workspace_cascade_removes_everything_below() -> anyhow::Result<()> {
    let seed = linked_seed().await?;
    let removed = WorkspaceRepository::new(seed.store.clone())
        .delete(seed.workspace.id)
        .await?;
    // assignment, action, task, column, board
    assert_eq!(removed, 5);
    for table in ["Boards", "Columns", "Tasks", "UserTaskAssignments", "TaskActions"] {
        assert_eq!(count(&seed.store, table).await?, 0, "{table}");
    }
    assert_eq!(count(&seed.store, "Users").await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_user_cascade_removes_owned_tree_and_links() -> anyhow::Result<()> {
    let seed = linked_seed().await?;
    UserRepository::new(seed.store.clone())
        .delete(seed.user.id)
        .await?;
    for table in schema::TABLES {
        assert_eq!(count(&seed.store, table).await?, 0, "{table}");
    }
    Ok(())
}

#[tokio::test]
async fn test_user_cascade_keeps_other_owners_tree() -> anyhow::Result<()> {
    let seed = fixtures::seed().await?;
    let users = UserRepository::new(seed.store.clone());
    let helper = users.create(UserInput::new("helper")).await?;
    AssignmentRepository::new(seed.store.clone())
        .assign(AssignmentInput::new(seed.task.id, helper.id))
        .await?;

    users.delete(helper.id).await?;
    assert_eq!(count(&seed.store, "UserTaskAssignments").await?, 0);
    assert!(seed.store.exists(Entity::Task, seed.task.id).await?);
    assert!(seed.store.exists(Entity::Workspace, seed.workspace.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_cascade_holds_without_foreign_key_enforcement() -> anyhow::Result<()> {
    let seed = linked_seed().await?;
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(seed.store.pool())
        .await?;

    BoardRepository::new(seed.store.clone())
        .delete(seed.board.id)
        .await?;
    for table in ["Columns", "Tasks", "UserTaskAssignments", "TaskActions"] {
        assert_eq!(count(&seed.store, table).await?, 0, "{table}");
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_root_rolls_back() -> anyhow::Result<()> {
    let seed = linked_seed().await?;
    let err = cascade::delete(&seed.store, CascadeRoot::Column, seed.column.id + 100)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(count(&seed.store, "Tasks").await?, 1);
    assert_eq!(count(&seed.store, "UserTaskAssignments").await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_task_cascade_spares_siblings() -> anyhow::Result<()> {
    let seed = linked_seed().await?;
    let tasks = TaskRepository::new(seed.store.clone());
    let sibling = tasks
        .create(TaskInput::new("Sibling", seed.column.id))
        .await?;
    tasks.delete(seed.task.id).await?;
    assert_eq!(tasks.list().await?, vec![sibling]);
    assert_eq!(count(&seed.store, "TaskActions").await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_foreign_key_constraint_maps_to_referential() -> anyhow::Result<()> {
    let seed = fixtures::seed().await?;
    let err: StoreError = sqlx::query("INSERT INTO Boards (title, workspace) VALUES ('x', 999)")
        .execute(seed.store.pool())
        .await
        .unwrap_err()
        .into();
    assert!(matches!(err, StoreError::Referential(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn test_require_checks_parent_rows() -> anyhow::Result<()> {
    let seed = fixtures::seed().await?;
    seed.store.require(Entity::Board, Some(seed.board.id)).await?;
    seed.store.require(Entity::Board, None).await?;
    assert!(matches!(
        seed.store.require(Entity::Board, Some(seed.board.id + 1)).await,
        Err(StoreError::Referential(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_cross_board_column_delete_leaves_rows() -> anyhow::Result<()> {
    let seed = fixtures::seed().await?;
    let other = BoardRepository::new(seed.store.clone())
        .create(BoardInput::new("Other", seed.workspace.id))
        .await?;
    let columns = ColumnRepository::new(seed.store.clone());
    let foreign = columns.create(ColumnInput::new("X", other.id, 1)).await?;

    assert!(columns.delete_in_board(seed.board.id, foreign.id).await.is_err());
    assert!(seed.store.exists(Entity::Column, foreign.id).await?);
    Ok(())
}
