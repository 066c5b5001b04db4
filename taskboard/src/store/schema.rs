//! Relational schema for the task board.
//!
//! Parents are created before children; every foreign key cascades on
//! delete. `Columns.position` is indexed but not unique so a reorder can
//! swap two positions inside one transaction.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

/// Table creation statements, parents first.
const CREATE_STATEMENTS: [&str; 7] = [
    "CREATE TABLE IF NOT EXISTS Users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE CHECK (length(username) > 0),
        dateCreated DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS Workspaces (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        dateCreated DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        owner INTEGER NOT NULL,
        FOREIGN KEY (owner) REFERENCES Users(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS Boards (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        dateCreated DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        workspace INTEGER NOT NULL,
        FOREIGN KEY (workspace) REFERENCES Workspaces(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS Columns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        boardId INTEGER NOT NULL,
        position INTEGER NOT NULL,
        FOREIGN KEY (boardId) REFERENCES Boards(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS Tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        dateCreated DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        dueDate DATETIME,
        priority TEXT,
        status TEXT,
        timeEstimate INTEGER,
        timeSpent INTEGER,
        columnId INTEGER NOT NULL,
        boardId INTEGER NOT NULL,
        FOREIGN KEY (columnId) REFERENCES Columns(id) ON DELETE CASCADE,
        FOREIGN KEY (boardId) REFERENCES Boards(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS UserTaskAssignments (
        taskId INTEGER NOT NULL,
        userId INTEGER NOT NULL,
        PRIMARY KEY (taskId, userId),
        FOREIGN KEY (taskId) REFERENCES Tasks(id) ON DELETE CASCADE,
        FOREIGN KEY (userId) REFERENCES Users(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS TaskActions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        taskId INTEGER NOT NULL,
        userId INTEGER NOT NULL,
        action TEXT NOT NULL,
        date DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (taskId) REFERENCES Tasks(id) ON DELETE CASCADE,
        FOREIGN KEY (userId) REFERENCES Users(id) ON DELETE CASCADE
    )",
];

const INDEX_STATEMENTS: [&str; 6] = [
    "CREATE INDEX IF NOT EXISTS idx_workspaces_owner ON Workspaces(owner)",
    "CREATE INDEX IF NOT EXISTS idx_boards_workspace ON Boards(workspace)",
    "CREATE INDEX IF NOT EXISTS idx_columns_board_position ON Columns(boardId, position)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_column ON Tasks(columnId)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_board ON Tasks(boardId)",
    "CREATE INDEX IF NOT EXISTS idx_assignments_user ON UserTaskAssignments(userId)",
];

/// Children first, so drops never trip a foreign key.
const DROP_STATEMENTS: [&str; 7] = [
    "DROP TABLE IF EXISTS TaskActions",
    "DROP TABLE IF EXISTS UserTaskAssignments",
    "DROP TABLE IF EXISTS Tasks",
    "DROP TABLE IF EXISTS Columns",
    "DROP TABLE IF EXISTS Boards",
    "DROP TABLE IF EXISTS Workspaces",
    "DROP TABLE IF EXISTS Users",
];

/// Table names in creation order.
pub const TABLES: [&str; 7] = [
    "Users",
    "Workspaces",
    "Boards",
    "Columns",
    "Tasks",
    "UserTaskAssignments",
    "TaskActions",
];

/// Creates any missing table or index. Safe to run on every start.
///
/// # Errors
///
/// Returns the first `sqlx` error raised by a statement.
#[instrument(skip(pool))]
pub async fn ensure(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in CREATE_STATEMENTS.iter().chain(INDEX_STATEMENTS.iter()) {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!(tables = TABLES.len(), "Schema ensured");
    Ok(())
}

/// Drops every table and recreates the schema, discarding all data.
///
/// # Errors
///
/// Returns the first `sqlx` error raised by a statement.
#[instrument(skip(pool))]
pub async fn reset(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in DROP_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    ensure(pool).await
}
