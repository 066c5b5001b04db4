//! Stored records for the six board entities and their projections.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Entity kinds, used for error messages, audit events and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// A row in `Users`.
    User,
    /// A row in `Workspaces`.
    Workspace,
    /// A row in `Boards`.
    Board,
    /// A row in `Columns`.
    Column,
    /// A row in `Tasks`.
    Task,
    /// A row in `UserTaskAssignments`.
    Assignment,
    /// A row in `TaskActions`.
    TaskAction,
}

impl Entity {
    /// Returns the backing table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::User => "Users",
            Self::Workspace => "Workspaces",
            Self::Board => "Boards",
            Self::Column => "Columns",
            Self::Task => "Tasks",
            Self::Assignment => "UserTaskAssignments",
            Self::TaskAction => "TaskActions",
        }
    }

    /// Returns the lowercase label used in metrics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Workspace => "workspace",
            Self::Board => "board",
            Self::Column => "column",
            Self::Task => "task",
            Self::Assignment => "assignment",
            Self::TaskAction => "task_action",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Workspace => write!(f, "Workspace"),
            Self::Board => write!(f, "Board"),
            Self::Column => write!(f, "Column"),
            Self::Task => write!(f, "Task"),
            Self::Assignment => write!(f, "Assignment"),
            Self::TaskAction => write!(f, "Task action"),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct User {
    /// Generated identifier.
    pub id: i64,
    /// Unique, non-empty login name.
    pub username: String,
    /// Insertion timestamp set by the store.
    pub date_created: NaiveDateTime,
}

/// A workspace owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Workspace {
    /// Generated identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Insertion timestamp set by the store.
    pub date_created: NaiveDateTime,
    /// Owning user id.
    pub owner: i64,
}

/// A board inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Board {
    /// Generated identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Insertion timestamp set by the store.
    pub date_created: NaiveDateTime,
    /// Parent workspace id.
    pub workspace: i64,
}

/// Board projection listed in workspace detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BoardSummary {
    /// Board id.
    pub id: i64,
    /// Board title.
    pub title: String,
}

/// A column on a board. `position` defines display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Column {
    /// Generated identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Parent board id.
    pub board_id: i64,
    /// Display order within the board, ascending.
    pub position: i64,
}

/// A task placed in a column of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Task {
    /// Generated identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Insertion timestamp set by the store.
    pub date_created: NaiveDateTime,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form priority label.
    pub priority: Option<String>,
    /// Free-form status label.
    pub status: Option<String>,
    /// Estimated effort, in caller-defined units.
    pub time_estimate: Option<i64>,
    /// Effort spent so far, in caller-defined units.
    pub time_spent: Option<i64>,
    /// Containing column id.
    #[serde(rename = "column")]
    pub column_id: i64,
    /// Containing board id; always the board of `column_id`.
    #[serde(rename = "board")]
    pub board_id: i64,
}

/// Task projection returned when listing a user's assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TaskSummary {
    /// Task id.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
}

/// User projection returned when listing a task's assignees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    /// User id.
    pub id: i64,
    /// User name.
    pub username: String,
}

/// A (task, user) assignment pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned task id.
    pub task_id: i64,
    /// Assigned user id.
    pub user_id: i64,
}

/// Audit trail entry recorded against a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct TaskAction {
    /// Generated identifier.
    pub id: i64,
    /// Task the action refers to.
    pub task_id: i64,
    /// User who performed the action.
    pub user_id: i64,
    /// Free-form action description.
    pub action: String,
    /// Timestamp set by the store.
    pub date: NaiveDateTime,
}
