//! Write payloads accepted by create and update.
//!
//! Each input carries the fixed field set for its entity; unknown JSON fields
//! are ignored. Required fields are still `Option` here: an absent value is
//! bound as `NULL` and rejected by the store's `NOT NULL` constraint, which
//! surfaces as a constraint error rather than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Fields for creating or replacing a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    /// Login name.
    pub username: Option<String>,
}

impl UserInput {
    /// Builds an input with the given username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }
}

/// Fields for creating or replacing a workspace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceInput {
    /// Display title.
    pub title: Option<String>,
    /// Owning user id.
    pub owner: Option<i64>,
}

impl WorkspaceInput {
    /// Builds an input with all fields present.
    #[must_use]
    pub fn new(title: impl Into<String>, owner: i64) -> Self {
        Self {
            title: Some(title.into()),
            owner: Some(owner),
        }
    }
}

/// Fields for creating or replacing a board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardInput {
    /// Display title.
    pub title: Option<String>,
    /// Parent workspace id.
    pub workspace: Option<i64>,
}

impl BoardInput {
    /// Builds an input with all fields present.
    #[must_use]
    pub fn new(title: impl Into<String>, workspace: i64) -> Self {
        Self {
            title: Some(title.into()),
            workspace: Some(workspace),
        }
    }
}

/// Fields for creating or replacing a column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInput {
    /// Display title.
    pub title: Option<String>,
    /// Parent board id.
    pub board_id: Option<i64>,
    /// Display order; appended after the last column when absent.
    pub position: Option<i64>,
}

impl ColumnInput {
    /// Builds an input for `board_id` with an explicit position.
    #[must_use]
    pub fn new(title: impl Into<String>, board_id: i64, position: i64) -> Self {
        Self {
            title: Some(title.into()),
            board_id: Some(board_id),
            position: Some(position),
        }
    }
}

/// Body of the column rename endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnRename {
    /// New title.
    pub title: Option<String>,
}

/// One entry of a column reorder batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnUpdate {
    /// Column to change; must belong to the target board.
    pub id: i64,
    /// New title.
    pub title: String,
    /// New position.
    pub position: i64,
}

/// Fields for creating or replacing a task.
///
/// `board` may be omitted; it is derived from `column`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Task title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority label.
    pub priority: Option<String>,
    /// Status label.
    pub status: Option<String>,
    /// Estimated effort.
    pub time_estimate: Option<i64>,
    /// Effort spent.
    pub time_spent: Option<i64>,
    /// Containing column id.
    pub column: Option<i64>,
    /// Containing board id.
    pub board: Option<i64>,
}

impl TaskInput {
    /// Builds an input with a title and column and no optional fields.
    #[must_use]
    pub fn new(title: impl Into<String>, column: i64) -> Self {
        Self {
            title: Some(title.into()),
            column: Some(column),
            ..Self::default()
        }
    }
}

/// Body of the assign and unassign endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    /// Task id.
    pub task_id: Option<i64>,
    /// User id.
    pub user_id: Option<i64>,
}

impl AssignmentInput {
    /// Builds an input for the given pair.
    #[must_use]
    pub const fn new(task_id: i64, user_id: i64) -> Self {
        Self {
            task_id: Some(task_id),
            user_id: Some(user_id),
        }
    }
}

/// Fields for recording a task action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActionInput {
    /// Task the action refers to; taken from the path on the HTTP surface.
    #[serde(default)]
    pub task_id: Option<i64>,
    /// Acting user.
    pub user_id: Option<i64>,
    /// Action description.
    pub action: Option<String>,
}

impl TaskActionInput {
    /// Builds an input with all fields present.
    #[must_use]
    pub fn new(task_id: i64, user_id: i64, action: impl Into<String>) -> Self {
        Self {
            task_id: Some(task_id),
            user_id: Some(user_id),
            action: Some(action.into()),
        }
    }
}
