//! Nested view models and the assignee reshape step.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::entities::{Board, BoardSummary, Column, Task, Workspace};

/// Separator used by the store when aggregating assignee usernames.
///
/// ASCII unit separator, so usernames containing commas survive the round trip.
pub const ASSIGNEE_DELIMITER: char = '\u{1f}';

/// Splits a delimiter-joined username aggregate into a sorted list.
///
/// `None` and the empty string both yield an empty list, never a null.
#[must_use]
pub fn split_assignees(aggregate: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = aggregate
        .unwrap_or_default()
        .split(ASSIGNEE_DELIMITER)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect();
    names.sort_unstable();
    names
}

/// Flat query row: a task plus its aggregated assignee usernames.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithAssigneesRow {
    /// Task columns.
    #[sqlx(flatten)]
    pub task: Task,
    /// `group_concat` of usernames, `NULL` when unassigned.
    pub assignees: Option<String>,
}

/// A task with the usernames of everyone assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task fields, flattened into the payload.
    #[serde(flatten)]
    pub task: Task,
    /// Assignee usernames, ascending; empty when unassigned.
    pub assignees: Vec<String>,
}

impl From<TaskWithAssigneesRow> for TaskView {
    fn from(row: TaskWithAssigneesRow) -> Self {
        Self {
            assignees: split_assignees(row.assignees.as_deref()),
            task: row.task,
        }
    }
}

/// Board detail: the board, its ordered columns and its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDetail {
    /// Board fields, flattened into the payload.
    #[serde(flatten)]
    pub board: Board,
    /// Columns in ascending position.
    pub columns: Vec<Column>,
    /// Tasks in this board's columns, with assignees.
    pub tasks: Vec<TaskView>,
}

/// Workspace detail: the workspace and a summary of its boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceDetail {
    /// Workspace row.
    pub workspace: Workspace,
    /// Boards in the workspace (id and title only).
    pub boards: Vec<BoardSummary>,
}
