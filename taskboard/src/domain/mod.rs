//! Domain types for the task board.
//!
//! Records mirror stored rows, inputs carry the fixed field set accepted by
//! create and update, and views are the nested payloads built by the
//! assembler.

mod entities;
mod inputs;
mod views;

pub use entities::{
    Assignment, Board, BoardSummary, Column, Entity, Task, TaskAction, TaskSummary, User,
    UserSummary, Workspace,
};
pub use inputs::{
    AssignmentInput, BoardInput, ColumnInput, ColumnRename, ColumnUpdate, TaskActionInput,
    TaskInput, UserInput, WorkspaceInput,
};
pub use views::{
    ASSIGNEE_DELIMITER, BoardDetail, TaskView, TaskWithAssigneesRow, WorkspaceDetail,
    split_assignees,
};
