//! Transactional cascade delete.
//!
//! Each deletable parent has a plan: dependent rows are removed child-first
//! (assignments and actions, tasks, columns, boards, workspaces) and the root
//! row last, all inside one transaction. The schema's `ON DELETE CASCADE`
//! clauses stay in place, but the plan does not rely on them, so a store
//! opened without foreign key enforcement keeps the same invariant.

use sqlx::{query::Query, Database, Sqlite, SqliteConnection};
use tracing::{debug, instrument};

use super::error::{StoreError, StoreResult};
use super::r#impl::Store;
use crate::domain::Entity;
use crate::infrastructure::audit::{self, AuditEvent};

/// Parents that can be deleted through a cascade plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeRoot {
    /// Removes owned workspaces and everything below, plus the user's links.
    User,
    /// Removes boards and everything below.
    Workspace,
    /// Removes columns, tasks and task links.
    Board,
    /// Removes tasks in the column and their links.
    Column,
    /// Removes the task's assignments and actions.
    Task,
    /// Leaf row; nothing depends on it.
    TaskAction,
}

impl CascadeRoot {
    /// Entity deleted by the root statement.
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::User => Entity::User,
            Self::Workspace => Entity::Workspace,
            Self::Board => Entity::Board,
            Self::Column => Entity::Column,
            Self::Task => Entity::Task,
            Self::TaskAction => Entity::TaskAction,
        }
    }
}

/// Ordered delete statements for one root. Every `?` binds the root id.
#[derive(Debug, Clone)]
pub struct CascadePlan {
    dependents: Vec<String>,
    root: String,
}

impl CascadePlan {
    /// Builds the plan for `root`.
    #[must_use]
    pub fn for_root(root: CascadeRoot) -> Self {
        match root {
            CascadeRoot::User => {
                let workspaces = "SELECT id FROM Workspaces WHERE owner = ?";
                let boards = format!("SELECT id FROM Boards WHERE workspace IN ({workspaces})");
                let mut dependents = board_contents(&boards);
                dependents.push(format!("DELETE FROM Boards WHERE id IN ({boards})"));
                dependents.push("DELETE FROM Workspaces WHERE owner = ?".to_owned());
                dependents.push("DELETE FROM UserTaskAssignments WHERE userId = ?".to_owned());
                dependents.push("DELETE FROM TaskActions WHERE userId = ?".to_owned());
                Self::new(dependents, Entity::User)
            }
            CascadeRoot::Workspace => {
                let boards = "SELECT id FROM Boards WHERE workspace = ?";
                let mut dependents = board_contents(boards);
                dependents.push("DELETE FROM Boards WHERE workspace = ?".to_owned());
                Self::new(dependents, Entity::Workspace)
            }
            CascadeRoot::Board => Self::new(board_contents("?"), Entity::Board),
            CascadeRoot::Column => {
                let mut dependents = task_links("SELECT id FROM Tasks WHERE columnId = ?");
                dependents.push("DELETE FROM Tasks WHERE columnId = ?".to_owned());
                Self::new(dependents, Entity::Column)
            }
            CascadeRoot::Task => Self::new(task_links("?"), Entity::Task),
            CascadeRoot::TaskAction => Self::new(Vec::new(), Entity::TaskAction),
        }
    }

    fn new(dependents: Vec<String>, entity: Entity) -> Self {
        Self {
            dependents,
            root: format!("DELETE FROM {} WHERE id = ?", entity.table()),
        }
    }

    /// Statements removing dependent rows, in execution order.
    #[must_use]
    pub fn dependents(&self) -> &[String] {
        &self.dependents
    }

    /// Statement removing the root row; runs last.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }
}

fn task_links(tasks: &str) -> Vec<String> {
    vec![
        format!("DELETE FROM UserTaskAssignments WHERE taskId IN ({tasks})"),
        format!("DELETE FROM TaskActions WHERE taskId IN ({tasks})"),
    ]
}

fn board_contents(boards: &str) -> Vec<String> {
    let columns = format!("SELECT id FROM Columns WHERE boardId IN ({boards})");
    let tasks =
        format!("SELECT id FROM Tasks WHERE boardId IN ({boards}) OR columnId IN ({columns})");
    let mut statements = task_links(&tasks);
    statements.push(format!("DELETE FROM Tasks WHERE id IN ({tasks})"));
    statements.push(format!("DELETE FROM Columns WHERE boardId IN ({boards})"));
    statements
}

fn bind_id(sql: &str, id: i64) -> Query<'_, Sqlite, <Sqlite as Database>::Arguments<'_>> {
    (0..sql.matches('?').count()).fold(sqlx::query(sql), |query, _| query.bind(id))
}

/// Runs the plan for `root` on an open connection or transaction.
///
/// Returns the number of dependent rows removed. Does not commit.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the root row does not exist (the
/// dependents deleted so far are then left for the caller to roll back), or
/// the classified `sqlx` error of the first failing statement.
pub async fn run(conn: &mut SqliteConnection, root: CascadeRoot, id: i64) -> StoreResult<u64> {
    let plan = CascadePlan::for_root(root);
    let mut removed = 0;
    for statement in plan.dependents() {
        removed += bind_id(statement, id).execute(&mut *conn).await?.rows_affected();
    }
    let deleted = bind_id(plan.root(), id).execute(&mut *conn).await?.rows_affected();
    if deleted == 0 {
        return Err(StoreError::not_found(root.entity(), id));
    }
    Ok(removed)
}

/// Deletes `id` and everything that depends on it in one transaction.
///
/// Either the root and all dependents are gone afterwards or nothing changed.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the root row does not exist, or a
/// classified storage error; in both cases the transaction is rolled back.
#[instrument(skip(store))]
pub async fn delete(store: &Store, root: CascadeRoot, id: i64) -> StoreResult<u64> {
    let mut tx = store.begin().await?;
    let removed = run(&mut tx, root, id).await?;
    tx.commit().await?;
    record(root, id, removed);
    Ok(removed)
}

/// Emits the audit event and counter for a committed cascade.
pub(crate) fn record(root: CascadeRoot, id: i64, removed: u64) {
    let entity = root.entity();
    debug!(%entity, id, removed, "Cascade delete committed");
    metrics::counter!("taskboard_cascade_deletes_total", "entity" => entity.label()).increment(1);
    audit::log_audit(&AuditEvent::CascadeDelete {
        entity,
        id,
        dependents: removed,
    });
}
