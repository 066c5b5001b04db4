//! Shared application state handed to every HTTP handler.

use crate::assembler::Assembler;
use crate::repository::{
    AssignmentRepository, BoardRepository, ColumnRepository, TaskActionRepository,
    TaskRepository, UserRepository, WorkspaceRepository,
};
use crate::store::Store;

/// Repositories and the assembler, all sharing one [`Store`].
#[derive(Debug, Clone)]
pub struct AppState {
    store: Store,
    users: UserRepository,
    workspaces: WorkspaceRepository,
    boards: BoardRepository,
    columns: ColumnRepository,
    tasks: TaskRepository,
    assignments: AssignmentRepository,
    actions: TaskActionRepository,
    assembler: Assembler,
}

impl AppState {
    /// Wires every component to `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            workspaces: WorkspaceRepository::new(store.clone()),
            boards: BoardRepository::new(store.clone()),
            columns: ColumnRepository::new(store.clone()),
            tasks: TaskRepository::new(store.clone()),
            assignments: AssignmentRepository::new(store.clone()),
            actions: TaskActionRepository::new(store.clone()),
            assembler: Assembler::new(&store),
            store,
        }
    }

    /// The store handle.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Users repository.
    #[must_use]
    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Workspaces repository.
    #[must_use]
    pub fn workspaces(&self) -> &WorkspaceRepository {
        &self.workspaces
    }

    /// Boards repository.
    #[must_use]
    pub fn boards(&self) -> &BoardRepository {
        &self.boards
    }

    /// Columns repository.
    #[must_use]
    pub fn columns(&self) -> &ColumnRepository {
        &self.columns
    }

    /// Tasks repository.
    #[must_use]
    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    /// Assignments repository.
    #[must_use]
    pub fn assignments(&self) -> &AssignmentRepository {
        &self.assignments
    }

    /// Task actions repository.
    #[must_use]
    pub fn actions(&self) -> &TaskActionRepository {
        &self.actions
    }

    /// Board and workspace detail assembler.
    #[must_use]
    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }
}
