//! Entity repositories over the shared [`Store`](crate::store::Store).
//!
//! Each repository owns a clone of the store handle and issues parameterized
//! statements against one table. Writes return the stored row via
//! `RETURNING`; every referenced parent is checked before the write so a
//! dangling id surfaces as a referential error instead of an orphan row.

pub mod actions;
pub mod assignments;
pub mod boards;
pub mod columns;
pub mod tasks;
pub mod users;
pub mod workspaces;

pub use actions::TaskActionRepository;
pub use assignments::AssignmentRepository;
pub use boards::BoardRepository;
pub use columns::ColumnRepository;
pub use tasks::TaskRepository;
pub use users::UserRepository;
pub use workspaces::WorkspaceRepository;

use async_trait::async_trait;

use crate::domain::Entity;
use crate::store::StoreResult;

/// Contract shared by every entity with a generated integer key.
///
/// `update` is a full replacement: fields absent from the input are written
/// as `NULL` and rejected by the store when the column is required.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Stored row returned by reads and writes.
    type Record: Send;
    /// Payload accepted by `create` and `update`.
    type Input: Send;

    /// Entity kind handled by this repository.
    const ENTITY: Entity;

    /// Inserts a row and returns it with its generated id.
    ///
    /// # Errors
    /// Referential error for a missing parent, constraint error for a
    /// rejected field, storage error otherwise.
    async fn create(&self, input: Self::Input) -> StoreResult<Self::Record>;

    /// Returns every row in ascending id order.
    ///
    /// # Errors
    /// Returns a storage error if the query fails.
    async fn list(&self) -> StoreResult<Vec<Self::Record>>;

    /// Returns the row with `id`.
    ///
    /// # Errors
    /// Returns `NotFound` when no such row exists.
    async fn get(&self, id: i64) -> StoreResult<Self::Record>;

    /// Replaces the row with `id` and returns the stored result.
    ///
    /// # Errors
    /// `NotFound` when no such row exists, plus the errors of `create`.
    async fn update(&self, id: i64, input: Self::Input) -> StoreResult<Self::Record>;

    /// Deletes the row with `id` and all of its dependents.
    ///
    /// Returns the number of dependent rows removed.
    ///
    /// # Errors
    /// Returns `NotFound` when no such row exists.
    async fn delete(&self, id: i64) -> StoreResult<u64>;
}
