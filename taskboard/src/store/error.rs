//! Error taxonomy for store and repository operations.

use sqlx::error::ErrorKind;

use crate::domain::Entity;

/// Result type for store and repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when using the store.
///
/// Every `sqlx::Error` is classified into one of these kinds before it
/// reaches the HTTP layer; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Kind of the missing row.
        entity: Entity,
        /// Identifier that was looked up.
        key: String,
    },
    /// A foreign key target does not exist or does not match.
    #[error("Referential error: {0}")]
    Referential(String),
    /// A uniqueness, not-null or check constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),
    /// The request payload is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A column batch matched no rows on the board.
    #[error("No columns were updated")]
    NoColumnsUpdated {
        /// Board the batch targeted.
        board_id: i64,
    },
    /// Connection or I/O failure in the underlying store.
    #[error("Database Error: {0}")]
    Storage(#[source] sqlx::Error),
}

impl StoreError {
    /// Builds a [`StoreError::NotFound`] for `entity` keyed by `key`.
    pub fn not_found(entity: Entity, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Builds a [`StoreError::Referential`] for a missing parent row.
    pub fn missing_parent(entity: Entity, id: i64) -> Self {
        Self::Referential(format!("{entity} {id} does not exist"))
    }

    /// Stable snake-case name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::NoColumnsUpdated { .. } => "not_found",
            Self::Referential(_) => "referential",
            Self::Constraint(_) => "constraint",
            Self::InvalidInput(_) => "invalid_input",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        let kind = match &error {
            sqlx::Error::Database(db) => Some((db.kind(), db.message().to_owned())),
            _ => None,
        };
        match kind {
            Some((ErrorKind::ForeignKeyViolation, message)) => Self::Referential(message),
            Some((
                ErrorKind::UniqueViolation | ErrorKind::NotNullViolation | ErrorKind::CheckViolation,
                message,
            )) => Self::Constraint(message),
            _ => Self::Storage(error),
        }
    }
}
