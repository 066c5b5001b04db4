//! Relational store: connection handle, schema, error taxonomy and the
//! cascade delete plans.

pub mod cascade;
mod error;
pub mod r#impl;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use r#impl::Store;

#[cfg(test)]
mod integration_tests;
