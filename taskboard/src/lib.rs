//! Taskboard - task-management backend over an embedded `SQLite` store.
//!
//! This crate provides the storage schema, entity repositories, composite
//! read assembly for boards and workspaces, the column reorder operator, and
//! the HTTP surface that exposes them.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// HTTP endpoints for every resource.
pub mod api;
/// Nested read models for board and workspace detail.
pub mod assembler;
/// Records, write inputs and view models.
pub mod domain;
/// Infrastructure components (config, server, telemetry, audit).
pub mod infrastructure;
/// Entity repositories over the store.
pub mod repository;
/// Shared application state handed to request handlers.
pub mod state;
/// `SQLite` store, schema and cascade rules.
pub mod store;
