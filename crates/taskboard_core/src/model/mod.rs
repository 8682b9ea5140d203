//! Board domain model.
//!
//! # Responsibility
//! - Define the task, column, board and user records.
//! - Expose read accessors only; positional state changes go through
//!   `crate::engine`.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Users are referenced by id, never owned by tasks.

pub mod board;
pub mod column;
pub mod task;
pub mod user;
