//! Ordering engine.
//!
//! # Responsibility
//! - Compute new board snapshots for moves, inserts, removals and in-place
//!   replacements.
//! - Be the only writer of task `status` and column membership.
//!
//! # Invariants
//! - Input snapshots are never mutated; every change yields a new `Board`.
//! - Each task id appears exactly once across all columns after any change.

pub mod membership;
pub mod mv;

pub use membership::{insert_task, remove_task, replace_task, Placement};
pub use mv::{move_task, MoveRequest};
