//! Read-only views derived from board snapshots.
//!
//! # Responsibility
//! - Filter boards by text and attribute predicates for rendering.
//! - Derive counters without touching the committed snapshot.
//!
//! # Invariants
//! - Every function here is pure over `(board, query)`.

pub mod project;
pub mod summary;

pub use project::{project, project_with, ViewQuery};
pub use summary::{summarize, tasks_assigned_to, BoardSummary, ColumnSummary};
