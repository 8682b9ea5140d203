//! Core board state and reordering engine for the task tracker.
//! This crate is the single source of truth for board invariants.

pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod view;

pub use engine::{insert_task, move_task, remove_task, replace_task, MoveRequest, Placement};
pub use error::{BoardError, BoardResult, ErrorKind};
pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LoggingConfig, LoggingError,
};
pub use model::board::{Board, TaskLocation};
pub use model::column::{Column, ColumnId, ColumnIdError};
pub use model::task::{
    now_epoch_ms, Attachment, AttachmentId, AttachmentKind, Comment, CommentId, Priority,
    ProjectId, Task, TaskDraft, TaskEdit, TaskId, TaskStatus, TaskValidationError,
};
pub use model::user::{User, UserId, UserRegistry, UserRole};
pub use service::board_controller::{
    BoardController, ControllerState, ObserverId, SnapshotObserver,
};
pub use service::intent::{Intent, IntentOutcome};
pub use view::{
    project, project_with, summarize, tasks_assigned_to, BoardSummary, ColumnSummary, ViewQuery,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
