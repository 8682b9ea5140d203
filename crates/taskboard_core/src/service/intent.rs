//! Intent and outcome types accepted by [`crate::BoardController`].

use crate::engine::{MoveRequest, Placement};
use crate::error::BoardError;
use crate::model::board::Board;
use crate::model::task::{TaskDraft, TaskEdit, TaskId};
use crate::view::ViewQuery;
use std::sync::Arc;

/// User-initiated request against the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Drag-and-drop relocation.
    Move(MoveRequest),
    /// Search/filter for rendering only.
    Filter(ViewQuery),
    Create {
        draft: TaskDraft,
        placement: Placement,
    },
    /// Non-positional field edit.
    Edit { task_id: TaskId, edit: TaskEdit },
    Delete(TaskId),
}

impl Intent {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::Filter(_) => "filter",
            Self::Create { .. } => "create",
            Self::Edit { .. } => "edit",
            Self::Delete(_) => "delete",
        }
    }
}

/// Result of dispatching one [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A new snapshot was committed and observers were notified.
    Committed(Arc<Board>),
    /// The intent was valid but changed nothing (drop on origin slot).
    Unchanged(Arc<Board>),
    /// Filtered view; the committed snapshot is untouched.
    Projected(Arc<Board>),
    /// The intent was refused; the committed snapshot is untouched.
    Rejected(BoardError),
}

impl IntentOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Board carried by the outcome, if any.
    pub fn board(&self) -> Option<&Arc<Board>> {
        match self {
            Self::Committed(board) | Self::Unchanged(board) | Self::Projected(board) => {
                Some(board)
            }
            Self::Rejected(_) => None,
        }
    }
}
