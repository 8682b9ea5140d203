//! Drag-initiated task moves.
//!
//! # Invariants
//! - Total task count is conserved.
//! - The moved task ends up exactly once, in the destination column.
//! - The moved task's status equals the destination column's status.
//! - Columns not touched by the move keep their `Arc` identity.

use crate::error::{BoardError, BoardResult};
use crate::model::board::Board;
use crate::model::column::ColumnId;
use crate::model::task::TaskId;
use log::debug;
use std::sync::Arc;

/// Positional move of one task, as produced by a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub task_id: TaskId,
    pub source_column: ColumnId,
    pub source_index: usize,
    pub dest_column: ColumnId,
    /// Clamped to the destination length after removal.
    pub dest_index: usize,
}

impl MoveRequest {
    pub fn new(
        task_id: TaskId,
        source_column: ColumnId,
        source_index: usize,
        dest_column: ColumnId,
        dest_index: usize,
    ) -> Self {
        Self {
            task_id,
            source_column,
            source_index,
            dest_column,
            dest_index,
        }
    }

    /// Whether the drop landed on the slot it started from.
    pub fn is_noop(&self) -> bool {
        self.source_column == self.dest_column && self.source_index == self.dest_index
    }
}

/// Applies `request` to `board` and returns the resulting snapshot.
///
/// A drop on the origin slot returns `board` itself (pointer-equal).
///
/// # Errors
/// - `ColumnNotFound` when either column id does not resolve.
/// - `TaskNotFound` when the task is not on the board.
/// - `IndexOutOfRange` when `source_index` is past the source column end.
/// - `StaleIndex` when the source slot holds a different task.
pub fn move_task(board: &Arc<Board>, request: &MoveRequest) -> BoardResult<Arc<Board>> {
    let source_pos = board
        .column_index(&request.source_column)
        .ok_or_else(|| BoardError::ColumnNotFound(request.source_column.clone()))?;
    let dest_pos = board
        .column_index(&request.dest_column)
        .ok_or_else(|| BoardError::ColumnNotFound(request.dest_column.clone()))?;

    if board.task(request.task_id).is_none() {
        return Err(BoardError::TaskNotFound(request.task_id));
    }

    let source = &board.columns()[source_pos];
    let slot = source
        .tasks()
        .get(request.source_index)
        .ok_or_else(|| BoardError::IndexOutOfRange {
            column: request.source_column.clone(),
            index: request.source_index,
            len: source.len(),
        })?;
    if slot.id() != request.task_id {
        return Err(BoardError::StaleIndex {
            column: request.source_column.clone(),
            index: request.source_index,
            expected: request.task_id,
            found: slot.id(),
        });
    }

    if request.is_noop() {
        return Ok(Arc::clone(board));
    }

    let mut columns = board.columns().to_vec();
    let mut source_tasks = source.tasks().to_vec();
    let moved = source_tasks.remove(request.source_index);

    if source_pos == dest_pos {
        let index = clamp_index(request.dest_index, source_tasks.len(), &request.dest_column);
        source_tasks.insert(index, moved);
        columns[source_pos] = Arc::new(source.with_sequence(source_tasks));
    } else {
        let dest = &board.columns()[dest_pos];
        let moved = if moved.status() == dest.status() {
            moved
        } else {
            Arc::new(moved.with_status(dest.status()))
        };
        let mut dest_tasks = dest.tasks().to_vec();
        let index = clamp_index(request.dest_index, dest_tasks.len(), &request.dest_column);
        dest_tasks.insert(index, moved);
        columns[source_pos] = Arc::new(source.with_sequence(source_tasks));
        columns[dest_pos] = Arc::new(dest.with_sequence(dest_tasks));
    }

    Ok(Arc::new(Board::from_shared(board.project_id(), columns)))
}

pub(crate) fn clamp_index(index: usize, len: usize, column: &ColumnId) -> usize {
    if index > len {
        debug!(
            "event=index_clamped module=engine status=ok column={} requested={} len={}",
            column, index, len
        );
        return len;
    }
    index
}
