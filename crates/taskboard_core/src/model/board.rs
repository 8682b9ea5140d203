//! Board aggregate.
//!
//! # Responsibility
//! - Own the ordered columns of one project board.
//! - Check the structural invariants that bind tasks to columns.
//!
//! # Invariants
//! - Column ids are unique.
//! - Every task id appears in exactly one column, exactly once.
//! - Every task's `status` equals the status of its column.
//! - Every task belongs to the board's project.
//! - A `Board` value is immutable once built; changes produce a new board.

use crate::error::{BoardError, BoardResult};
use crate::model::column::{Column, ColumnId};
use crate::model::task::{ProjectId, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Where a task currently sits on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    pub column: ColumnId,
    pub index: usize,
}

/// Immutable snapshot of one project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    project_id: ProjectId,
    columns: Vec<Arc<Column>>,
}

/// Unchecked wire shape; converted through [`Board::new`].
#[derive(Deserialize)]
struct BoardRecord {
    project_id: ProjectId,
    columns: Vec<Column>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardError;

    fn try_from(value: BoardRecord) -> Result<Self, Self::Error> {
        Board::new(value.project_id, value.columns)
    }
}

impl Board {
    /// Builds a board after checking every structural invariant.
    ///
    /// # Errors
    /// - `InvariantViolation` for duplicate column ids, duplicate task ids, or
    ///   tasks whose status disagrees with their column.
    /// - `Validation` when a task fails field validation.
    /// - `ProjectMismatch` when a task belongs to another project.
    pub fn new(project_id: ProjectId, columns: Vec<Column>) -> BoardResult<Self> {
        let board = Self {
            project_id,
            columns: columns.into_iter().map(Arc::new).collect(),
        };
        board.check_invariants()?;
        Ok(board)
    }

    /// Builds an empty board with the canonical four status columns.
    pub fn with_default_columns(project_id: ProjectId) -> Self {
        Self {
            project_id,
            columns: TaskStatus::ALL
                .into_iter()
                .map(|status| Arc::new(Column::for_status(status)))
                .collect(),
        }
    }

    /// Builds a board from already-shared columns without re-checking.
    ///
    /// Callers inside the crate guarantee invariants hold.
    pub(crate) fn from_shared(project_id: ProjectId, columns: Vec<Arc<Column>>) -> Self {
        Self {
            project_id,
            columns,
        }
    }

    /// Re-checks every structural invariant.
    pub fn check_invariants(&self) -> BoardResult<()> {
        let mut column_ids = HashSet::new();
        let mut seen: HashMap<TaskId, &ColumnId> = HashMap::new();

        for column in &self.columns {
            if !column_ids.insert(column.id()) {
                return Err(BoardError::InvariantViolation(format!(
                    "duplicate column id {}",
                    column.id()
                )));
            }

            for task in column.tasks() {
                task.validate()?;
                self.ensure_same_project(task)?;
                if let Some(previous) = seen.insert(task.id(), column.id()) {
                    return Err(BoardError::InvariantViolation(format!(
                        "task {} appears in column {} and column {}",
                        task.id(),
                        previous,
                        column.id()
                    )));
                }
                if task.status() != column.status() {
                    return Err(BoardError::InvariantViolation(format!(
                        "task {} has status {:?} but sits in column {} ({:?})",
                        task.id(),
                        task.status(),
                        column.id(),
                        column.status()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Rejects `task` unless it belongs to this board's project.
    pub fn ensure_same_project(&self, task: &Task) -> BoardResult<()> {
        if task.project_id() == self.project_id {
            return Ok(());
        }
        Err(BoardError::ProjectMismatch {
            task: task.id(),
            board_project: self.project_id,
            task_project: task.project_id(),
        })
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Arc<Column>> {
        self.columns.iter().find(|column| column.id() == id)
    }

    pub(crate) fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id() == id)
    }

    /// First column bound to `status`, in display order.
    pub fn column_for_status(&self, status: TaskStatus) -> Option<&Arc<Column>> {
        self.columns.iter().find(|column| column.status() == status)
    }

    pub fn locate(&self, task_id: TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|column| {
            column.position_of(task_id).map(|index| TaskLocation {
                column: column.id().clone(),
                index,
            })
        })
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Arc<Task>> {
        self.columns
            .iter()
            .flat_map(|column| column.tasks())
            .find(|task| task.id() == task_id)
    }

    pub fn total_task_count(&self) -> usize {
        self.columns.iter().map(|column| column.len()).sum()
    }

    /// All task ids in column order, then position order.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.columns
            .iter()
            .flat_map(|column| column.task_ids())
            .collect()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.columns.iter().flat_map(|column| column.tasks())
    }
}
