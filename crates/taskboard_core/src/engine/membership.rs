//! Column membership changes other than moves: insert, remove, replace.

use crate::engine::mv::clamp_index;
use crate::error::{BoardError, BoardResult};
use crate::model::board::Board;
use crate::model::column::ColumnId;
use crate::model::task::{Task, TaskId};
use std::sync::Arc;

/// Target slot for a newly inserted task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Defaults to the first column bound to the task's status.
    pub column: Option<ColumnId>,
    /// Defaults to the end of the column. Clamped to the column length.
    pub index: Option<usize>,
}

impl Placement {
    pub fn in_column(column: ColumnId) -> Self {
        Self {
            column: Some(column),
            index: None,
        }
    }
}

/// Inserts a new task and returns the resulting snapshot.
///
/// When an explicit column disagrees with the task's status, the task takes
/// the column's status.
///
/// # Errors
/// - `ProjectMismatch` when the task belongs to another project.
/// - `ColumnNotFound` when the target column does not resolve.
/// - `InvariantViolation` when the task id is already on the board.
pub fn insert_task(
    board: &Arc<Board>,
    task: Task,
    placement: &Placement,
) -> BoardResult<Arc<Board>> {
    board.ensure_same_project(&task)?;
    if board.task(task.id()).is_some() {
        return Err(BoardError::InvariantViolation(format!(
            "task {} is already on the board",
            task.id()
        )));
    }

    let target = match &placement.column {
        Some(id) => board
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.clone()))?,
        None => {
            let column = board
                .column_for_status(task.status())
                .ok_or_else(|| BoardError::ColumnNotFound(ColumnId::for_status(task.status())))?;
            board
                .column_index(column.id())
                .ok_or_else(|| BoardError::ColumnNotFound(column.id().clone()))?
        }
    };

    let column = &board.columns()[target];
    let task = if task.status() == column.status() {
        task
    } else {
        task.with_status(column.status())
    };

    let mut tasks = column.tasks().to_vec();
    let index = match placement.index {
        Some(index) => clamp_index(index, tasks.len(), column.id()),
        None => tasks.len(),
    };
    tasks.insert(index, Arc::new(task));

    let mut columns = board.columns().to_vec();
    columns[target] = Arc::new(column.with_sequence(tasks));
    Ok(Arc::new(Board::from_shared(board.project_id(), columns)))
}

/// Removes one task atomically and returns the new snapshot plus the task.
pub fn remove_task(board: &Arc<Board>, task_id: TaskId) -> BoardResult<(Arc<Board>, Arc<Task>)> {
    let location = board
        .locate(task_id)
        .ok_or(BoardError::TaskNotFound(task_id))?;
    let target = board
        .column_index(&location.column)
        .ok_or_else(|| BoardError::ColumnNotFound(location.column.clone()))?;

    let column = &board.columns()[target];
    let mut tasks = column.tasks().to_vec();
    let removed = tasks.remove(location.index);

    let mut columns = board.columns().to_vec();
    columns[target] = Arc::new(column.with_sequence(tasks));
    Ok((
        Arc::new(Board::from_shared(board.project_id(), columns)),
        removed,
    ))
}

/// Swaps in a new version of an existing task at the same position.
///
/// # Errors
/// - `TaskNotFound` when the id is not on the board.
/// - `InvariantViolation` when the replacement changes `status`.
pub fn replace_task(board: &Arc<Board>, task: Task) -> BoardResult<Arc<Board>> {
    let location = board
        .locate(task.id())
        .ok_or(BoardError::TaskNotFound(task.id()))?;
    let target = board
        .column_index(&location.column)
        .ok_or_else(|| BoardError::ColumnNotFound(location.column.clone()))?;

    let column = &board.columns()[target];
    if task.status() != column.status() {
        return Err(BoardError::InvariantViolation(format!(
            "replacement for task {} changes status outside a move",
            task.id()
        )));
    }

    let mut tasks = column.tasks().to_vec();
    tasks[location.index] = Arc::new(task);

    let mut columns = board.columns().to_vec();
    columns[target] = Arc::new(column.with_sequence(tasks));
    Ok(Arc::new(Board::from_shared(board.project_id(), columns)))
}

#[cfg(test)]
mod tests {
    use super::{insert_task, remove_task, replace_task, Placement};
    use crate::error::{BoardError, ErrorKind};
    use crate::model::board::Board;
    use crate::model::column::ColumnId;
    use crate::model::task::{Task, TaskDraft, TaskStatus};
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn insert_defaults_to_status_column_end() {
        let project = Uuid::new_v4();
        let board = Arc::new(Board::with_default_columns(project));
        let first = Task::create(TaskDraft::new(project, "A").status(TaskStatus::InReview)).unwrap();
        let second = Task::create(TaskDraft::new(project, "B").status(TaskStatus::InReview)).unwrap();

        let board = insert_task(&board, first.clone(), &Placement::default()).unwrap();
        let board = insert_task(&board, second.clone(), &Placement::default()).unwrap();

        let review = board.column(&ColumnId::new("review").unwrap()).unwrap();
        let ids = review.task_ids().collect::<Vec<_>>();
        assert_eq!(ids, vec![first.id(), second.id()]);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn insert_into_explicit_column_adopts_its_status() {
        let project = Uuid::new_v4();
        let board = Arc::new(Board::with_default_columns(project));
        let task = Task::create(TaskDraft::new(project, "Hotfix")).unwrap();
        let placement = Placement {
            column: Some(ColumnId::new("done").unwrap()),
            index: Some(10),
        };

        let board = insert_task(&board, task.clone(), &placement).unwrap();
        assert_eq!(board.task(task.id()).unwrap().status(), TaskStatus::Done);
    }

    #[test]
    fn insert_rejects_task_from_other_project() {
        let board = Arc::new(Board::with_default_columns(Uuid::new_v4()));
        let task = Task::create(TaskDraft::new(Uuid::new_v4(), "Elsewhere")).unwrap();

        let err = insert_task(&board, task, &Placement::default()).unwrap_err();
        assert!(matches!(err, BoardError::ProjectMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(board.total_task_count(), 0);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let project = Uuid::new_v4();
        let board = Arc::new(Board::with_default_columns(project));
        let task = Task::create(TaskDraft::new(project, "Once")).unwrap();
        let board = insert_task(&board, task.clone(), &Placement::default()).unwrap();

        let err = insert_task(&board, task, &Placement::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn remove_then_replace_missing_task_fails() {
        let project = Uuid::new_v4();
        let board = Arc::new(Board::with_default_columns(project));
        let task = Task::create(TaskDraft::new(project, "Gone soon")).unwrap();
        let board = insert_task(&board, task.clone(), &Placement::default()).unwrap();

        let (board, removed) = remove_task(&board, task.id()).unwrap();
        assert_eq!(removed.id(), task.id());
        assert_eq!(board.total_task_count(), 0);

        let err = replace_task(&board, task.clone()).unwrap_err();
        assert_eq!(err, BoardError::TaskNotFound(task.id()));
    }
}
