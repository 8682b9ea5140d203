//! Board-level error taxonomy.
//!
//! # Responsibility
//! - Describe why an intent was rejected.
//! - Group failures into the coarse kinds callers branch on.
//!
//! # Invariants
//! - A rejected intent never alters the committed snapshot.
//! - `InvariantViolation` signals a defect, not a user-recoverable state.

use crate::model::column::ColumnId;
use crate::model::task::{ProjectId, TaskId, TaskValidationError};
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Coarse classification of [`BoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An id reference does not resolve.
    NotFound,
    /// A positional reference is out of range or stale.
    InvalidIndex,
    /// Board structure is corrupt. Programming error.
    InvariantViolation,
    /// Task fields failed validation.
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    TaskNotFound(TaskId),
    ColumnNotFound(ColumnId),
    UserNotFound(UserId),
    /// User exists but cannot be assigned.
    UserInactive(UserId),
    /// Task belongs to a different project than the board.
    ProjectMismatch {
        task: TaskId,
        board_project: ProjectId,
        task_project: ProjectId,
    },
    IndexOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },
    /// The slot at `index` no longer holds the task the caller expected.
    StaleIndex {
        column: ColumnId,
        index: usize,
        expected: TaskId,
        found: TaskId,
    },
    InvariantViolation(String),
    Validation(TaskValidationError),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::ColumnNotFound(_) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::IndexOutOfRange { .. } | Self::StaleIndex { .. } => ErrorKind::InvalidIndex,
            Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Self::UserInactive(_) | Self::ProjectMismatch { .. } | Self::Validation(_) => {
                ErrorKind::Validation
            }
        }
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ColumnNotFound(id) => write!(f, "column not found: {id}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::UserInactive(id) => write!(f, "user is inactive: {id}"),
            Self::ProjectMismatch {
                task,
                board_project,
                task_project,
            } => write!(
                f,
                "task {task} belongs to project {task_project}, board is {board_project}"
            ),
            Self::IndexOutOfRange { column, index, len } => write!(
                f,
                "index {index} out of range for column {column} (len {len})"
            ),
            Self::StaleIndex {
                column,
                index,
                expected,
                found,
            } => write!(
                f,
                "stale index {index} in column {column}: expected task {expected}, found {found}"
            ),
            Self::InvariantViolation(message) => write!(f, "board invariant violated: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for BoardError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardError, ErrorKind};
    use crate::model::column::ColumnId;
    use crate::model::task::TaskValidationError;
    use std::error::Error;
    use uuid::Uuid;

    #[test]
    fn kinds_group_variants() {
        let column = ColumnId::new("todo").unwrap();
        assert_eq!(
            BoardError::TaskNotFound(Uuid::new_v4()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            BoardError::ColumnNotFound(column.clone()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            BoardError::StaleIndex {
                column,
                index: 0,
                expected: Uuid::new_v4(),
                found: Uuid::new_v4(),
            }
            .kind(),
            ErrorKind::InvalidIndex
        );
        assert_eq!(
            BoardError::InvariantViolation("dup".to_string()).kind(),
            ErrorKind::InvariantViolation
        );
    }

    #[test]
    fn rejected_existing_records_are_validation() {
        assert_eq!(
            BoardError::UserInactive(Uuid::new_v4()).kind(),
            ErrorKind::Validation
        );
        let err = BoardError::ProjectMismatch {
            task: Uuid::new_v4(),
            board_project: Uuid::new_v4(),
            task_project: Uuid::new_v4(),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.source().is_none());
    }

    #[test]
    fn validation_error_is_exposed_as_source() {
        let err = BoardError::from(TaskValidationError::BlankTitle);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "task title must not be blank");
    }
}
