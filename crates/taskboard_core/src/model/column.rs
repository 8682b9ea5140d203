//! Board column model.
//!
//! # Invariants
//! - `ColumnId` is a non-blank slug.
//! - Sequence index equals display position.
//! - Every task in `tasks` carries the column's `status` once committed.

use crate::model::task::{Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Column identifier, e.g. `todo` or `review`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId(String);

/// Rejected column identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnIdError {
    Blank,
}

impl Display for ColumnIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "column id must not be blank"),
        }
    }
}

impl Error for ColumnIdError {}

impl ColumnId {
    /// Creates a column id from a trimmed, non-blank value.
    pub fn new(value: impl Into<String>) -> Result<Self, ColumnIdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ColumnIdError::Blank);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical slug for the default column bound to `status`.
    pub fn for_status(status: TaskStatus) -> Self {
        let slug = match status {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "progress",
            TaskStatus::InReview => "review",
            TaskStatus::Done => "done",
        };
        Self(slug.to_string())
    }
}

impl TryFrom<String> for ColumnId {
    type Error = ColumnIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = ColumnIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnId> for String {
    fn from(value: ColumnId) -> Self {
        value.0
    }
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status-bound ordered list of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    status: TaskStatus,
    tasks: Vec<Arc<Task>>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: ColumnId, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            status,
            tasks: Vec::new(),
        }
    }

    /// Creates the canonical empty column for `status`.
    pub fn for_status(status: TaskStatus) -> Self {
        Self::new(ColumnId::for_status(status), status.label(), status)
    }

    /// Returns this column holding `tasks` in the given order.
    ///
    /// Membership is only checked when the column is placed on a board.
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks = tasks.into_iter().map(Arc::new).collect();
        self
    }

    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Position of `task_id` in this column.
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().map(|task| task.id())
    }

    /// Returns a copy with its task sequence replaced.
    pub(crate) fn with_sequence(&self, tasks: Vec<Arc<Task>>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnId, ColumnIdError};
    use crate::model::task::TaskStatus;

    #[test]
    fn column_id_rejects_blank_and_trims() {
        assert_eq!(ColumnId::new("  "), Err(ColumnIdError::Blank));
        assert_eq!(ColumnId::new(" todo ").unwrap().as_str(), "todo");
        assert_eq!(ColumnId::for_status(TaskStatus::InReview).as_str(), "review");
    }
}
