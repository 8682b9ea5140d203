//! Board counters for column badges and dashboard tiles.

use crate::model::board::Board;
use crate::model::column::ColumnId;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::user::UserId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub id: ColumnId,
    pub title: String,
    pub status: TaskStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub columns: Vec<ColumnSummary>,
    pub total: usize,
    /// Tasks past their due date that are not done.
    pub overdue: usize,
    pub by_priority: BTreeMap<Priority, usize>,
}

/// Counts tasks per column and priority, and overdue tasks at `now_ms`.
pub fn summarize(board: &Board, now_ms: i64) -> BoardSummary {
    let columns = board
        .columns()
        .iter()
        .map(|column| ColumnSummary {
            id: column.id().clone(),
            title: column.title().to_string(),
            status: column.status(),
            count: column.len(),
        })
        .collect();

    let mut by_priority = Priority::ALL
        .into_iter()
        .map(|priority| (priority, 0))
        .collect::<BTreeMap<_, _>>();
    let mut overdue = 0;
    for task in board.tasks() {
        *by_priority.entry(task.priority()).or_default() += 1;
        if task.is_overdue(now_ms) {
            overdue += 1;
        }
    }

    BoardSummary {
        columns,
        total: board.total_task_count(),
        overdue,
        by_priority,
    }
}

/// Tasks assigned to `user`, in board order.
pub fn tasks_assigned_to(board: &Board, user: UserId) -> Vec<Arc<Task>> {
    board
        .tasks()
        .filter(|task| task.assignee() == Some(user))
        .cloned()
        .collect()
}
