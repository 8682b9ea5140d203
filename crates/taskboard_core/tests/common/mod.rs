#![allow(dead_code)]

use std::sync::Arc;
use taskboard_core::{Board, Column, ColumnId, ProjectId, Task, TaskDraft, TaskStatus};
use uuid::Uuid;

pub fn col(id: &str) -> ColumnId {
    ColumnId::new(id).unwrap()
}

pub fn task(project: ProjectId, title: &str, status: TaskStatus) -> Task {
    Task::create(TaskDraft::new(project, title).status(status)).unwrap()
}

/// Board with the four default columns, filled from `(status, titles)` pairs.
pub fn board_with(rows: &[(TaskStatus, &[&str])]) -> (Arc<Board>, Vec<Task>) {
    let project = Uuid::new_v4();
    let mut all = Vec::new();
    let columns = TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let tasks = rows
                .iter()
                .filter(|(row_status, _)| *row_status == status)
                .flat_map(|(_, titles)| titles.iter())
                .map(|title| task(project, title, status))
                .collect::<Vec<_>>();
            all.extend(tasks.iter().cloned());
            Column::for_status(status).with_tasks(tasks)
        })
        .collect();
    (Arc::new(Board::new(project, columns).unwrap()), all)
}

pub fn titles(board: &Board, column: &str) -> Vec<String> {
    board
        .column(&col(column))
        .unwrap()
        .tasks()
        .iter()
        .map(|task| task.title().to_string())
        .collect()
}
