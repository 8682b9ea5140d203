mod common;

use common::{board_with, col};
use taskboard_core::{
    Board, BoardError, Column, ErrorKind, Task, TaskDraft, TaskStatus, TaskValidationError,
};
use uuid::Uuid;

#[test]
fn board_serializes_columns_in_display_order() {
    let (board, tasks) = board_with(&[
        (TaskStatus::Todo, &["T1"]),
        (TaskStatus::InReview, &["R1"]),
    ]);

    let json = serde_json::to_value(&*board).unwrap();
    assert_eq!(json["columns"][0]["id"], "todo");
    assert_eq!(json["columns"][2]["id"], "review");
    assert_eq!(json["columns"][2]["status"], "in_review");
    assert_eq!(json["columns"][0]["tasks"][0]["id"], tasks[0].id().to_string());
    assert_eq!(json["columns"][0]["tasks"][0]["priority"], "medium");

    let decoded: Board = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, *board);
}

#[test]
fn deserialize_rejects_task_in_wrong_column() {
    let (board, _) = board_with(&[(TaskStatus::Todo, &["T1"])]);
    let mut json = serde_json::to_value(&*board).unwrap();
    json["columns"][0]["tasks"][0]["status"] = serde_json::json!("done");

    let err = serde_json::from_value::<Board>(json).unwrap_err();
    assert!(err.to_string().contains("invariant"));
}

#[test]
fn board_rejects_task_listed_twice() {
    let project = Uuid::new_v4();
    let task = Task::create(TaskDraft::new(project, "Twin")).unwrap();
    let columns = vec![
        Column::for_status(TaskStatus::Todo).with_tasks([task.clone()]),
        Column::new(col("backlog"), "Backlog", TaskStatus::Todo).with_tasks([task]),
    ];

    let err = Board::new(project, columns).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvariantViolation);
}

#[test]
fn board_rejects_invalid_task_fields() {
    let (board, _) = board_with(&[(TaskStatus::Todo, &["T1"])]);
    let mut json = serde_json::to_value(&*board).unwrap();
    json["columns"][0]["tasks"][0]["title"] = serde_json::json!("  ");

    let err = serde_json::from_value::<Board>(json).unwrap_err();
    assert!(err.to_string().contains("title"));
    assert_eq!(
        BoardError::from(TaskValidationError::BlankTitle).kind(),
        ErrorKind::Validation
    );
}

#[test]
fn deserialize_rejects_duplicate_column_ids() {
    let project = Uuid::new_v4();
    let json = serde_json::json!({
        "project_id": project,
        "columns": [
            { "id": "todo", "title": "To Do", "status": "todo", "tasks": [] },
            { "id": "todo", "title": "Again", "status": "done", "tasks": [] }
        ]
    });
    let err = serde_json::from_value::<Board>(json).unwrap_err();
    assert!(err.to_string().contains("duplicate column id"));
}

#[test]
fn deserialize_rejects_task_from_other_project() {
    let (board, tasks) = board_with(&[(TaskStatus::Todo, &["T1"])]);
    let other = Uuid::new_v4();
    let mut json = serde_json::to_value(&*board).unwrap();
    json["project_id"] = serde_json::json!(other);

    let err = serde_json::from_value::<Board>(json).unwrap_err();
    assert!(err.to_string().contains(&tasks[0].id().to_string()));
    assert!(err.to_string().contains(&other.to_string()));
}

#[test]
fn locate_and_lookup_agree() {
    let (board, tasks) = board_with(&[
        (TaskStatus::Todo, &["T1", "T2"]),
        (TaskStatus::Done, &["D1"]),
    ]);

    let location = board.locate(tasks[1].id()).unwrap();
    assert_eq!(location.column, col("todo"));
    assert_eq!(location.index, 1);
    assert_eq!(board.task(tasks[2].id()).unwrap().title(), "D1");
    assert_eq!(board.total_task_count(), 3);
    assert!(board.locate(Uuid::new_v4()).is_none());
    assert_eq!(
        board.column_for_status(TaskStatus::Done).unwrap().id(),
        &col("done")
    );
}
