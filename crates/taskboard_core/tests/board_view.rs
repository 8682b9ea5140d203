mod common;

use common::{board_with, col, titles};
use std::sync::Arc;
use taskboard_core::{
    project, project_with, Board, Column, Priority, Task, TaskDraft, TaskStatus, ViewQuery,
};
use uuid::Uuid;

fn storefront_board() -> Arc<Board> {
    let project = Uuid::new_v4();
    let todo = vec![
        Task::create(
            TaskDraft::new(project, "Design product catalog page")
                .description("Wireframes with filtering and search"),
        )
        .unwrap(),
        Task::create(
            TaskDraft::new(project, "Payment gateway integration")
                .description("Stripe checkout flow")
                .priority(Priority::High),
        )
        .unwrap(),
        Task::create(TaskDraft::new(project, "Write onboarding emails")).unwrap(),
    ];
    let done = vec![Task::create(
        TaskDraft::new(project, "Set up CI")
            .status(TaskStatus::Done)
            .description("Pipeline runs on every push"),
    )
    .unwrap()];
    Arc::new(
        Board::new(
            project,
            vec![
                Column::for_status(TaskStatus::Todo).with_tasks(todo),
                Column::for_status(TaskStatus::Done).with_tasks(done),
            ],
        )
        .unwrap(),
    )
}

#[test]
fn empty_query_is_identity() {
    let board = storefront_board();
    let view = project(&board, "");
    assert!(Arc::ptr_eq(&view, &board));
    assert_eq!(*view, *board);
}

#[test]
fn payment_query_returns_only_matching_task() {
    let board = storefront_board();
    let view = project(&board, "payment");

    assert_eq!(view.total_task_count(), 1);
    assert_eq!(titles(&view, "todo"), ["Payment gateway integration"]);
    assert!(titles(&view, "done").is_empty());
}

#[test]
fn matches_description_case_insensitively() {
    let board = storefront_board();
    let view = project(&board, "PIPELINE");
    assert_eq!(titles(&view, "done"), ["Set up CI"]);
}

#[test]
fn projection_is_pure_and_repeatable() {
    let board = storefront_board();
    let before = (*board).clone();

    let first = project(&board, "e");
    let second = project(&board, "e");

    assert_eq!(*board, before);
    assert_eq!(first, second);
}

#[test]
fn filtered_tasks_keep_relative_order() {
    let (board, _) = board_with(&[(
        TaskStatus::InReview,
        &["alpha one", "beta", "alpha two", "gamma", "alpha three"],
    )]);
    let view = project(&board, "alpha");
    assert_eq!(
        titles(&view, "review"),
        ["alpha one", "alpha two", "alpha three"]
    );
    assert_eq!(board.column(&col("review")).unwrap().len(), 5);
}

#[test]
fn attribute_filters_apply_without_text() {
    let board = storefront_board();
    let query = ViewQuery {
        priority: Some(Priority::High),
        ..ViewQuery::default()
    };
    let view = project_with(&board, &query);
    assert_eq!(titles(&view, "todo"), ["Payment gateway integration"]);
}
