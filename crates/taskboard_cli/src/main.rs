//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskboard_core` linkage without the Flutter runtime.
//! - Walk one board through create, move and search with deterministic output.

use std::process::ExitCode;
use taskboard_core::{
    now_epoch_ms, summarize, BoardController, ColumnId, LoggingConfig, MoveRequest, Placement,
    TaskDraft, UserRegistry, ViewQuery,
};
use uuid::Uuid;

fn main() -> ExitCode {
    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    if let Err(err) =
        LoggingConfig::from_env().and_then(|config| taskboard_core::init_logging(&config))
    {
        eprintln!("logging disabled: {err}");
    }

    match run_demo() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let project = Uuid::new_v4();
    let mut controller = BoardController::with_default_board(project, UserRegistry::new());
    controller.subscribe(|board: &std::sync::Arc<taskboard_core::Board>, revision: u64| {
        println!("snapshot revision={revision} tasks={}", board.total_task_count());
    });

    let payment = controller.submit_create(
        TaskDraft::new(project, "Payment gateway integration"),
        &Placement::default(),
    )?;
    controller.submit_create(
        TaskDraft::new(project, "Design product catalog page"),
        &Placement::default(),
    )?;

    let todo = ColumnId::new("todo")?;
    let done = ColumnId::new("done")?;
    controller.submit_move(&MoveRequest::new(payment, todo, 0, done, 0))?;

    let view = controller.submit_filter(&ViewQuery::new("catalog"));
    println!("search catalog hits={}", view.total_task_count());

    let summary = summarize(&controller.snapshot(), now_epoch_ms());
    println!("summary={}", serde_json::to_string(&summary)?);
    Ok(())
}
