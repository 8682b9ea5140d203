//! FFI use-case API for the board UI.
//!
//! # Responsibility
//! - Expose the board controller to Dart via FRB as sync calls.
//! - Translate ids and errors into plain strings and envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide controller serializes every intent.

use log::info;
use std::sync::{Mutex, MutexGuard, OnceLock};
use taskboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    summarize, Board, BoardController, ColumnId, LoggingConfig, MoveRequest, Placement, Priority,
    ProjectId, TaskDraft, TaskEdit, TaskId, TaskStatus, User, UserRegistry, UserRole, ViewQuery,
};
use uuid::Uuid;

static BOARD: OnceLock<Mutex<BoardController>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
/// Blank arguments fall back to `TASKBOARD_LOG_LEVEL` / `TASKBOARD_LOG_DIR`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let config = if level.trim().is_empty() && log_dir.trim().is_empty() {
        LoggingConfig::from_env()
    } else {
        LoggingConfig::parse(level.as_str(), log_dir.as_str())
    };
    match config.and_then(|config| init_logging_inner(&config)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Response envelope for board intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether the intent was applied (or was a valid no-op).
    pub ok: bool,
    /// Id of the created, removed or registered record.
    pub id: Option<String>,
    /// Error kind (`not_found|invalid_index|invariant_violation|validation`)
    /// when `ok` is false.
    pub error_kind: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            error_kind: None,
            message: message.into(),
        }
    }

    fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            error_kind: Some(kind.to_string()),
            message: message.into(),
        }
    }
}

/// Board snapshot or view rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardJsonResponse {
    pub ok: bool,
    /// Serialized `Board`; empty on failure.
    pub json: String,
    pub message: String,
}

/// Replaces the committed board with a snapshot from the persistence
/// collaborator. The snapshot is validated before it is accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn board_load_json(json: String) -> BoardActionResponse {
    let board: Board = match serde_json::from_str(&json) {
        Ok(board) => board,
        Err(err) => {
            return BoardActionResponse::failure(
                "validation",
                format!("board_load_json failed: {err}"),
            )
        }
    };
    let mut guard = match lock_board() {
        Ok(guard) => guard,
        Err(message) => return BoardActionResponse::failure("unavailable", message),
    };
    let task_count = board.total_task_count();
    match BoardController::new(board, guard.users().clone()) {
        Ok(controller) => {
            *guard = controller;
            info!("event=board_loaded module=ffi status=ok tasks={task_count}");
            BoardActionResponse::success("Board loaded.", None)
        }
        Err(err) => BoardActionResponse::failure(
            kind_label(&err),
            format!("board_load_json failed: {err}"),
        ),
    }
}

/// Returns the committed snapshot as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot_json() -> BoardJsonResponse {
    match lock_board() {
        Ok(guard) => to_json_response(&guard.snapshot()),
        Err(message) => BoardJsonResponse {
            ok: false,
            json: String::new(),
            message,
        },
    }
}

/// Returns the text-filtered view as JSON. Never alters the board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_search(query: String) -> BoardJsonResponse {
    match lock_board() {
        Ok(guard) => to_json_response(&guard.submit_filter(&ViewQuery::new(query))),
        Err(message) => BoardJsonResponse {
            ok: false,
            json: String::new(),
            message,
        },
    }
}

/// Returns per-column and overdue counters as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn board_summary_json(now_epoch_ms: i64) -> BoardJsonResponse {
    let guard = match lock_board() {
        Ok(guard) => guard,
        Err(message) => {
            return BoardJsonResponse {
                ok: false,
                json: String::new(),
                message,
            }
        }
    };
    match serde_json::to_string(&summarize(&guard.snapshot(), now_epoch_ms)) {
        Ok(json) => BoardJsonResponse {
            ok: true,
            json,
            message: String::new(),
        },
        Err(err) => BoardJsonResponse {
            ok: false,
            json: String::new(),
            message: format!("board_summary_json failed: {err}"),
        },
    }
}

/// Applies a drop gesture already translated to column/index coordinates.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move(
    task_id: String,
    source_column: String,
    source_index: u32,
    dest_column: String,
    dest_index: u32,
) -> BoardActionResponse {
    let request = match parse_move(
        &task_id,
        &source_column,
        source_index,
        &dest_column,
        dest_index,
    ) {
        Ok(request) => request,
        Err(message) => return BoardActionResponse::failure("not_found", message),
    };
    with_controller("board_move", |controller| {
        controller
            .submit_move(&request)
            .map(|_| BoardActionResponse::success("Task moved.", None))
    })
}

/// Creates a task from the add-task form.
///
/// `project_id` defaults to the board's project when absent or blank.
/// `status` and `priority` use snake_case wire names; blank means default.
#[flutter_rust_bridge::frb(sync)]
pub fn board_create_task(
    project_id: Option<String>,
    title: String,
    description: String,
    status: String,
    priority: String,
    assignee_id: Option<String>,
) -> BoardActionResponse {
    let mut guard = match lock_board() {
        Ok(guard) => guard,
        Err(message) => return BoardActionResponse::failure("unavailable", message),
    };
    let project = match non_blank(project_id.as_deref()) {
        Some(value) => match parse_uuid(value, "project_id") {
            Ok(project) => project,
            Err(message) => return BoardActionResponse::failure("validation", message),
        },
        None => guard.snapshot().project_id(),
    };
    let draft = match parse_draft(
        project,
        title,
        description,
        &status,
        &priority,
        assignee_id.as_deref(),
    ) {
        Ok(draft) => draft,
        Err(message) => return BoardActionResponse::failure("validation", message),
    };
    match guard.submit_create(draft, &Placement::default()) {
        Ok(id) => BoardActionResponse::success("Task created.", Some(id.to_string())),
        Err(err) => BoardActionResponse::failure(
            kind_label(&err),
            format!("board_create_task failed: {err}"),
        ),
    }
}

/// Applies a field edit from the task detail view. Never changes status.
///
/// `None` leaves a field untouched. `assignee_id` of `Some("")` unassigns.
#[flutter_rust_bridge::frb(sync)]
pub fn board_edit_task(
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    assignee_id: Option<String>,
    add_tags: Vec<String>,
    remove_tags: Vec<String>,
) -> BoardActionResponse {
    let id = match parse_uuid(&task_id, "task_id") {
        Ok(id) => id,
        Err(message) => return BoardActionResponse::failure("not_found", message),
    };
    let edit = match parse_edit(title, description, priority, assignee_id, add_tags, remove_tags)
    {
        Ok(edit) => edit,
        Err(message) => return BoardActionResponse::failure("validation", message),
    };
    with_controller("board_edit_task", |controller| {
        controller
            .submit_edit(id, &edit)
            .map(|_| BoardActionResponse::success("Task updated.", Some(id.to_string())))
    })
}

/// Deletes a task by id.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(task_id: String) -> BoardActionResponse {
    let id = match parse_uuid(&task_id, "task_id") {
        Ok(id) => id,
        Err(message) => return BoardActionResponse::failure("not_found", message),
    };
    with_controller("board_delete_task", |controller| {
        controller
            .submit_delete(id)
            .map(|task| BoardActionResponse::success("Task deleted.", Some(task.id().to_string())))
    })
}

/// Registers an active user so tasks may reference it. Returns the user id.
#[flutter_rust_bridge::frb(sync)]
pub fn board_register_user(name: String, email: String) -> BoardActionResponse {
    let user = User::new(name.trim(), email.trim(), UserRole::Developer);
    let id = user.id;
    match lock_board() {
        Ok(mut guard) => {
            guard.users_mut().upsert(user);
            BoardActionResponse::success("User registered.", Some(id.to_string()))
        }
        Err(message) => BoardActionResponse::failure("unavailable", message),
    }
}

fn lock_board() -> Result<MutexGuard<'static, BoardController>, String> {
    BOARD
        .get_or_init(|| {
            Mutex::new(BoardController::with_default_board(
                Uuid::new_v4(),
                UserRegistry::new(),
            ))
        })
        .lock()
        .map_err(|_| "board state is poisoned".to_string())
}

fn with_controller(
    op: &str,
    f: impl FnOnce(&mut BoardController) -> taskboard_core::BoardResult<BoardActionResponse>,
) -> BoardActionResponse {
    let mut guard = match lock_board() {
        Ok(guard) => guard,
        Err(message) => return BoardActionResponse::failure("unavailable", message),
    };
    match f(&mut guard) {
        Ok(response) => response,
        Err(err) => BoardActionResponse::failure(kind_label(&err), format!("{op} failed: {err}")),
    }
}

fn kind_label(err: &taskboard_core::BoardError) -> &'static str {
    match err.kind() {
        taskboard_core::ErrorKind::NotFound => "not_found",
        taskboard_core::ErrorKind::InvalidIndex => "invalid_index",
        taskboard_core::ErrorKind::InvariantViolation => "invariant_violation",
        taskboard_core::ErrorKind::Validation => "validation",
    }
}

fn to_json_response(board: &Board) -> BoardJsonResponse {
    match serde_json::to_string(board) {
        Ok(json) => BoardJsonResponse {
            ok: true,
            json,
            message: format!("{} task(s).", board.total_task_count()),
        },
        Err(err) => BoardJsonResponse {
            ok: false,
            json: String::new(),
            message: format!("board serialization failed: {err}"),
        },
    }
}

fn parse_uuid(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field} `{}`", value.trim()))
}

fn parse_column(value: &str) -> Result<ColumnId, String> {
    ColumnId::new(value).map_err(|err| err.to_string())
}

fn parse_move(
    task_id: &str,
    source_column: &str,
    source_index: u32,
    dest_column: &str,
    dest_index: u32,
) -> Result<MoveRequest, String> {
    let task_id: TaskId = parse_uuid(task_id, "task_id")?;
    Ok(MoveRequest::new(
        task_id,
        parse_column(source_column)?,
        source_index as usize,
        parse_column(dest_column)?,
        dest_index as usize,
    ))
}

fn parse_draft(
    project: ProjectId,
    title: String,
    description: String,
    status: &str,
    priority: &str,
    assignee_id: Option<&str>,
) -> Result<TaskDraft, String> {
    let mut draft = TaskDraft::new(project, title).description(description);
    if let Some(status) = parse_status(status)? {
        draft = draft.status(status);
    }
    if let Some(priority) = parse_priority(priority)? {
        draft = draft.priority(priority);
    }
    if let Some(assignee) = non_blank(assignee_id) {
        draft = draft.assignee(parse_uuid(assignee, "assignee_id")?);
    }
    Ok(draft)
}

fn parse_edit(
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    assignee_id: Option<String>,
    add_tags: Vec<String>,
    remove_tags: Vec<String>,
) -> Result<TaskEdit, String> {
    let priority = match priority.as_deref() {
        Some(value) => parse_priority(value)?,
        None => None,
    };
    let assignee = match assignee_id.as_deref() {
        None => None,
        Some(value) if value.trim().is_empty() => Some(None),
        Some(value) => Some(Some(parse_uuid(value, "assignee_id")?)),
    };
    Ok(TaskEdit {
        title,
        description,
        priority,
        assignee,
        add_tags,
        remove_tags,
        ..TaskEdit::default()
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn parse_status(value: &str) -> Result<Option<TaskStatus>, String> {
    match value.trim() {
        "" => Ok(None),
        "todo" => Ok(Some(TaskStatus::Todo)),
        "in_progress" => Ok(Some(TaskStatus::InProgress)),
        "in_review" => Ok(Some(TaskStatus::InReview)),
        "done" => Ok(Some(TaskStatus::Done)),
        other => Err(format!("unsupported status `{other}`")),
    }
}

fn parse_priority(value: &str) -> Result<Option<Priority>, String> {
    match value.trim() {
        "" => Ok(None),
        "high" => Ok(Some(Priority::High)),
        "medium" => Ok(Some(Priority::Medium)),
        "low" => Ok(Some(Priority::Low)),
        other => Err(format!("unsupported priority `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_create_task, board_edit_task, board_load_json, board_move, board_register_user,
        board_search, board_snapshot_json, core_version, init_logging, ping,
    };
    use std::time::{SystemTime, UNIX_EPOCH};
    use uuid::Uuid;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"));
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn created_task_is_found_by_search() {
        let token = unique_token("ffi-search");
        let created = board_create_task(
            None,
            format!("Task {token}"),
            String::new(),
            "in_review".to_string(),
            "high".to_string(),
            None,
        );
        assert!(created.ok, "{}", created.message);
        let task_id = created.id.expect("create should return an id");

        let view = board_search(token.to_uppercase());
        assert!(view.ok, "{}", view.message);
        assert!(view.json.contains(&task_id));
        assert!(board_snapshot_json().json.contains(&task_id));
    }

    #[test]
    fn create_rejects_unknown_status_and_assignee() {
        let bad_status = board_create_task(
            None,
            "Task".to_string(),
            String::new(),
            "blocked".to_string(),
            String::new(),
            None,
        );
        assert!(!bad_status.ok);
        assert_eq!(bad_status.error_kind.as_deref(), Some("validation"));

        let ghost = board_create_task(
            None,
            "Task".to_string(),
            String::new(),
            String::new(),
            String::new(),
            Some(Uuid::new_v4().to_string()),
        );
        assert!(!ghost.ok);
        assert_eq!(ghost.error_kind.as_deref(), Some("not_found"));
    }

    #[test]
    fn create_accepts_registered_assignee() {
        let user = board_register_user("Sarah".to_string(), "sarah@example.com".to_string());
        assert!(user.ok);
        let created = board_create_task(
            None,
            "Assigned task".to_string(),
            String::new(),
            String::new(),
            "low".to_string(),
            user.id,
        );
        assert!(created.ok, "{}", created.message);
    }

    #[test]
    fn create_rejects_foreign_project() {
        let response = board_create_task(
            Some(Uuid::new_v4().to_string()),
            "Wrong board".to_string(),
            String::new(),
            String::new(),
            String::new(),
            None,
        );
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("validation"));
        assert!(response.message.contains("project"));
    }

    #[test]
    fn edit_renames_task_and_rejects_unknown_priority() {
        let token = unique_token("ffi-edit");
        let created = board_create_task(
            None,
            "Draft title".to_string(),
            String::new(),
            String::new(),
            String::new(),
            None,
        );
        let task_id = created.id.expect("create should return an id");

        let renamed = board_edit_task(
            task_id.clone(),
            Some(format!("Renamed {token}")),
            None,
            Some("high".to_string()),
            None,
            vec!["ffi".to_string()],
            Vec::new(),
        );
        assert!(renamed.ok, "{}", renamed.message);
        assert!(board_search(token).json.contains(&task_id));

        let invalid = board_edit_task(
            task_id,
            None,
            None,
            Some("urgent".to_string()),
            None,
            Vec::new(),
            Vec::new(),
        );
        assert!(!invalid.ok);
        assert_eq!(invalid.error_kind.as_deref(), Some("validation"));
    }

    #[test]
    fn edit_unknown_task_reports_not_found() {
        let response = board_edit_task(
            Uuid::new_v4().to_string(),
            Some("Ghost".to_string()),
            None,
            None,
            None,
            Vec::new(),
            Vec::new(),
        );
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("not_found"));
    }

    #[test]
    fn move_with_unknown_task_reports_not_found() {
        let response = board_move(
            Uuid::new_v4().to_string(),
            "todo".to_string(),
            0,
            "done".to_string(),
            0,
        );
        assert!(!response.ok);
        assert_eq!(response.error_kind.as_deref(), Some("not_found"));
    }

    #[test]
    fn load_rejects_malformed_snapshot() {
        let response = board_load_json("{\"columns\": 3}".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("board_load_json failed"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
