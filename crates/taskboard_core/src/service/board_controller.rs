//! Board controller facade.
//!
//! # Responsibility
//! - Accept intents, validate them and commit new board snapshots.
//! - Notify observers after every committed change.
//!
//! # Invariants
//! - Observers only ever see fully applied snapshots.
//! - A rejected intent leaves the committed snapshot and revision untouched.
//! - Intents are applied one at a time; `&mut self` serializes callers.

use crate::engine::{insert_task, move_task, remove_task, replace_task, MoveRequest, Placement};
use crate::error::{BoardError, BoardResult};
use crate::model::board::Board;
use crate::model::task::{now_epoch_ms, ProjectId, Task, TaskDraft, TaskEdit, TaskId};
use crate::model::user::{UserId, UserRegistry};
use crate::service::intent::{Intent, IntentOutcome};
use crate::view::{project_with, ViewQuery};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Holding the last committed snapshot.
    Stable,
    /// Validating and computing an intent.
    Applying,
}

/// Receives every committed snapshot, e.g. the UI layer or a persistence
/// collaborator.
pub trait SnapshotObserver: Send {
    fn on_snapshot(&self, snapshot: &Arc<Board>, revision: u64);
}

impl<F> SnapshotObserver for F
where
    F: Fn(&Arc<Board>, u64) + Send,
{
    fn on_snapshot(&self, snapshot: &Arc<Board>, revision: u64) {
        self(snapshot, revision)
    }
}

/// Handle returned by [`BoardController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// Single entry point for board intents.
pub struct BoardController {
    snapshot: Arc<Board>,
    users: UserRegistry,
    state: ControllerState,
    revision: u64,
    observers: BTreeMap<ObserverId, Box<dyn SnapshotObserver>>,
    next_observer_id: u64,
}

impl BoardController {
    /// Creates a controller over an initial snapshot.
    ///
    /// # Errors
    /// - Returns `InvariantViolation`/`Validation` when `board` is malformed.
    pub fn new(board: Board, users: UserRegistry) -> BoardResult<Self> {
        board.check_invariants()?;
        info!(
            "event=controller_init module=controller status=ok columns={} tasks={} users={}",
            board.columns().len(),
            board.total_task_count(),
            users.len()
        );
        Ok(Self {
            snapshot: Arc::new(board),
            users,
            state: ControllerState::Stable,
            revision: 0,
            observers: BTreeMap::new(),
            next_observer_id: 0,
        })
    }

    /// Creates a controller over an empty board with the default columns.
    pub fn with_default_board(project_id: ProjectId, users: UserRegistry) -> Self {
        Self {
            snapshot: Arc::new(Board::with_default_columns(project_id)),
            users,
            state: ControllerState::Stable,
            revision: 0,
            observers: BTreeMap::new(),
            next_observer_id: 0,
        }
    }

    /// Last committed snapshot.
    pub fn snapshot(&self) -> Arc<Board> {
        Arc::clone(&self.snapshot)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of snapshots committed since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Mutable access for the user collaborator. Does not touch the board.
    pub fn users_mut(&mut self) -> &mut UserRegistry {
        &mut self.users
    }

    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Returns whether an observer was registered under `id`.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Routes one intent to its typed entry point.
    pub fn dispatch(&mut self, intent: Intent) -> IntentOutcome {
        debug!(
            "event=intent_dispatch module=controller status=start intent={}",
            intent.name()
        );
        let before = self.revision;
        let result = match intent {
            Intent::Move(request) => self.submit_move(&request),
            Intent::Filter(query) => return IntentOutcome::Projected(self.submit_filter(&query)),
            Intent::Create { draft, placement } => self
                .submit_create(draft, &placement)
                .map(|_| self.snapshot()),
            Intent::Edit { task_id, edit } => self.submit_edit(task_id, &edit),
            Intent::Delete(task_id) => self.submit_delete(task_id).map(|_| self.snapshot()),
        };

        match result {
            Ok(board) if self.revision == before => IntentOutcome::Unchanged(board),
            Ok(board) => IntentOutcome::Committed(board),
            Err(err) => IntentOutcome::Rejected(err),
        }
    }

    /// Applies a drag-initiated move.
    pub fn submit_move(&mut self, request: &MoveRequest) -> BoardResult<Arc<Board>> {
        self.apply("move", |board, _| move_task(board, request))
    }

    /// Projects the committed snapshot for rendering. Never commits.
    pub fn submit_filter(&self, query: &ViewQuery) -> Arc<Board> {
        project_with(&self.snapshot, query)
    }

    /// Creates a task and places it on the board. Returns its new id.
    pub fn submit_create(
        &mut self,
        draft: TaskDraft,
        placement: &Placement,
    ) -> BoardResult<TaskId> {
        let mut created = None;
        self.apply("create", |board, users| {
            if let Some(assignee) = draft.assignee {
                ensure_assignable(users, assignee)?;
            }
            let task = Task::create(draft)?;
            created = Some(task.id());
            insert_task(board, task, placement)
        })?;
        created.ok_or_else(|| {
            BoardError::InvariantViolation("create committed without a task id".to_string())
        })
    }

    /// Applies a non-positional edit to one task.
    pub fn submit_edit(&mut self, task_id: TaskId, edit: &TaskEdit) -> BoardResult<Arc<Board>> {
        self.apply("edit", |board, users| {
            if let Some(Some(assignee)) = edit.assignee {
                ensure_assignable(users, assignee)?;
            }
            for user in edit.referenced_users() {
                ensure_known(users, user)?;
            }
            let current = board
                .task(task_id)
                .ok_or(BoardError::TaskNotFound(task_id))?;
            let edited = current.edited(edit, now_epoch_ms())?;
            replace_task(board, edited)
        })
    }

    /// Deletes a task. Returns the removed record.
    pub fn submit_delete(&mut self, task_id: TaskId) -> BoardResult<Arc<Task>> {
        let mut removed = None;
        self.apply("delete", |board, _| {
            let (next, task) = remove_task(board, task_id)?;
            removed = Some(task);
            Ok(next)
        })?;
        removed.ok_or(BoardError::TaskNotFound(task_id))
    }

    fn apply(
        &mut self,
        intent: &'static str,
        compute: impl FnOnce(&Arc<Board>, &UserRegistry) -> BoardResult<Arc<Board>>,
    ) -> BoardResult<Arc<Board>> {
        self.state = ControllerState::Applying;
        let result = compute(&self.snapshot, &self.users);
        self.state = ControllerState::Stable;

        let next = match result {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    "event=intent_rejected module=controller status=rejected intent={} kind={:?} error={}",
                    intent,
                    err.kind(),
                    err
                );
                return Err(err);
            }
        };

        if Arc::ptr_eq(&next, &self.snapshot) {
            debug!(
                "event=intent_noop module=controller status=ok intent={} revision={}",
                intent, self.revision
            );
            return Ok(next);
        }

        debug_assert!(
            next.check_invariants().is_ok(),
            "engine produced a board violating invariants"
        );

        self.snapshot = Arc::clone(&next);
        self.revision += 1;
        info!(
            "event=intent_committed module=controller status=ok intent={} revision={} tasks={}",
            intent,
            self.revision,
            next.total_task_count()
        );

        for observer in self.observers.values() {
            observer.on_snapshot(&next, self.revision);
        }
        Ok(next)
    }
}

fn ensure_known(users: &UserRegistry, id: UserId) -> BoardResult<()> {
    if users.contains(id) {
        Ok(())
    } else {
        Err(BoardError::UserNotFound(id))
    }
}

fn ensure_assignable(users: &UserRegistry, id: UserId) -> BoardResult<()> {
    match users.get(id) {
        None => Err(BoardError::UserNotFound(id)),
        Some(user) if !user.is_active => Err(BoardError::UserInactive(id)),
        Some(_) => Ok(()),
    }
}
