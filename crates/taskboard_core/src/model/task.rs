//! Task domain model.
//!
//! # Responsibility
//! - Define the task record rendered as one card on the board.
//! - Enforce required fields at construction and edit time.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank; `project_id` is never nil.
//! - `status` has no public setter. Only the ordering engine writes it.
//! - `assignee`, `watchers` and comment authors are weak `UserId` references.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;
/// Identifier of the project a task belongs to.
pub type ProjectId = Uuid;
/// Identifier of one comment on a task.
pub type CommentId = Uuid;
/// Identifier of one attachment on a task.
pub type AttachmentId = Uuid;

/// Workflow state of a task. Each board column is bound to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// All statuses in board display order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    /// Human-readable label used for column headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// One discussion entry on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub mentions: Vec<UserId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    pub fn new(author: UserId, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            author,
            created_at: now_epoch_ms(),
            mentions: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Coarse media classification for attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Document,
    Video,
    Other,
}

/// File reference attached to a task. The file itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub url: String,
    pub kind: AttachmentKind,
    /// Size in bytes.
    pub size: u64,
    pub uploaded_by: UserId,
    /// Unix epoch milliseconds.
    pub uploaded_at: i64,
}

/// Validation failures for task construction and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trim.
    BlankTitle,
    /// Project reference is the nil UUID.
    MissingProject,
    /// Task id is the nil UUID.
    NilId,
    /// `updated_at` precedes `created_at`.
    UpdatedBeforeCreated { updated: i64, created: i64 },
    /// Tag is empty after trim.
    BlankTag,
    /// Comment body is empty after trim.
    BlankComment,
    /// Attachment name is empty after trim.
    BlankAttachmentName,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::MissingProject => write!(f, "task must reference a project"),
            Self::NilId => write!(f, "task id must not be nil"),
            Self::UpdatedBeforeCreated { updated, created } => write!(
                f,
                "task updated_at ({updated}) must not precede created_at ({created})"
            ),
            Self::BlankTag => write!(f, "tag must not be blank"),
            Self::BlankComment => write!(f, "comment must not be blank"),
            Self::BlankAttachmentName => write!(f, "attachment name must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Input for creating a task.
///
/// Mirrors the "add task" form: only `title` and `project_id` are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<UserId>,
    pub due_date: Option<i64>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with `Todo` status and `Medium` priority.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: None,
            due_date: None,
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn due_date(mut self, due_epoch_ms: i64) -> Self {
        self.due_date = Some(due_epoch_ms);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Partial update applied by the task edit collaborator.
///
/// `None` leaves a field untouched. There is deliberately no status field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the assignee.
    pub assignee: Option<Option<UserId>>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<i64>>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    pub add_watchers: Vec<UserId>,
    pub remove_watchers: Vec<UserId>,
    pub add_comment: Option<Comment>,
    pub add_attachment: Option<Attachment>,
}

impl TaskEdit {
    /// Returns every user id this edit introduces as a new reference.
    pub fn referenced_users(&self) -> Vec<UserId> {
        let mut users = Vec::new();
        if let Some(Some(assignee)) = self.assignee {
            users.push(assignee);
        }
        users.extend(self.add_watchers.iter().copied());
        if let Some(comment) = &self.add_comment {
            users.push(comment.author);
            users.extend(comment.mentions.iter().copied());
            users.extend(comment.attachments.iter().map(|a| a.uploaded_by));
        }
        if let Some(attachment) = &self.add_attachment {
            users.push(attachment.uploaded_by);
        }
        users
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: Priority,
    assignee: Option<UserId>,
    watchers: Vec<UserId>,
    due_date: Option<i64>,
    created_at: i64,
    updated_at: i64,
    tags: BTreeSet<String>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
}

impl Task {
    /// Creates a task with a generated id and current timestamps.
    ///
    /// # Errors
    /// - Returns [`TaskValidationError`] when required fields are missing.
    pub fn create(draft: TaskDraft) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), draft, now_epoch_ms())
    }

    /// Creates a task with a caller-provided id and creation time.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: TaskId,
        draft: TaskDraft,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let tags = normalize_tags(draft.tags)?;
        let task = Self {
            id,
            project_id: draft.project_id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee,
            watchers: Vec::new(),
            due_date: draft.due_date,
            created_at,
            updated_at: created_at,
            tags,
            comments: Vec::new(),
            attachments: Vec::new(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Validates field-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.project_id.is_nil() {
            return Err(TaskValidationError::MissingProject);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::UpdatedBeforeCreated {
                updated: self.updated_at,
                created: self.created_at,
            });
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(TaskValidationError::BlankTag);
        }
        Ok(())
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    pub fn watchers(&self) -> &[UserId] {
        &self.watchers
    }

    pub fn due_date(&self) -> Option<i64> {
        self.due_date
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns whether the task is past due at `now_ms` and not yet done.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now_ms)
    }

    /// Returns a copy carrying `status`. Ordering engine only.
    pub(crate) fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns a copy with `edit` applied and `updated_at` bumped to `now_ms`.
    ///
    /// The receiver is left untouched; the edit is all-or-nothing.
    pub(crate) fn edited(&self, edit: &TaskEdit, now_ms: i64) -> Result<Self, TaskValidationError> {
        let mut next = self.clone();

        if let Some(title) = &edit.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = &edit.description {
            next.description = description.clone();
        }
        if let Some(priority) = edit.priority {
            next.priority = priority;
        }
        if let Some(assignee) = edit.assignee {
            next.assignee = assignee;
        }
        if let Some(due_date) = edit.due_date {
            next.due_date = due_date;
        }

        for tag in normalize_tags(edit.add_tags.clone())? {
            next.tags.insert(tag);
        }
        for tag in &edit.remove_tags {
            next.tags.remove(tag.trim());
        }

        for watcher in &edit.add_watchers {
            if !next.watchers.contains(watcher) {
                next.watchers.push(*watcher);
            }
        }
        next.watchers
            .retain(|watcher| !edit.remove_watchers.contains(watcher));

        if let Some(comment) = &edit.add_comment {
            if comment.content.trim().is_empty() {
                return Err(TaskValidationError::BlankComment);
            }
            if comment
                .attachments
                .iter()
                .any(|attachment| attachment.name.trim().is_empty())
            {
                return Err(TaskValidationError::BlankAttachmentName);
            }
            next.comments.push(comment.clone());
        }
        if let Some(attachment) = &edit.add_attachment {
            if attachment.name.trim().is_empty() {
                return Err(TaskValidationError::BlankAttachmentName);
            }
            next.attachments.push(attachment.clone());
        }

        next.updated_at = now_ms.max(self.updated_at);
        next.validate()?;
        Ok(next)
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn normalize_tags(tags: Vec<String>) -> Result<BTreeSet<String>, TaskValidationError> {
    let mut normalized = BTreeSet::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::BlankTag);
        }
        normalized.insert(trimmed.to_string());
    }
    Ok(normalized)
}
