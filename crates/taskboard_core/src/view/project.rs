//! Search/filter projection over a board snapshot.
//!
//! # Invariants
//! - Projection never mutates the input board or any task.
//! - Filtered tasks keep their relative order within each column.
//! - An empty query returns the input snapshot itself.

use crate::model::board::Board;
use crate::model::task::{Priority, Task};
use crate::model::user::UserId;
use log::warn;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// Read-only filter over board tasks. All set predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against title or description.
    /// Matched verbatim, surrounding whitespace included.
    pub text: String,
    pub priority: Option<Priority>,
    pub assignee: Option<UserId>,
    pub tag: Option<String>,
}

impl ViewQuery {
    /// Text-only query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether this query keeps every task.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.tag.as_deref().map_or(true, |tag| tag.trim().is_empty())
    }
}

/// Projects `board` through a text-only query.
pub fn project(board: &Arc<Board>, query: &str) -> Arc<Board> {
    project_with(board, &ViewQuery::new(query))
}

/// Projects `board` through `query`.
///
/// Columns whose tasks all match are shared with the input snapshot.
pub fn project_with(board: &Arc<Board>, query: &ViewQuery) -> Arc<Board> {
    if query.is_empty() {
        return Arc::clone(board);
    }

    let matcher = TextMatcher::new(&query.text);
    let tag = query
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty());

    let columns = board
        .columns()
        .iter()
        .map(|column| {
            let kept = column
                .tasks()
                .iter()
                .filter(|task| {
                    matcher.matches(task)
                        && query.priority.map_or(true, |p| task.priority() == p)
                        && query.assignee.map_or(true, |a| task.assignee() == Some(a))
                        && tag.map_or(true, |t| task.tags().contains(t))
                })
                .cloned()
                .collect::<Vec<_>>();
            if kept.len() == column.len() {
                Arc::clone(column)
            } else {
                Arc::new(column.with_sequence(kept))
            }
        })
        .collect();

    Arc::new(Board::from_shared(board.project_id(), columns))
}

enum TextMatcher {
    Any,
    Pattern(Regex),
    Lowercase(String),
}

impl TextMatcher {
    fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::Any;
        }
        match RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Self::Pattern(pattern),
            Err(err) => {
                // Escaped literals only fail on size limits.
                warn!(
                    "event=view_pattern_fallback module=view status=degraded query_len={} error={}",
                    text.len(),
                    err
                );
                Self::Lowercase(text.to_lowercase())
            }
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(pattern) => {
                pattern.is_match(task.title()) || pattern.is_match(task.description())
            }
            Self::Lowercase(needle) => {
                task.title().to_lowercase().contains(needle.as_str())
                    || task.description().to_lowercase().contains(needle.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{project, project_with, ViewQuery};
    use crate::model::board::Board;
    use crate::model::column::Column;
    use crate::model::task::{Priority, Task, TaskDraft, TaskStatus};
    use std::sync::Arc;
    use uuid::Uuid;

    fn board() -> Arc<Board> {
        let project = Uuid::new_v4();
        let todo = vec![
            Task::create(TaskDraft::new(project, "Fix (urgent) bug").priority(Priority::High))
                .unwrap(),
            Task::create(TaskDraft::new(project, "Write docs").tag("docs")).unwrap(),
        ];
        Arc::new(
            Board::new(
                project,
                vec![
                    Column::for_status(TaskStatus::Todo).with_tasks(todo),
                    Column::for_status(TaskStatus::Done),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn empty_query_is_identity() {
        let board = board();
        assert!(Arc::ptr_eq(&project(&board, ""), &board));
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_query() {
        let project_id = Uuid::new_v4();
        let todo = ["box", "x y"]
            .into_iter()
            .map(|title| Task::create(TaskDraft::new(project_id, title)).unwrap())
            .collect::<Vec<_>>();
        let board = Arc::new(
            Board::new(
                project_id,
                vec![Column::for_status(TaskStatus::Todo).with_tasks(todo)],
            )
            .unwrap(),
        );

        let titles = |view: &Board| {
            view.columns()[0]
                .tasks()
                .iter()
                .map(|task| task.title().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(&*project(&board, "x ")), ["x y"]);
        assert_eq!(titles(&*project(&board, " ")), ["x y"]);
        assert!(!Arc::ptr_eq(&project(&board, " "), &board));
    }

    #[test]
    fn regex_metacharacters_match_literally() {
        let board = board();
        let view = project(&board, "(URGENT)");
        assert_eq!(view.total_task_count(), 1);
        assert_eq!(board.total_task_count(), 2);
    }

    #[test]
    fn predicates_combine_and_share_untouched_columns() {
        let board = board();
        let query = ViewQuery {
            tag: Some("docs".to_string()),
            ..ViewQuery::default()
        };
        let view = project_with(&board, &query);
        assert_eq!(view.total_task_count(), 1);
        assert!(Arc::ptr_eq(&view.columns()[1], &board.columns()[1]));

        let query = ViewQuery {
            text: "docs".to_string(),
            priority: Some(Priority::High),
            ..ViewQuery::default()
        };
        assert_eq!(project_with(&board, &query).total_task_count(), 0);
    }
}
