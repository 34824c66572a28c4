//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its persisted wire shape.
//! - Define the `Filter` selector and `Counts` projection.
//!
//! # Invariants
//! - `id` is positive and never reused within one collection.
//! - `text` is non-empty after trimming.
//! - `id`, `text` and `created_at` are immutable after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable task identifier derived from the creation timestamp (epoch ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self)
    }
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task text is empty after trimming.
    EmptyText,
    /// Task id must be a positive integer.
    NonPositiveId(i64),
    /// Two tasks in one collection share the same id.
    DuplicateId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::NonPositiveId(id) => write!(f, "task id must be positive, got {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id {id}"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do entry.
///
/// Field names on the wire follow the stored JSON shape
/// `{id, text, completed, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// ISO-8601 UTC timestamp, e.g. `2026-10-19T08:30:00.123Z`.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Task {
    /// Creates an open task, trimming surrounding whitespace from `text`.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank.
    /// - `NonPositiveId` when `id` is zero or negative.
    pub fn new(
        id: TaskId,
        text: &str,
        created_at: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            text: text.trim().to_string(),
            completed: false,
            created_at: created_at.into(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Validates record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.0 <= 0 {
            return Err(TaskValidationError::NonPositiveId(self.id.0));
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Validates every task and enforces id uniqueness across the collection.
pub fn validate_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id) {
            return Err(TaskValidationError::DuplicateId(task.id));
        }
    }
    Ok(())
}

/// Active subset selector applied at render time only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Stable string id used by commands and markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown filter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for UnknownFilter {}

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Counter projection over the full collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Counts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_collection, Counts, Filter, Task, TaskId, TaskValidationError};

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id: TaskId(id),
            text: format!("task {id}"),
            completed,
            created_at: "2026-10-19T08:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn new_trims_text_and_rejects_blank() {
        let created = Task::new(TaskId(1), "  Buy milk ", "t").unwrap();
        assert_eq!(created.text, "Buy milk");
        assert!(!created.completed);

        assert_eq!(
            Task::new(TaskId(1), "   ", "t").unwrap_err(),
            TaskValidationError::EmptyText
        );
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!(" Active ".parse::<Filter>().unwrap(), Filter::Active);
        assert!("done".parse::<Filter>().is_err());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn counts_split_active_and_completed() {
        let tasks = vec![task(1, false), task(2, true), task(3, true)];
        assert_eq!(
            Counts::of(&tasks),
            Counts {
                total: 3,
                active: 1,
                completed: 2
            }
        );
    }

    #[test]
    fn collection_rejects_duplicate_ids() {
        let tasks = vec![task(7, false), task(7, true)];
        assert_eq!(
            validate_collection(&tasks).unwrap_err(),
            TaskValidationError::DuplicateId(TaskId(7))
        );
    }
}
