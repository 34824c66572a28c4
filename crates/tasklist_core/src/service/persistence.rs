//! Persistence adapter between the task collection and a key-value slot.
//!
//! # Responsibility
//! - Encode the full collection as a JSON array under `STORAGE_KEY`.
//! - Decode it at startup, recovering from absent or corrupt values.
//!
//! # Invariants
//! - `load` never fails: absent values yield an empty collection, corrupt
//!   values yield an empty collection plus an error notice.
//! - `save` failures are logged and returned, never panicked on.
//! - Log lines carry error codes and positions only, never task text.

use crate::model::notice::Notice;
use crate::model::task::{validate_collection, Task, TaskValidationError};
use crate::repo::slot_repo::{RepoError, SlotStore};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed slot key holding the serialized collection.
pub const STORAGE_KEY: &str = "todos";
/// Notice shown when the collection cannot be written.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save tasks";
/// Notice shown when the stored collection cannot be read.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load tasks";

/// Persistence failure for one save or load attempt.
#[derive(Debug)]
pub enum PersistError {
    Storage(RepoError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    Invalid(TaskValidationError),
}

impl PersistError {
    /// Stable metadata code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(RepoError::QuotaExceeded { .. }) => "quota_exceeded",
            Self::Storage(_) => "storage_failed",
            Self::Encode(_) => "encode_failed",
            Self::Decode(_) => "decode_failed",
            Self::Invalid(_) => "invalid_task",
        }
    }
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Decode(err) => write!(f, "failed to decode stored tasks: {err}"),
            Self::Invalid(err) => write!(f, "invalid stored task: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<TaskValidationError> for PersistError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Result of a best-effort startup load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    /// Set when stored data had to be discarded.
    pub notice: Option<Notice>,
}

/// Stateless read/write pair over one slot store.
pub struct TaskPersistence<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> TaskPersistence<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Writes the whole collection under `STORAGE_KEY`.
    ///
    /// # Errors
    /// - `Encode` when serialization fails.
    /// - `Storage` when the slot write fails (quota, disk, disabled storage).
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistError> {
        let result = serde_json::to_string(tasks)
            .map_err(PersistError::Encode)
            .and_then(|encoded| {
                self.slots
                    .write_slot(STORAGE_KEY, &encoded)
                    .map_err(PersistError::from)
            });

        match &result {
            Ok(()) => info!(
                "event=tasks_save module=persistence status=ok count={}",
                tasks.len()
            ),
            Err(err) => error!(
                "event=tasks_save module=persistence status=error error_code={} count={}",
                err.code(),
                tasks.len()
            ),
        }
        result
    }

    /// Reads and validates the stored collection without recovery.
    ///
    /// Returns an empty collection for an absent or empty value.
    pub fn try_load(&self) -> Result<Vec<Task>, PersistError> {
        let Some(raw) = self.slots.read_slot(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_str(&raw).map_err(PersistError::Decode)?;
        validate_collection(&tasks)?;
        Ok(tasks)
    }

    /// Loads the stored collection, resetting to empty on any failure.
    pub fn load(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=persistence status=ok count={}",
                    tasks.len()
                );
                LoadOutcome {
                    tasks,
                    notice: None,
                }
            }
            Err(err) => {
                match &err {
                    PersistError::Decode(decode) => error!(
                        "event=tasks_load module=persistence status=error error_code={} line={} column={}",
                        err.code(),
                        decode.line(),
                        decode.column()
                    ),
                    _ => error!(
                        "event=tasks_load module=persistence status=error error_code={}",
                        err.code()
                    ),
                }
                LoadOutcome {
                    tasks: Vec::new(),
                    notice: Some(Notice::error(LOAD_FAILED_MESSAGE)),
                }
            }
        }
    }
}
