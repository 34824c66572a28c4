//! Task store: the authoritative in-memory collection and its commands.
//!
//! # Responsibility
//! - Own the ordered task collection and the session-only active filter.
//! - Apply add/toggle/delete/clear commands and persist after each one.
//! - Queue user-facing notices for the view layer.
//!
//! # Invariants
//! - Collection order is insertion order; ids are unique and increasing.
//! - Once ids are exhausted, `add` refuses with an error notice instead of
//!   reusing an id.
//! - After every successful mutation the stored slot equals the collection.
//! - Save failures keep the in-memory collection and queue an error notice.
//! - The filter is never persisted.

use crate::model::notice::Notice;
use crate::model::task::{Counts, Filter, Task, TaskId};
use crate::repo::slot_repo::SlotStore;
use crate::service::clock::{iso_timestamp, Clock, IdSequence, SystemClock};
use crate::service::confirm::Confirm;
use crate::service::persistence::{TaskPersistence, SAVE_FAILED_MESSAGE};
use log::{debug, error, info};

pub const TASK_ADDED_MESSAGE: &str = "Task added";
pub const TASK_DELETED_MESSAGE: &str = "Task deleted";
pub const COMPLETED_CLEARED_MESSAGE: &str = "Completed tasks cleared";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add task";

/// Re-render signal returned by every store command.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEffect {
    /// State changed; the view must be re-derived.
    Render,
    /// Command was a no-op.
    Unchanged,
}

impl StoreEffect {
    pub fn needs_render(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Owned task collection with persistence and confirmation collaborators.
pub struct TaskStore<S: SlotStore> {
    tasks: Vec<Task>,
    filter: Filter,
    ids: IdSequence,
    persistence: TaskPersistence<S>,
    clock: Box<dyn Clock>,
    confirm: Box<dyn Confirm>,
    notices: Vec<Notice>,
}

impl<S: SlotStore> TaskStore<S> {
    /// Loads the stored collection using the system clock.
    ///
    /// Load failures reset to an empty collection and queue an error notice.
    pub fn open(persistence: TaskPersistence<S>, confirm: impl Confirm + 'static) -> Self {
        Self::open_with_clock(persistence, confirm, SystemClock)
    }

    pub fn open_with_clock(
        persistence: TaskPersistence<S>,
        confirm: impl Confirm + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let loaded = persistence.load();
        let notices = loaded.notice.into_iter().collect();
        Self {
            ids: IdSequence::after(&loaded.tasks),
            tasks: loaded.tasks,
            filter: Filter::default(),
            persistence,
            clock: Box::new(clock),
            confirm: Box::new(confirm),
            notices,
        }
    }

    /// Full collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn persistence(&self) -> &TaskPersistence<S> {
        &self.persistence
    }

    /// Derives `{total, active, completed}` from the collection.
    pub fn counts(&self) -> Counts {
        Counts::of(&self.tasks)
    }

    /// Appends a new open task; blank text is silently ignored.
    pub fn add(&mut self, text: &str) -> StoreEffect {
        let text = text.trim();
        if text.is_empty() {
            debug!("event=task_add module=store status=skipped reason=empty_text");
            return StoreEffect::Unchanged;
        }

        let now = self.clock.now();
        let Some(id) = self.ids.next(now.timestamp_millis()) else {
            error!("event=task_add module=store status=error error_code=id_exhausted");
            self.notices.push(Notice::error(ADD_FAILED_MESSAGE));
            return StoreEffect::Unchanged;
        };
        let task = Task {
            id,
            text: text.to_string(),
            completed: false,
            created_at: iso_timestamp(now),
        };
        self.tasks.push(task);
        info!("event=task_add module=store status=ok id={id}");

        self.persist();
        self.notices.push(Notice::success(TASK_ADDED_MESSAGE));
        StoreEffect::Render
    }

    /// Flips completion for `id`; an absent id only rewrites the slot.
    pub fn toggle(&mut self, id: TaskId) -> StoreEffect {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.toggle();
                info!(
                    "event=task_toggle module=store status=ok id={id} completed={}",
                    task.completed
                );
            }
            None => debug!("event=task_toggle module=store status=skipped reason=not_found id={id}"),
        }

        self.persist();
        StoreEffect::Render
    }

    /// Removes `id` after the user confirms a prompt naming the task text.
    pub fn delete(&mut self, id: TaskId) -> StoreEffect {
        let Some(text) = self.get(id).map(|task| task.text.clone()) else {
            debug!("event=task_delete module=store status=skipped reason=not_found id={id}");
            return StoreEffect::Unchanged;
        };

        if !self.confirm.confirm(&format!("Delete \"{text}\"?")) {
            debug!("event=task_delete module=store status=skipped reason=declined id={id}");
            return StoreEffect::Unchanged;
        }

        self.tasks.retain(|task| task.id != id);
        info!("event=task_delete module=store status=ok id={id}");

        self.persist();
        self.notices.push(Notice::success(TASK_DELETED_MESSAGE));
        StoreEffect::Render
    }

    /// Removes every completed task after confirmation showing the count.
    pub fn clear_completed(&mut self) -> StoreEffect {
        let completed = self.counts().completed;
        if completed == 0 {
            return StoreEffect::Unchanged;
        }

        if !self
            .confirm
            .confirm(&format!("Delete {completed} completed task(s)?"))
        {
            debug!("event=tasks_clear module=store status=skipped reason=declined");
            return StoreEffect::Unchanged;
        }

        self.tasks.retain(|task| !task.completed);
        info!("event=tasks_clear module=store status=ok removed={completed}");

        self.persist();
        self.notices.push(Notice::success(COMPLETED_CLEARED_MESSAGE));
        StoreEffect::Render
    }

    /// Replaces the session-only filter.
    pub fn set_filter(&mut self, filter: Filter) -> StoreEffect {
        self.filter = filter;
        debug!("event=filter_set module=store status=ok filter={filter}");
        StoreEffect::Render
    }

    /// Hands queued notices to the caller, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn persist(&mut self) {
        if self.persistence.save(&self.tasks).is_err() {
            self.notices.push(Notice::error(SAVE_FAILED_MESSAGE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreEffect, TaskStore};
    use crate::model::task::TaskId;
    use crate::repo::slot_repo::MemorySlotStore;
    use crate::service::confirm::AutoConfirm;
    use crate::service::persistence::TaskPersistence;

    #[test]
    fn blank_add_is_unchanged_and_queues_nothing() {
        let mut store = TaskStore::open(TaskPersistence::new(MemorySlotStore::new()), AutoConfirm(true));
        assert_eq!(store.add(" \t "), StoreEffect::Unchanged);
        assert!(store.drain_notices().is_empty());
        assert_eq!(store.counts().total, 0);
    }

    #[test]
    fn clear_without_completed_skips_confirmation() {
        let mut store = TaskStore::open(
            TaskPersistence::new(MemorySlotStore::new()),
            |_: &str| -> bool { panic!("confirmation must not be requested") },
        );
        let _ = store.add("open task");
        assert_eq!(store.clear_completed(), StoreEffect::Unchanged);
    }

    #[test]
    fn toggle_missing_id_keeps_collection() {
        let mut store = TaskStore::open(TaskPersistence::new(MemorySlotStore::new()), AutoConfirm(true));
        let _ = store.add("a");
        let before = store.tasks().to_vec();
        let _ = store.toggle(TaskId(1));
        assert_eq!(store.tasks(), before.as_slice());
    }
}
