//! View renderer: pure frame derivation plus surface reconciliation.
//!
//! # Responsibility
//! - Project `(collection, filter)` into an ordered `Frame` view model.
//! - Push frames and transient notifications to a `Surface`.
//!
//! # Invariants
//! - The renderer never mutates the task collection.
//! - Row controls are bound by task id, not by row position.
//! - Text reaching a markup surface is escaped by that surface.

pub mod html;
pub mod notify;

use crate::app::command::Command;
use crate::model::notice::{Notice, NoticeKind};
use crate::model::task::{Counts, Filter, Task, TaskId};
use crate::repo::slot_repo::SlotStore;
use crate::service::task_store::TaskStore;
use notify::{Notification, NotificationCenter, NotificationEvent, NotificationId};
use std::time::{Duration, Instant};

/// Returns tasks matching `filter`, preserving collection order.
pub fn filtered_view(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// One materialized list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Command emitted by the row's checkbox.
    pub toggle: Command,
    /// Command emitted by the row's delete button.
    pub delete: Command,
}

impl RowView {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            toggle: Command::Toggle(task.id),
            delete: Command::Delete(task.id),
        }
    }
}

/// Complete view model for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub filter: Filter,
    pub rows: Vec<RowView>,
    pub list_visible: bool,
    pub placeholder_visible: bool,
    /// Counters always reflect the full collection, not the filtered rows.
    pub counts: Counts,
    pub clear_completed_enabled: bool,
}

impl Frame {
    pub fn build(tasks: &[Task], filter: Filter) -> Self {
        let rows: Vec<RowView> = filtered_view(tasks, filter)
            .into_iter()
            .map(RowView::from_task)
            .collect();
        let counts = Counts::of(tasks);
        let empty = rows.is_empty();
        Self {
            filter,
            rows,
            list_visible: !empty,
            placeholder_visible: empty,
            counts,
            clear_completed_enabled: counts.completed > 0,
        }
    }
}

/// Presentation surface driven by the renderer.
pub trait Surface {
    /// Replaces the list, placeholder, counters and clear action state.
    fn present(&mut self, frame: &Frame);
    /// Shows a new notification on top of any already visible.
    fn show_notification(&mut self, notification: &Notification);
    /// Starts the exit phase of a notification.
    fn dismiss_notification(&mut self, _id: NotificationId) {}
    /// Removes a notification; unknown ids must be ignored.
    fn remove_notification(&mut self, id: NotificationId);
}

/// Timings for self-dismissing notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    pub visible_for: Duration,
    pub exit_for: Duration,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            visible_for: Duration::from_millis(3000),
            exit_for: Duration::from_millis(300),
        }
    }
}

/// Derives frames from a store and reconciles them onto a surface.
pub struct ViewRenderer<V: Surface> {
    surface: V,
    notifications: NotificationCenter,
}

impl<V: Surface> ViewRenderer<V> {
    pub fn new(surface: V) -> Self {
        Self::with_timings(surface, NotificationTimings::default())
    }

    pub fn with_timings(surface: V, timings: NotificationTimings) -> Self {
        Self {
            surface,
            notifications: NotificationCenter::new(timings),
        }
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Rebuilds the frame from the store and presents it.
    pub fn render<S: SlotStore>(&mut self, store: &TaskStore<S>) -> Frame {
        let frame = Frame::build(store.tasks(), store.filter());
        self.surface.present(&frame);
        frame
    }

    /// Shows a self-dismissing notification.
    pub fn notify(&mut self, message: &str, kind: NoticeKind, now: Instant) -> NotificationId {
        let notification = self.notifications.push(message, kind, now);
        self.surface.show_notification(&notification);
        notification.id
    }

    pub fn notify_all(&mut self, notices: Vec<Notice>, now: Instant) {
        for notice in notices {
            self.notify(&notice.message, notice.kind, now);
        }
    }

    /// Runs notification timers due at `now`.
    pub fn fire_due(&mut self, now: Instant) {
        for event in self.notifications.fire_due(now) {
            match event {
                NotificationEvent::Dismissing(id) => self.surface.dismiss_notification(id),
                NotificationEvent::Removed(id) => self.surface.remove_notification(id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{filtered_view, Frame};
    use crate::app::command::Command;
    use crate::model::task::{Filter, Task, TaskId};

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id: TaskId(id),
            text: format!("t{id}"),
            completed,
            created_at: "2026-10-19T08:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn filtered_view_preserves_order_per_filter() {
        let tasks = vec![task(1, true), task(2, false), task(3, true), task(4, false)];
        let ids = |filter| {
            filtered_view(&tasks, filter)
                .iter()
                .map(|task| task.id.get())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Filter::All), vec![1, 2, 3, 4]);
        assert_eq!(ids(Filter::Active), vec![2, 4]);
        assert_eq!(ids(Filter::Completed), vec![1, 3]);
    }

    #[test]
    fn empty_projection_shows_placeholder_but_keeps_counts() {
        let tasks = vec![task(1, false)];
        let frame = Frame::build(&tasks, Filter::Completed);
        assert!(frame.placeholder_visible);
        assert!(!frame.list_visible);
        assert_eq!(frame.counts.total, 1);
        assert!(!frame.clear_completed_enabled);
    }

    #[test]
    fn rows_bind_commands_by_id() {
        let tasks = vec![task(9, false)];
        let frame = Frame::build(&tasks, Filter::All);
        assert_eq!(frame.rows[0].toggle, Command::Toggle(TaskId(9)));
        assert_eq!(frame.rows[0].delete, Command::Delete(TaskId(9)));
    }
}
