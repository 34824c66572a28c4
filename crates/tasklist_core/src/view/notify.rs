//! Self-dismissing notification bookkeeping.
//!
//! Each notification schedules two one-shot timers: begin-dismiss after the
//! visible period, then removal after the exit period. Timers cannot be
//! cancelled; a timer whose notification is already gone does nothing.
//! Notifications stack without dedup or queueing.

use super::NotificationTimings;
use crate::model::notice::NoticeKind;
use std::time::Instant;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NoticeKind,
    pub phase: NotificationPhase,
}

/// Surface-visible effect of a fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    Dismissing(NotificationId),
    Removed(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    BeginDismiss,
    Remove,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: Instant,
    id: NotificationId,
    action: TimerAction,
}

#[derive(Debug)]
pub struct NotificationCenter {
    timings: NotificationTimings,
    next_id: NotificationId,
    active: Vec<Notification>,
    timers: Vec<Timer>,
}

impl NotificationCenter {
    pub fn new(timings: NotificationTimings) -> Self {
        Self {
            timings,
            next_id: 1,
            active: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// Notifications currently on screen, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Earliest pending timer deadline.
    pub fn next_due(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Registers a notification and schedules its dismiss timer.
    pub fn push(&mut self, message: &str, kind: NoticeKind, now: Instant) -> Notification {
        let id = self.next_id;
        self.next_id += 1;
        let notification = Notification {
            id,
            message: message.to_string(),
            kind,
            phase: NotificationPhase::Visible,
        };
        self.active.push(notification.clone());
        self.timers.push(Timer {
            due: now + self.timings.visible_for,
            id,
            action: TimerAction::BeginDismiss,
        });
        notification
    }

    /// Removes a notification outside the timer flow. Pending timers stay
    /// scheduled and later no-op.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|notification| notification.id != id);
        self.active.len() != before
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<NotificationEvent> {
        let mut events = Vec::new();
        while let Some(index) = self.next_due_index(now) {
            let timer = self.timers.swap_remove(index);
            match timer.action {
                TimerAction::BeginDismiss => {
                    self.timers.push(Timer {
                        due: timer.due + self.timings.exit_for,
                        id: timer.id,
                        action: TimerAction::Remove,
                    });
                    if let Some(notification) =
                        self.active.iter_mut().find(|n| n.id == timer.id)
                    {
                        notification.phase = NotificationPhase::Leaving;
                        events.push(NotificationEvent::Dismissing(timer.id));
                    }
                }
                TimerAction::Remove => {
                    if self.remove(timer.id) {
                        events.push(NotificationEvent::Removed(timer.id));
                    }
                }
            }
        }
        events
    }

    fn next_due_index(&self, now: Instant) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= now)
            .min_by_key(|(_, timer)| timer.due)
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationCenter, NotificationEvent, NotificationPhase};
    use crate::model::notice::NoticeKind;
    use crate::view::NotificationTimings;
    use std::time::{Duration, Instant};

    #[test]
    fn notification_dismisses_then_removes() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(NotificationTimings::default());
        let shown = center.push("Task added", NoticeKind::Success, start);

        assert!(center.fire_due(start + Duration::from_millis(2999)).is_empty());
        assert_eq!(
            center.fire_due(start + Duration::from_millis(3000)),
            vec![NotificationEvent::Dismissing(shown.id)]
        );
        assert_eq!(center.active()[0].phase, NotificationPhase::Leaving);
        assert_eq!(
            center.fire_due(start + Duration::from_millis(3300)),
            vec![NotificationEvent::Removed(shown.id)]
        );
        assert!(center.active().is_empty());
        assert_eq!(center.next_due(), None);
    }

    #[test]
    fn late_tick_fires_both_phases_in_order() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(NotificationTimings::default());
        let shown = center.push("x", NoticeKind::Error, start);
        assert_eq!(
            center.fire_due(start + Duration::from_secs(10)),
            vec![
                NotificationEvent::Dismissing(shown.id),
                NotificationEvent::Removed(shown.id)
            ]
        );
    }

    #[test]
    fn overlapping_notifications_stack_and_early_removal_is_safe() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(NotificationTimings::default());
        let first = center.push("a", NoticeKind::Success, start);
        let second = center.push("a", NoticeKind::Success, start);
        assert_eq!(center.active().len(), 2);
        assert_ne!(first.id, second.id);

        assert!(center.remove(first.id));
        let events = center.fire_due(start + Duration::from_secs(4));
        assert_eq!(
            events,
            vec![
                NotificationEvent::Dismissing(second.id),
                NotificationEvent::Removed(second.id)
            ]
        );
    }
}
