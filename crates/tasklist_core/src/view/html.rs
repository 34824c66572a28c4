//! HTML markup surface.
//!
//! # Invariants
//! - Every piece of task or notification text passes through `escape_html`
//!   before it is placed in markup.

use super::notify::{Notification, NotificationId, NotificationPhase};
use super::{Frame, Surface};
use crate::model::notice::NoticeKind;
use crate::model::task::Filter;
use std::fmt::Write;

const SUCCESS_COLOR: &str = "#10b981";
const ERROR_COLOR: &str = "#ef4444";

/// Escapes markup-significant characters so text renders literally.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders one frame as filter, list, placeholder and counter markup.
pub fn render_frame(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"filters\">");
    for filter in Filter::ALL {
        let class = if filter == frame.filter {
            "filter-btn active"
        } else {
            "filter-btn"
        };
        let _ = write!(
            out,
            r#"<button class="{class}" data-filter="{filter}">{filter}</button>"#
        );
    }
    out.push_str("</div>\n");

    let list_display = if frame.list_visible { "flex" } else { "none" };
    let _ = writeln!(out, r#"<ul id="todo-list" style="display: {list_display}">"#);
    for row in &frame.rows {
        let item_class = if row.completed {
            "todo-item completed"
        } else {
            "todo-item"
        };
        let checked = if row.completed { " checked" } else { "" };
        let _ = writeln!(
            out,
            r#"  <li class="{item_class}" data-id="{id}"><input type="checkbox" class="todo-checkbox"{checked} aria-label="Mark as completed"><span class="todo-text">{text}</span><button class="btn-delete" aria-label="Delete task">&times;</button></li>"#,
            id = row.id,
            text = escape_html(&row.text),
        );
    }
    out.push_str("</ul>\n");

    let placeholder_class = if frame.placeholder_visible {
        "empty-state show"
    } else {
        "empty-state"
    };
    let _ = writeln!(
        out,
        r#"<div id="empty-state" class="{placeholder_class}">No tasks</div>"#
    );
    let _ = writeln!(
        out,
        r#"<span id="count-all">{}</span><span id="count-active">{}</span><span id="count-completed">{}</span>"#,
        frame.counts.total, frame.counts.active, frame.counts.completed
    );
    let disabled = if frame.clear_completed_enabled {
        ""
    } else {
        " disabled"
    };
    let _ = writeln!(
        out,
        r#"<button id="clear-completed"{disabled}>Clear completed</button>"#
    );
    out
}

fn render_notification(notification: &Notification) -> String {
    let color = match notification.kind {
        NoticeKind::Success => SUCCESS_COLOR,
        NoticeKind::Error => ERROR_COLOR,
    };
    let class = match notification.phase {
        NotificationPhase::Visible => "notification",
        NotificationPhase::Leaving => "notification leaving",
    };
    format!(
        r#"<div class="{class}" data-id="{}" style="background: {color}">{}</div>"#,
        notification.id,
        escape_html(&notification.message)
    )
}

/// Surface that keeps the latest rendered markup in memory.
#[derive(Debug, Default, Clone)]
pub struct HtmlSurface {
    body: String,
    notifications: Vec<Notification>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the most recent frame.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Full document: frame markup followed by live notifications.
    pub fn document(&self) -> String {
        let mut out = self.body.clone();
        for notification in &self.notifications {
            out.push_str(&render_notification(notification));
            out.push('\n');
        }
        out
    }
}

impl Surface for HtmlSurface {
    fn present(&mut self, frame: &Frame) {
        self.body = render_frame(frame);
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn dismiss_notification(&mut self, id: NotificationId) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.phase = NotificationPhase::Leaving;
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|notification| notification.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_frame};
    use crate::model::task::{Filter, Task, TaskId};
    use crate::view::Frame;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn clear_button_disabled_without_completed_tasks() {
        let tasks = vec![Task::new(TaskId(1), "a", "t").unwrap()];
        let markup = render_frame(&Frame::build(&tasks, Filter::All));
        assert!(markup.contains(r#"<button id="clear-completed" disabled>"#));
        assert!(markup.contains(r#"<div id="empty-state" class="empty-state">"#));
    }

    #[test]
    fn only_current_filter_button_is_active() {
        let markup = render_frame(&Frame::build(&[], Filter::Active));
        assert!(markup.contains(
            r#"<button class="filter-btn active" data-filter="active">active</button>"#
        ));
        assert!(markup.contains(r#"<button class="filter-btn" data-filter="all">all</button>"#));
        assert!(markup.contains(
            r#"<button class="filter-btn" data-filter="completed">completed</button>"#
        ));
        assert_eq!(markup.matches("filter-btn active").count(), 1);
    }
}
