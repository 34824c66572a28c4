//! Terminal presentation surface and stdin confirmation prompt.

use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use tasklist_core::{Confirm, Frame, Notification, NotificationId, NoticeKind, Surface};

/// Replaces control characters so stored text cannot drive the terminal.
pub fn sanitize_for_terminal(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { '\u{fffd}' } else { ch })
        .collect()
}

/// Surface that prints frames and notifications to a writer.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let counts = frame.counts;
        let header = format!(
            "[{}] all {} | active {} | completed {}",
            frame.filter, counts.total, counts.active, counts.completed
        );
        writeln!(self.out, "{}", header.dim())?;
        if frame.placeholder_visible {
            writeln!(self.out, "  {}", "No tasks".dim())?;
        }
        for row in &frame.rows {
            let mark = if row.completed { 'x' } else { ' ' };
            writeln!(
                self.out,
                "  [{mark}] {:>14}  {}",
                row.id.get(),
                sanitize_for_terminal(&row.text)
            )?;
        }
        if frame.clear_completed_enabled {
            writeln!(self.out, "  {}", "`clear` removes completed tasks".dim())?;
        }
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn present(&mut self, frame: &Frame) {
        let _ = self.write_frame(frame);
    }

    fn show_notification(&mut self, notification: &Notification) {
        let message = sanitize_for_terminal(&notification.message);
        let styled = match notification.kind {
            NoticeKind::Success => message.green(),
            NoticeKind::Error => message.red(),
        };
        let _ = writeln!(self.out, "{styled}");
        let _ = self.out.flush();
    }

    fn remove_notification(&mut self, _id: NotificationId) {}
}

/// Blocking `[y/N]` prompt on stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", sanitize_for_terminal(message));
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_for_terminal, TerminalSurface};
    use tasklist_core::{
        Filter, Frame, Notification, NotificationPhase, NoticeKind, Surface, Task, TaskId,
    };

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(sanitize_for_terminal("a\x1b[2Jb\n"), "a\u{fffd}[2Jb\u{fffd}");
    }

    #[test]
    fn frame_lists_rows_and_counts() {
        let tasks = vec![Task::new(TaskId(5), "Buy milk", "t").unwrap()];
        let mut surface = TerminalSurface::new(Vec::new());
        surface.present(&Frame::build(&tasks, Filter::All));

        let printed = String::from_utf8(surface.out).unwrap();
        assert!(printed.contains("all 1 | active 1 | completed 0"));
        assert!(printed.contains("[ ]"));
        assert!(printed.contains("Buy milk"));
    }

    #[test]
    fn notifications_keep_their_text_inside_styling() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.show_notification(&Notification {
            id: 1,
            message: "Failed to save tasks".to_string(),
            kind: NoticeKind::Error,
            phase: NotificationPhase::Visible,
        });

        let printed = String::from_utf8(surface.out).unwrap();
        assert!(printed.contains("Failed to save tasks"));
    }
}
