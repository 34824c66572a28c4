//! Injectable yes/no confirmation capability.

/// Synchronous confirmation prompt used by destructive commands.
pub trait Confirm {
    /// Shows `message` and returns whether the user accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Confirmation stub that always returns the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}
