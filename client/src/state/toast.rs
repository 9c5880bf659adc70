//! Transient notification queue.
//!
//! DESIGN
//! ======
//! Workflows never surface failures as errors to their callers; they produce
//! a [`Notice`] instead, which the page pushes here. The toast stack renders
//! the queue and dismisses each entry after a short delay.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// How long a toast stays on screen before auto-dismissal.
pub const TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A notification produced by a workflow, not yet queued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }
}

/// A queued notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a notice and return the id assigned to it.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind: notice.kind, message: notice.message });
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}
