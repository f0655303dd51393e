use std::collections::VecDeque;
use std::fmt;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        };
        f.pad(label)
    }
}

/// Toast notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub kind: ToastKind,
}

/// Pending notifications, oldest first. The front end drains them.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    next_id: usize,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        tracing::debug!("Toast #{} ({}): {}", id, kind, message);
        self.pending.push_back(Toast { id, message, kind });
        id
    }

    pub fn show_info(&mut self, message: impl Into<String>) -> usize {
        self.push(message, ToastKind::Info)
    }

    pub fn show_success(&mut self, message: impl Into<String>) -> usize {
        self.push(message, ToastKind::Success)
    }

    pub fn show_warning(&mut self, message: impl Into<String>) -> usize {
        self.push(message, ToastKind::Warning)
    }

    pub fn show_error(&mut self, message: impl Into<String>) -> usize {
        self.push(message, ToastKind::Error)
    }

    pub fn dismiss(&mut self, id: usize) {
        self.pending.retain(|toast| toast.id != id);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.pending.back()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
