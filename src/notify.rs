//! Transient user notifications.

use std::collections::VecDeque;
use std::fmt;

/// Fire-and-forget notification surface.
pub trait Notifier {
    fn notify_success(&mut self, message: &str);

    fn notify_error(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ToastKind::Success => "SUCCESS",
            ToastKind::Error => "ERROR",
        };
        write!(f, "{label}: {}", self.message)
    }
}

/// In-memory notifier that keeps toasts until a presentation layer drains
/// them.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: ToastKind, message: &str) {
        self.pending.push_back(Toast {
            kind,
            message: message.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.pending.iter()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        self.pending.drain(..).collect()
    }
}

impl Notifier for ToastQueue {
    fn notify_success(&mut self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&mut self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}
