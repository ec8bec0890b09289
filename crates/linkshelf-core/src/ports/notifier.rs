//! Transient user notifications.
//!
//! Grid commits, deletes and form submissions report their outcome through
//! this trait. Adapters decide how a toast is shown (terminal line, web
//! event); the core only decides what it says.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: String,
}

impl Toast {
    /// A neutral notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Default,
            title: title.into(),
            description: description.into(),
        }
    }

    /// A failure notification.
    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Trait for surfacing toasts.
///
/// # Implementations
///
/// - `NoopNotifier` - For tests and contexts without a user
/// - `ToastLog` - Collects toasts in memory
/// - Adapter-specific implementations (terminal output in the CLI)
pub trait Notifier: Send + Sync {
    /// Show a notification. Must not block.
    fn notify(&self, toast: Toast);
}

/// A notifier that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _toast: Toast) {}
}

/// A notifier that keeps every toast it receives.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every toast received so far, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent toast, if any.
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Remove and return every toast received so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(
            &mut *self
                .toasts
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(toast);
    }
}
