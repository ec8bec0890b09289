//! Terminal rendering of notifications.

use linkshelf_core::{Notifier, Toast, ToastVariant};

/// Prints toasts as they arrive: neutral ones to stdout, failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

/// `title: description`, or just the title when there is no description.
pub fn format_toast(toast: &Toast) -> String {
    if toast.description.is_empty() {
        toast.title.clone()
    } else {
        format!("{}: {}", toast.title, toast.description)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => println!("{}", format_toast(&toast)),
            ToastVariant::Destructive => eprintln!("{}", format_toast(&toast)),
        }
    }
}
