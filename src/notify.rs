//! User-visible notification capability.

use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// CSS modifier used by the toast renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "toast-info",
            Severity::Success => "toast-success",
            Severity::Warning => "toast-warning",
            Severity::Error => "toast-error",
        }
    }
}

/// Somewhere to show a message to the user, e.g. a toast stack.
pub trait NotificationSink {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sink that keeps every notification; used by headless callers and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: RefCell<Vec<(String, Severity)>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<(String, Severity)> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.entries.borrow().last().cloned()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, severity: Severity) {
        self.entries.borrow_mut().push((message.to_string(), severity));
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::rc::Rc<T> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}
