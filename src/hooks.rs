use finance_dashboard::config::TOAST_DURATION_MS;
use finance_dashboard::{Config, NotificationSink, Severity, UploadController, UploadSnapshot};
use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

/// Notification sink feeding the toast stack. Each toast dismisses itself.
#[derive(Clone)]
pub struct ToastSink {
    dispatcher: UseReducerDispatcher<ToastList>,
    next_id: Rc<Cell<u64>>,
}

impl NotificationSink for ToastSink {
    fn notify(&self, message: &str, severity: Severity) {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        self.dispatcher.dispatch(ToastAction::Push(Toast {
            id,
            message: message.to_string(),
            severity,
        }));

        let dispatcher = self.dispatcher.clone();
        Timeout::new(TOAST_DURATION_MS, move || {
            dispatcher.dispatch(ToastAction::Dismiss(id));
        })
        .forget();
    }
}

/// Toast state plus a sink other hooks can hand to the core.
#[hook]
pub fn use_toasts() -> (UseReducerHandle<ToastList>, ToastSink) {
    let toasts = use_reducer(ToastList::default);
    let counter = use_memo((), |_| Rc::new(Cell::new(0u64)));
    let sink = ToastSink {
        dispatcher: toasts.dispatcher(),
        next_id: (*counter).clone(),
    };
    (toasts, sink)
}

/// Controller and the latest snapshot it published.
#[derive(Clone)]
pub struct UploadHandle {
    pub controller: UploadController<ToastSink>,
    pub snapshot: UploadSnapshot,
}

/// Create one controller per component lifetime and bind its snapshots to
/// component state. Unmounting drops the subscription, which aborts an
/// in-flight upload.
#[hook]
pub fn use_upload_controller(config: Rc<Config>, sink: ToastSink) -> UploadHandle {
    let controller = use_memo((), move |_| UploadController::new((*config).clone(), sink));
    let snapshot = use_state(|| controller.snapshot());

    {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let subscription = controller.attach(move |s| snapshot.set(s.clone()));
            move || drop(subscription)
        });
    }

    UploadHandle {
        controller: (*controller).clone(),
        snapshot: (*snapshot).clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64) -> Toast {
        Toast {
            id,
            message: format!("toast {}", id),
            severity: Severity::Info,
        }
    }

    #[test]
    fn push_and_dismiss_by_id() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(1)));
        let list = list.reduce(ToastAction::Push(toast(2)));
        let list = list.reduce(ToastAction::Dismiss(1));
        assert_eq!(list.toasts, vec![toast(2)]);

        let list = list.reduce(ToastAction::Dismiss(99));
        assert_eq!(list.toasts.len(), 1);
    }
}
