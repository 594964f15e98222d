//! Transient notifications shown in the corner of the window.

use std::time::Duration;

use dioxus::prelude::*;
use dioxus::signals::SyncSignal;
use services::{Notice, Notifier, Severity};

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ToastState {
    next_id: u64,
    items: Vec<ToastVm>,
}

/// Shared toast list. Backed by a sync signal so it can sit behind `Notifier`.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastQueue {
    state: SyncSignal<ToastState>,
}

impl ToastQueue {
    /// Create the queue and provide it to descendants. Call once, from a layout.
    pub fn provide() -> Self {
        let state = use_signal_sync(ToastState::default);
        use_context_provider(|| Self { state })
    }

    pub fn push(&self, notice: Notice) {
        let mut state = self.state;
        let mut guard = state.write();
        guard.next_id += 1;
        let id = guard.next_id;
        guard.items.push(ToastVm {
            id,
            title: notice.title,
            description: notice.description,
            destructive: notice.severity == Severity::Destructive,
        });
    }

    pub fn dismiss(&self, id: u64) {
        let mut state = self.state;
        state.write().items.retain(|toast| toast.id != id);
    }

    #[must_use]
    pub fn items(&self) -> Vec<ToastVm> {
        self.state.read().items.clone()
    }
}

/// `Notifier` that feeds the on-screen toast list.
#[derive(Clone, Copy)]
pub struct UiNotifier {
    queue: ToastQueue,
}

impl UiNotifier {
    #[must_use]
    pub fn new(queue: ToastQueue) -> Self {
        Self { queue }
    }
}

impl Notifier for UiNotifier {
    fn notify(&self, notice: Notice) {
        self.queue.push(notice);
    }
}

#[component]
pub fn ToastHost() -> Element {
    let queue = use_context::<ToastQueue>();
    let items = queue.items();

    rsx! {
        div { class: "toast-host", role: "status",
            for toast in items {
                ToastItem { key: "{toast.id}", toast }
            }
        }
    }
}

#[component]
fn ToastItem(toast: ToastVm) -> Element {
    let queue = use_context::<ToastQueue>();
    let id = toast.id;

    use_future(move || async move {
        tokio::time::sleep(TOAST_LIFETIME).await;
        queue.dismiss(id);
    });

    let class = if toast.destructive {
        "toast toast--destructive"
    } else {
        "toast"
    };

    rsx! {
        div { class,
            div { class: "toast-body",
                strong { class: "toast-title", "{toast.title}" }
                p { class: "toast-description", "{toast.description}" }
            }
            button {
                class: "toast-close",
                r#type: "button",
                onclick: move |_| queue.dismiss(id),
                "×"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dioxus::core::NoOpMutations;

    use super::*;

    #[component]
    fn NotifyOnMount(notices: Vec<Notice>) -> Element {
        let queue = ToastQueue::provide();
        use_hook(move || {
            let notifier = UiNotifier::new(queue);
            for notice in notices {
                notifier.notify(notice);
            }
        });
        rsx! { ToastHost {} }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn notices_render_as_toasts() {
        let notices = vec![
            Notice::error("Failed to save your progress. Please try again."),
            Notice::info("Signed out", "You have been successfully signed out."),
        ];
        let mut dom = VirtualDom::new_with_props(NotifyOnMount, NotifyOnMountProps { notices });
        dom.rebuild_in_place();
        dom.render_immediate(&mut NoOpMutations);
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("toast toast--destructive"), "missing error toast in {html}");
        assert!(html.contains("Failed to save your progress. Please try again."));
        assert!(html.contains("Signed out"), "missing info toast in {html}");
        assert_eq!(html.matches("toast-close").count(), 2);
    }
}
