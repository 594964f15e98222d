use dioxus::prelude::*;
use dioxus_router::use_navigator;
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus, PathId};
use services::Notice;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::ToastQueue;
use crate::views::{PathView, ViewError, ViewState, view_state_from_resource};

#[component]
pub fn SavedPathView(path_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let path_service = ctx.path_service();

    let mut resource = use_resource(move || {
        let path_service = path_service.clone();
        let path_id = PathId::new(path_id.clone());
        async move {
            match path_service.get_path(&path_id).await {
                Ok(Some(path)) => Ok(path),
                Ok(None) => Err(ViewError::NotFound),
                Err(err) => {
                    tracing::warn!(path_id = %path_id, error = %err, "failed to load path");
                    Err(ViewError::Unknown)
                }
            }
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err != ViewError::NotFound {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(path) => rsx! { PathOwner { initial: path } },
            }
        }
    }
}

#[component]
fn PathOwner(initial: LearningPath) -> Element {
    let path = use_signal(|| initial.clone());

    rsx! { EditablePath { path } }
}

/// Owns the local copy of a path and applies status changes to it by module id.
#[component]
fn EditablePath(path: Signal<LearningPath>) -> Element {
    let mut path = path;

    rsx! {
        PathView {
            path,
            on_module_status_change: move |(module_id, status): (ModuleId, ModuleStatus)| {
                if !path.write().set_module_status(&module_id, status) {
                    tracing::warn!(
                        module_id = %module_id,
                        "status change for unknown module ignored"
                    );
                }
            },
        }
    }
}

/// Unsaved path handed over at launch. Status controls stay hidden until saved.
#[component]
pub fn PreviewView() -> Element {
    let ctx = use_context::<AppContext>();

    match ctx.preview_path() {
        Some(initial) => rsx! { PreviewOwner { initial } },
        None => rsx! {
            div { class: "page",
                h2 { "Preview" }
                p { "No generated path to preview." }
            }
        },
    }
}

#[component]
fn PreviewOwner(initial: LearningPath) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<ToastQueue>();
    let navigator = use_navigator();
    let path_service = ctx.path_service();
    let mut path = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);

    let on_save = move |_: MouseEvent| {
        if saving() {
            return;
        }
        saving.set(true);
        let path_service = path_service.clone();
        spawn(async move {
            let mut draft = path.peek().clone();
            let result = path_service.save_path(&mut draft).await;
            saving.set(false);
            match result {
                Ok(path_id) => {
                    path.set(draft);
                    toasts.push(Notice::info(
                        "Path saved",
                        "Your learning path has been saved.",
                    ));
                    navigator.push(Route::SavedPath {
                        path_id: path_id.to_string(),
                    });
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to save path");
                    toasts.push(Notice::error(
                        "Failed to save your learning path. Please try again.",
                    ));
                }
            }
        });
    };

    rsx! {
        div { class: "page",
            div { class: "preview-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: saving(),
                    onclick: on_save,
                    if saving() { "Saving..." } else { "Save path" }
                }
            }
            EditablePath { path }
        }
    }
}
