use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PathListItemVm, map_path_list};

const PATH_LIST_LIMIT: u32 = 50;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let path_service = ctx.path_service();

    let mut resource = use_resource(move || {
        let path_service = path_service.clone();
        async move {
            let records = path_service
                .list_paths(PATH_LIST_LIMIT)
                .await
                .map_err(|err| {
                    tracing::warn!(error = %err, "failed to list saved paths");
                    ViewError::Unknown
                })?;
            Ok::<_, ViewError>(map_path_list(&records))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "My Learning Paths" }
            match state {
                ViewState::Idle => rsx! { p { "Idle" } },
                ViewState::Loading => rsx! { p { "Loading..." } },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { class: "path-list-empty", "No saved paths yet." }
                    } else {
                        ul { class: "path-list",
                            for item in items {
                                PathListRow { key: "{item.id}", item }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn PathListRow(item: PathListItemVm) -> Element {
    rsx! {
        li { class: "path-list-item",
            Link {
                class: "path-list-link",
                to: Route::SavedPath { path_id: item.id.clone() },
                "{item.title}"
            }
            p { class: "path-list-description", "{item.description}" }
            p { class: "path-list-progress", "{item.progress_label}" }
        }
    }
}
