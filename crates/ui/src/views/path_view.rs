#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus};
use services::SyncTarget;

use crate::context::AppContext;
use crate::toast::{ToastQueue, UiNotifier};
use crate::vm::{ModuleCardVm, ResourceVm, StatusControlVm, map_path};

/// Renders a learning path as a stack of module cards.
///
/// The owner keeps the path in `path` and applies local status changes in
/// `on_module_status_change`. For saved paths each change is then persisted in
/// the background; failures surface as toasts and the local status is kept.
#[component]
pub fn PathView(
    path: ReadSignal<LearningPath>,
    on_module_status_change: EventHandler<(ModuleId, ModuleStatus)>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<ToastQueue>();
    let controller = use_hook(|| ctx.status_sync(Arc::new(UiNotifier::new(toasts))));
    let link_opener = ctx.link_opener();

    let on_select = use_callback(move |(module_id, status): (ModuleId, ModuleStatus)| {
        let target = SyncTarget::from_path(&path.peek());
        let pending = controller.change_status(&target, module_id, status, |id, status| {
            on_module_status_change.call((id.clone(), status));
        });
        if !pending.is_local_only() {
            spawn(async move {
                pending.settle().await;
            });
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PathViewTestHandles>() {
                handles.register(on_select);
            }
        }
    }

    let on_open_link = use_callback(move |href: String| {
        tracing::debug!(url = %href, "opening resource link");
        link_opener.open_url(&href);
    });

    let vm = map_path(&path.read());
    let view_class = if vm.show_controls {
        "path-view path-view--editable"
    } else {
        "path-view"
    };

    rsx! {
        section { class: view_class,
            header { class: "path-header",
                h2 { class: "path-title", "{vm.title}" }
                p { class: "path-description", "{vm.description}" }
                p { class: "path-progress", "{vm.progress_label}" }
            }
            div { class: "module-list",
                for card in vm.modules {
                    ModuleCard { key: "{card.id}", card, on_select, on_open_link }
                }
            }
        }
    }
}

#[component]
fn ModuleCard(
    card: ModuleCardVm,
    on_select: Callback<(ModuleId, ModuleStatus)>,
    on_open_link: Callback<String>,
) -> Element {
    let glyph = card.marker.glyph();
    let marker_class = card.marker.class();
    let status_label = card.status.label();

    rsx! {
        article { class: "{card.card_class}",
            div { class: "module-header",
                div { class: "module-heading",
                    h3 { class: "module-title",
                        span { class: marker_class, aria_label: status_label, "{glyph}" }
                        "{card.title}"
                    }
                    p { class: "module-estimate", "{card.hours_label}" }
                }
                if !card.controls.is_empty() {
                    div { class: "status-controls", role: "group",
                        for control in card.controls.clone() {
                            StatusButton {
                                key: "{control.status}",
                                module_id: card.id.clone(),
                                control,
                                on_select,
                            }
                        }
                    }
                }
            }
            p { class: "module-description", "{card.description}" }
            if !card.resources.is_empty() {
                div { class: "module-resources",
                    h4 { "Recommended Resources:" }
                    ul { class: "resource-list",
                        for resource in card.resources.clone() {
                            ResourceItem { resource, on_open_link }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatusButton(
    module_id: ModuleId,
    control: StatusControlVm,
    on_select: Callback<(ModuleId, ModuleStatus)>,
) -> Element {
    let status = control.status;
    let active = control.active;

    rsx! {
        button {
            class: control.class(),
            r#type: "button",
            aria_pressed: "{active}",
            onclick: move |_| on_select.call((module_id.clone(), status)),
            "{control.label}"
        }
    }
}

#[component]
fn ResourceItem(resource: ResourceVm, on_open_link: Callback<String>) -> Element {
    rsx! {
        li { class: "resource",
            span { class: "badge badge-outline", "{resource.kind_label}" }
            match resource.href.clone() {
                Some(href) => {
                    let target = href.clone();
                    rsx! {
                        a {
                            class: "resource-link",
                            href: "{href}",
                            onclick: move |evt: MouseEvent| {
                                evt.prevent_default();
                                on_open_link.call(target.clone());
                            },
                            "{resource.title}"
                        }
                    }
                }
                None => rsx! {
                    span { class: "resource-link resource-link--disabled", "{resource.title}" }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PathViewTestHandles {
    select: Rc<RefCell<Option<Callback<(ModuleId, ModuleStatus)>>>>,
}

#[cfg(test)]
impl PathViewTestHandles {
    pub(crate) fn register(&self, select: Callback<(ModuleId, ModuleStatus)>) {
        *self.select.borrow_mut() = Some(select);
    }

    pub(crate) fn select(&self) -> Callback<(ModuleId, ModuleStatus)> {
        (*self.select.borrow()).expect("status select registered")
    }
}
