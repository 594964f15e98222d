#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::toast::ToastQueue;

#[component]
pub fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<ToastQueue>();
    let mut user = use_signal(|| ctx.current_user());

    let sign_out = use_callback(move |()| {
        tracing::info!("user signed out");
        user.set(None);
        toasts.push(Notice::info(
            "Signed out",
            "You have been successfully signed out.",
        ));
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<HeaderTestHandles>() {
                handles.register(sign_out);
            }
        }
    }

    rsx! {
        header { class: "app-header",
            h1 { class: "app-title", "Learning Path Creator" }
            match user() {
                Some(name) => rsx! {
                    div { class: "user-menu",
                        span { class: "user-name", "{name}" }
                        button {
                            class: "btn btn-outline",
                            r#type: "button",
                            onclick: move |_| sign_out.call(()),
                            "Sign out"
                        }
                    }
                },
                None => rsx! {
                    span { class: "user-name user-name--anonymous", "Not signed in" }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct HeaderTestHandles {
    sign_out: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl HeaderTestHandles {
    pub(crate) fn register(&self, sign_out: Callback<()>) {
        *self.sign_out.borrow_mut() = Some(sign_out);
    }

    pub(crate) fn sign_out(&self) -> Callback<()> {
        (*self.sign_out.borrow()).expect("sign out registered")
    }
}
