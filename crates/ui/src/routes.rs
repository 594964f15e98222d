use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::toast::{ToastHost, ToastQueue};
use crate::views::{Header, HomeView, PreviewView, SavedPathView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/paths/:path_id", SavedPathView)] SavedPath { path_id: String },
        #[route("/preview", PreviewView)] Preview {},
}

#[component]
fn Layout() -> Element {
    ToastQueue::provide();

    rsx! {
        div { class: "app",
            Header {}
            nav { class: "sidebar",
                ul {
                    li { Link { to: Route::Home {}, "My Paths" } }
                    li { Link { to: Route::Preview {}, "Preview" } }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            ToastHost {}
        }
    }
}
