mod header;
mod home;
mod path_page;
mod path_view;
mod state;

pub use header::Header;
pub use home::HomeView;
pub use path_page::{PreviewView, SavedPathView};
pub use path_view::PathView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
