mod path_list_vm;
mod path_vm;

pub use path_list_vm::{PathListItemVm, map_path_list};
pub use path_vm::{
    ModuleCardVm, PathVm, ResourceVm, StatusControlVm, StatusMarker, map_path, progress_label,
};
