pub mod os;
pub mod path_list;

pub use os::{Os, library_path_var};
pub use path_list::PathList;
