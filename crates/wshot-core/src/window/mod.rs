//! Window enumeration and selection via the Window Calls shell extension.

pub mod errors;
pub mod handler;
pub mod types;

pub use errors::WindowError;
pub use handler::{EXTENSION_URL, extension_available, list_windows, select};
pub use types::{WindowInfo, WindowQuery};
