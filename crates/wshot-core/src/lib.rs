//! wshot-core: Window enumeration and screenshot capture for GNOME on Wayland
//!
//! This library provides the business logic behind the `wshot` CLI. It talks
//! to the GNOME Shell over the session D-Bus (via the `gdbus` command-line
//! client) and orchestrates external tools for the interactive capture
//! fallback.
//!
//! # Main Entry Points
//!
//! - [`window`] - List windows via the Window Calls extension, select one
//! - [`capture`] - Capture a screen region, with portal fallback
//! - [`bus`] - Session bus invocation seam (real `gdbus` or a mock)

pub mod bus;
pub mod capture;
pub mod errors;
pub mod events;
pub mod logging;
pub mod window;

// Re-export commonly used items at crate root for convenience
pub use errors::WshotError;
pub use logging::init_logging;
