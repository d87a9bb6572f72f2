//! Session D-Bus invocation.
//!
//! Everything above this module talks to the bus through the [`Bus`] trait,
//! so window enumeration and capture logic can be tested against a scripted
//! [`MockBus`] instead of a live GNOME session.

pub mod errors;
pub mod gdbus;
pub mod mock;
pub mod parse;
pub mod types;

pub use errors::BusError;
pub use gdbus::{DEFAULT_TIMEOUT, GdbusBus};
pub use mock::MockBus;
pub use parse::extract_json;
pub use types::{Bus, BusCall};
