//! Windows API bindings
//!
//! Process and memory calls go through `winapi`; window and keyboard calls
//! go through the `windows` crate.

pub mod kernel32;
pub mod psapi;
pub mod user32;
