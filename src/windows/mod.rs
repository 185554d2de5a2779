//! Windows API layer
//!
//! Safe wrappers around the Win32 calls the pilot needs: opening the target
//! process, reading its memory, listing its modules, finding and focusing
//! its window, and injecting key events. All unsafe FFI is contained here.

pub mod bindings;
pub mod types;
pub mod utils;

pub use bindings::{kernel32, psapi, user32};
pub use types::Handle;
