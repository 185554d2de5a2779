//! Memory-Pilot library
//!
//! Reads position, facing and vital stats out of a running game client and
//! steers the player along a recorded waypoint path.
//!
//! The pipeline, leaf first:
//! - [`memory`]: fail-soft typed reads over the target's address space
//! - [`resolver`]: finds working addresses for the telemetry fields
//! - [`telemetry`]: validated per-tick snapshots
//! - [`navigation`]: the waypoint-following controller and path storage
//! - [`input`]: held-key bookkeeping and key injection
//!
//! Everything except live attachment, window focus and key injection is
//! platform-independent and can be driven by [`memory::MockMemory`].

pub mod config;
pub mod core;
pub mod input;
pub mod memory;
pub mod navigation;
pub mod process;
pub mod resolver;
pub mod telemetry;
#[cfg(windows)]
pub mod windows;

pub use crate::core::types::{
    Address, ModuleInfo, PilotError, PilotResult, ProcessArchitecture, ProcessId, Scheme, Vec2,
    Vec3,
};
pub use crate::core::{CancelToken, VERSION};
