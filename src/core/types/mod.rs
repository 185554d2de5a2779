//! Core type definitions for Memory-Pilot
//!
//! Address wrappers, vectors, process/module descriptions and the error type
//! used throughout the crate.

mod address;
mod error;
mod process_info;
mod vector;

pub use address::{Address, Scheme};
pub use error::{PilotError, PilotResult};
pub use process_info::{ModuleInfo, ProcessArchitecture};
pub use vector::{Vec2, Vec3};

pub type ProcessId = u32;
