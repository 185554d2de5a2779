//! Core module containing fundamental types for Memory-Pilot
//!
//! This module provides the foundational building blocks used throughout
//! the crate: addresses, vectors, module information, errors and the
//! cancellation token used by long-running scans.

pub mod cancel;
pub mod types;

pub use cancel::CancelToken;
pub use types::{
    Address, ModuleInfo, PilotError, PilotResult, ProcessArchitecture, Scheme, Vec2, Vec3,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
