//! Waypoint navigation
//!
//! This module provides:
//! - The shared waypoint path and its JSON store
//! - The recorder that builds a path from live positions
//! - The controller that turns snapshots into steering and throttle directives

pub mod controller;
pub mod directive;
pub mod path;
pub mod recorder;
pub mod store;

pub use controller::{
    alignment_error, steering, throttle, Direction, NavState, NavigationController,
    NavigationTuning,
};
pub use directive::{Command, Directives, Steering, Throttle};
pub use path::{read_path, shared, write_path, SharedPath, Waypoint, WaypointPath};
pub use recorder::PathRecorder;
pub use store::PathStore;
