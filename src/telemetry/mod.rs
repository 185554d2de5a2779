//! Telemetry extraction
//!
//! Turns raw reads through the resolved addresses into validated snapshots
//! and exposes them to the navigation controller through `TelemetrySource`.

pub mod player;
pub mod reader;
pub mod snapshot;

pub use player::{read_player_info, CombatState, PlayerInfo};
pub use reader::{capture, TelemetryReader};
pub use snapshot::{TelemetryFault, TelemetrySnapshot, SANITY_BOUND};

/// Anything that can produce a fresh snapshot each tick
pub trait TelemetrySource {
    fn read(&mut self) -> TelemetrySnapshot;
}

impl<T: TelemetrySource + ?Sized> TelemetrySource for &mut T {
    fn read(&mut self) -> TelemetrySnapshot {
        (**self).read()
    }
}
