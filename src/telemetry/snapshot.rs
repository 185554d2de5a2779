//! Validated per-tick state record

use crate::core::types::{Address, PilotError, Vec2, Vec3};
use std::fmt;

/// Largest coordinate magnitude accepted as real telemetry
pub const SANITY_BOUND: f32 = 20_000.0;

/// Why a snapshot is invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryFault {
    /// A position or facing field could not be read
    Unreadable { address: Address },
    /// A component is NaN or infinite
    NonFinite,
    /// A position component exceeds `SANITY_BOUND`
    OutOfRange,
    /// Both facing components are zero, so there is no direction
    ZeroOrientation,
}

impl fmt::Display for TelemetryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryFault::Unreadable { address } => write!(f, "field at {} is unreadable", address),
            TelemetryFault::NonFinite => f.write_str("component is NaN or infinite"),
            TelemetryFault::OutOfRange => {
                write!(f, "position component exceeds {}", SANITY_BOUND)
            }
            TelemetryFault::ZeroOrientation => f.write_str("facing vector has zero magnitude"),
        }
    }
}

impl TelemetryFault {
    pub fn to_error(&self) -> PilotError {
        match self {
            TelemetryFault::Unreadable { address } => {
                PilotError::read_failed(address, "telemetry field unreadable")
            }
            other => PilotError::InvalidTelemetry(other.to_string()),
        }
    }
}

/// Position, facing and health at one tick.
///
/// A valid snapshot has finite position components within `SANITY_BOUND`
/// and a unit-length orientation. Invalid snapshots keep whatever raw values
/// were read and must not be steered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    position: Vec3,
    orientation: Vec2,
    health: Option<i32>,
    fault: Option<TelemetryFault>,
}

impl TelemetrySnapshot {
    /// Validate raw reads and normalize the facing vector
    pub fn from_raw(position: Vec3, raw_orientation: Vec2, health: Option<i32>) -> Self {
        let invalid = |fault| TelemetrySnapshot {
            position,
            orientation: raw_orientation,
            health,
            fault: Some(fault),
        };

        if !position.components().iter().all(|c| c.is_finite()) || !raw_orientation.is_finite() {
            return invalid(TelemetryFault::NonFinite);
        }
        if position.components().iter().any(|c| c.abs() > SANITY_BOUND) {
            return invalid(TelemetryFault::OutOfRange);
        }
        let Some(orientation) = raw_orientation.normalized() else {
            return invalid(TelemetryFault::ZeroOrientation);
        };

        TelemetrySnapshot {
            position,
            orientation,
            health,
            fault: None,
        }
    }

    /// A snapshot for a tick whose reads failed
    pub fn unreadable(address: Address) -> Self {
        TelemetrySnapshot {
            position: Vec3::default(),
            orientation: Vec2::ZERO,
            health: None,
            fault: Some(TelemetryFault::Unreadable { address }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fault.is_none()
    }

    pub fn fault(&self) -> Option<TelemetryFault> {
        self.fault
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit facing vector (raw values if the snapshot is invalid)
    pub fn orientation(&self) -> Vec2 {
        self.orientation
    }

    pub fn health(&self) -> Option<i32> {
        self.health
    }
}
