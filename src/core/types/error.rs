//! Error types shared by the memory client, resolver, telemetry and navigation layers

use std::fmt;
use thiserror::Error;

/// Main error type for the pilot
#[derive(Error, Debug)]
pub enum PilotError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Invalid telemetry: {0}")]
    InvalidTelemetry(String),

    #[error("Address resolution failed: {0}")]
    AddressResolutionFailed(String),

    #[error("Waypoint path is empty")]
    PathEmpty,

    #[error("Pointer chain broken at level {level}: {reason}")]
    PointerChainBroken { level: usize, reason: String },

    #[error("Memory scan cancelled")]
    ScanCancelled,

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Input injection failed: {0}")]
    InputFailed(String),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for pilot operations
pub type PilotResult<T> = Result<T, PilotError>;

impl PilotError {
    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        PilotError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a pointer chain broken error
    pub fn pointer_chain_broken(level: usize, reason: impl Into<String>) -> Self {
        PilotError::PointerChainBroken {
            level,
            reason: reason.into(),
        }
    }

    /// Per-tick failures that the next tick may recover from.
    ///
    /// Everything else is an initialization or persistence failure and is
    /// surfaced to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PilotError::ReadFailed { .. }
                | PilotError::InvalidTelemetry(_)
                | PilotError::PointerChainBroken { .. }
                | PilotError::InputFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors: Vec<(PilotError, &str)> = vec![
            (
                PilotError::ProcessNotFound("GxWindowClass".to_string()),
                "Process not found: GxWindowClass",
            ),
            (
                PilotError::ModuleNotFound("wow.exe".to_string()),
                "Module not found: wow.exe",
            ),
            (
                PilotError::read_failed("0x00465C24", "partial copy"),
                "Failed to read memory at 0x00465C24: partial copy",
            ),
            (
                PilotError::pointer_chain_broken(2, "null pointer"),
                "Pointer chain broken at level 2: null pointer",
            ),
            (PilotError::PathEmpty, "Waypoint path is empty"),
            (PilotError::ScanCancelled, "Memory scan cancelled"),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(PilotError::read_failed("0x0", "gone").is_transient());
        assert!(PilotError::InvalidTelemetry("NaN".into()).is_transient());
        assert!(PilotError::pointer_chain_broken(0, "x").is_transient());

        assert!(!PilotError::ProcessNotFound("x".into()).is_transient());
        assert!(!PilotError::ModuleNotFound("x".into()).is_transient());
        assert!(!PilotError::AddressResolutionFailed("x".into()).is_transient());
        assert!(!PilotError::PathEmpty.is_transient());
    }

    #[test]
    fn test_from_implementations() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(PilotError::from(io_err), PilotError::IoError(_)));

        let json_err = serde_json::from_str::<Vec<f32>>("{").unwrap_err();
        assert!(matches!(PilotError::from(json_err), PilotError::JsonError(_)));
    }
}
