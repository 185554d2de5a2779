//! Default configuration values for Memory-Pilot

use super::profiles::ProfileId;
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub target: TargetDefaults,
    pub scanner: ScannerDefaults,
    pub navigation: NavigationDefaults,
    pub recorder: RecorderDefaults,
    pub logging: LoggingDefaults,
}

/// Default target process configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefaults {
    pub window_classes: Vec<String>,
    pub profile: ProfileId,
}

/// Default coordinate scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerDefaults {
    pub start_address: usize,
    pub end_address: usize,
    pub block_size: usize,
    pub alignment: usize,
    pub tolerance: f32,
    pub max_matches: usize,
    pub sample: [f32; 3],
}

/// Default navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationDefaults {
    pub tick_interval_ms: u64,
    pub cross_threshold: f32,
    pub alignment_threshold: f32,
    pub move_threshold: f32,
    pub arrival_radius: f32,
    pub path_file: String,
}

/// Default waypoint recorder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderDefaults {
    pub min_spacing: f32,
    pub poll_interval_ms: u64,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        target: TargetDefaults {
            window_classes: vec!["GxWindowClass".to_string(), "GxWindowClassD3d".to_string()],
            profile: ProfileId::WowExe,
        },
        scanner: ScannerDefaults {
            start_address: 0x0040_0000,
            end_address: 0x7FFF_FFFF,
            block_size: 4096,
            alignment: 4,
            tolerance: 1.0,
            max_matches: 3,
            sample: [-171.408_0, -9339.46, 63.685_944],
        },
        navigation: NavigationDefaults {
            tick_interval_ms: 100,
            cross_threshold: 0.1,
            alignment_threshold: 2.0,
            move_threshold: 1.0,
            arrival_radius: 2.0,
            path_file: "path.json".to_string(),
        },
        recorder: RecorderDefaults {
            min_spacing: 8.0,
            poll_interval_ms: 50,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
