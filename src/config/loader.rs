//! Configuration loader for Memory-Pilot
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use super::profiles::{OffsetProfile, ProfileId};
use crate::core::types::{Address, Vec3};
use crate::memory::ScanOptions;
use crate::navigation::NavigationTuning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target")]
    pub target: TargetConfig,

    #[serde(default = "default_scanner")]
    pub scanner: ScannerConfig,

    #[serde(default = "default_navigation")]
    pub navigation: NavigationConfig,

    #[serde(default = "default_recorder")]
    pub recorder: RecorderConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Which process to attach to and which layout to expect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_window_classes")]
    pub window_classes: Vec<String>,
    #[serde(default = "default_profile")]
    pub profile: ProfileId,
}

/// Coordinate scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_start_address")]
    pub start_address: usize,
    #[serde(default = "default_end_address")]
    pub end_address: usize,
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_alignment")]
    pub alignment: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    #[serde(default = "default_sample")]
    pub sample: [f32; 3],
}

/// Navigation controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_cross_threshold")]
    pub cross_threshold: f32,
    #[serde(default = "default_alignment_threshold")]
    pub alignment_threshold: f32,
    #[serde(default = "default_move_threshold")]
    pub move_threshold: f32,
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f32,
    #[serde(default = "default_path_file")]
    pub path_file: PathBuf,
}

/// Waypoint recorder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    #[serde(default = "default_min_spacing")]
    pub min_spacing: f32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl TargetConfig {
    pub fn offset_profile(&self) -> &'static OffsetProfile {
        self.profile.profile()
    }
}

impl ScannerConfig {
    pub fn scan_options(&self) -> ScanOptions {
        let [x, y, z] = self.sample;
        ScanOptions {
            start_address: Address::new(self.start_address),
            end_address: Address::new(self.end_address),
            block_size: self.block_size,
            alignment: self.alignment,
            tolerance: self.tolerance,
            max_matches: self.max_matches,
            sample: Vec3::new(x, y, z),
        }
    }
}

impl NavigationConfig {
    pub fn tuning(&self) -> NavigationTuning {
        NavigationTuning {
            cross_threshold: self.cross_threshold,
            alignment_threshold: self.alignment_threshold,
            move_threshold: self.move_threshold,
            arrival_radius: self.arrival_radius,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is absent.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(path)) => {
                tracing::info!("No configuration at {}, using defaults", path);
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    ConfigLoader::new("pilot.toml").load_or_default()
}

// Default functions for serde
fn default_target() -> TargetConfig {
    let defaults = default_config();
    TargetConfig {
        window_classes: defaults.target.window_classes,
        profile: defaults.target.profile,
    }
}

fn default_scanner() -> ScannerConfig {
    let d = default_config().scanner;
    ScannerConfig {
        start_address: d.start_address,
        end_address: d.end_address,
        block_size: d.block_size,
        alignment: d.alignment,
        tolerance: d.tolerance,
        max_matches: d.max_matches,
        sample: d.sample,
    }
}

fn default_navigation() -> NavigationConfig {
    let d = default_config().navigation;
    NavigationConfig {
        tick_interval_ms: d.tick_interval_ms,
        cross_threshold: d.cross_threshold,
        alignment_threshold: d.alignment_threshold,
        move_threshold: d.move_threshold,
        arrival_radius: d.arrival_radius,
        path_file: PathBuf::from(d.path_file),
    }
}

fn default_recorder() -> RecorderConfig {
    let d = default_config().recorder;
    RecorderConfig {
        min_spacing: d.min_spacing,
        poll_interval_ms: d.poll_interval_ms,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_config().logging.level,
    }
}

// Individual field defaults
fn default_window_classes() -> Vec<String> {
    default_config().target.window_classes
}

fn default_profile() -> ProfileId {
    default_config().target.profile
}

fn default_start_address() -> usize {
    default_config().scanner.start_address
}

fn default_end_address() -> usize {
    default_config().scanner.end_address
}

fn default_block_size() -> usize {
    default_config().scanner.block_size
}

fn default_alignment() -> usize {
    default_config().scanner.alignment
}

fn default_tolerance() -> f32 {
    default_config().scanner.tolerance
}

fn default_max_matches() -> usize {
    default_config().scanner.max_matches
}

fn default_sample() -> [f32; 3] {
    default_config().scanner.sample
}

fn default_tick_interval_ms() -> u64 {
    default_config().navigation.tick_interval_ms
}

fn default_cross_threshold() -> f32 {
    default_config().navigation.cross_threshold
}

fn default_alignment_threshold() -> f32 {
    default_config().navigation.alignment_threshold
}

fn default_move_threshold() -> f32 {
    default_config().navigation.move_threshold
}

fn default_arrival_radius() -> f32 {
    default_config().navigation.arrival_radius
}

fn default_path_file() -> PathBuf {
    PathBuf::from(default_config().navigation.path_file)
}

fn default_min_spacing() -> f32 {
    default_config().recorder.min_spacing
}

fn default_poll_interval_ms() -> u64 {
    default_config().recorder.poll_interval_ms
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: default_target(),
            scanner: default_scanner(),
            navigation: default_navigation(),
            recorder: default_recorder(),
            logging: default_logging(),
        }
    }
}
