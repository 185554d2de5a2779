//! Configuration validator for Memory-Pilot
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{
    Config, ConfigError, LoggingConfig, NavigationConfig, RecorderConfig, ScannerConfig,
    TargetConfig,
};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_target(&config.target)?;
        Self::validate_scanner(&config.scanner)?;
        Self::validate_navigation(&config.navigation)?;
        Self::validate_recorder(&config.recorder)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    fn validate_target(target: &TargetConfig) -> Result<(), ConfigError> {
        if target.window_classes.is_empty() || target.window_classes.iter().any(|c| c.is_empty()) {
            return Err(ConfigError::Invalid(
                "At least one non-empty window class is required".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_scanner(scanner: &ScannerConfig) -> Result<(), ConfigError> {
        if scanner.start_address >= scanner.end_address {
            return Err(ConfigError::Invalid(format!(
                "Scan start 0x{:X} must be below scan end 0x{:X}",
                scanner.start_address, scanner.end_address
            )));
        }

        if scanner.block_size < 16 || !scanner.block_size.is_power_of_two() {
            return Err(ConfigError::Invalid(
                "Block size must be a power of 2 and at least 16".to_string(),
            ));
        }

        if ![1, 2, 4, 8].contains(&scanner.alignment) {
            return Err(ConfigError::Invalid(format!(
                "Scan alignment must be 1, 2, 4 or 8, got {}",
                scanner.alignment
            )));
        }

        if !(scanner.tolerance.is_finite() && scanner.tolerance > 0.0) {
            return Err(ConfigError::Invalid(
                "Scan tolerance must be positive".to_string(),
            ));
        }

        if scanner.max_matches == 0 {
            return Err(ConfigError::Invalid(
                "Scan must accept at least 1 match".to_string(),
            ));
        }

        if scanner.sample.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid(
                "Scan sample coordinates must be finite".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_navigation(navigation: &NavigationConfig) -> Result<(), ConfigError> {
        if navigation.tick_interval_ms < 10 {
            return Err(ConfigError::Invalid(
                "Tick interval must be at least 10 ms".to_string(),
            ));
        }

        let thresholds = [
            ("cross_threshold", navigation.cross_threshold),
            ("alignment_threshold", navigation.alignment_threshold),
            ("move_threshold", navigation.move_threshold),
            ("arrival_radius", navigation.arrival_radius),
        ];
        for (name, value) in thresholds {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "Navigation {} must be positive, got {}",
                    name, value
                )));
            }
        }

        if navigation.path_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Path file cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_recorder(recorder: &RecorderConfig) -> Result<(), ConfigError> {
        if !(recorder.min_spacing.is_finite() && recorder.min_spacing > 0.0) {
            return Err(ConfigError::Invalid(
                "Recorder spacing must be positive".to_string(),
            ));
        }
        if recorder.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "Recorder poll interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, valid_levels
            )));
        }
        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}
