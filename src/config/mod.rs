//! Configuration module for Memory-Pilot
//!
//! Provides configuration loading, validation, default settings and the
//! built-in offset profiles of supported target builds.

mod defaults;
mod loader;
pub mod profiles;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{
    load_config, Config, ConfigError, ConfigLoader, LoggingConfig, NavigationConfig,
    RecorderConfig, ScannerConfig, TargetConfig,
};
pub use profiles::{OffsetProfile, ProfileId};
pub use validator::{validate_config, ConfigValidator};

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
