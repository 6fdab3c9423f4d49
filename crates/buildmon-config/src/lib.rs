//! Configuration for the build monitor.
//!
//! This crate handles:
//! - Construction-time validation of monitor settings
//! - Optional `buildmon.kdl` configuration files

pub mod error;
pub mod file;
pub mod monitor;

pub use error::{ConfigError, ConfigResult};
pub use file::{DEFAULT_CONFIG_FILE, load_config_file, parse_config};
pub use monitor::{
    DEFAULT_API_URL, DEFAULT_PORTAL_URL, DEFAULT_UPDATE_STATUS_INTERVAL_MS,
    MAX_UPDATE_STATUS_INTERVAL_MS, MonitorConfig, MonitorConfigBuilder,
};
