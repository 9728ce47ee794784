//! Configuration management for `OfficeMap`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::OfficeMapError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `OfficeMap` application
///
/// Unknown sections and keys are rejected, so a misspelt or unsupported
/// setting fails at load time instead of being silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct OfficeMapConfig {
    /// Map display configuration
    pub map: MapConfig,
    /// Routing service configuration
    pub routing: RoutingConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Map display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Styled map id used in day mode
    pub day_map_id: Option<String>,
    /// Styled map id used in night mode
    pub night_map_id: Option<String>,
    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

/// Routing service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// GraphHopper API key, falls back to `GRAPHHOPPER_API_KEY`
    pub api_key: Option<String>,
    /// Base URL for the route API
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_routing_max_retries")]
    pub max_retries: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the built frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (full, compact or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_zoom() -> u8 {
    10
}

fn default_routing_base_url() -> String {
    "https://graphhopper.com/api/1".to_string()
}

fn default_routing_timeout() -> u32 {
    30
}

fn default_routing_max_retries() -> u32 {
    3
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            day_map_id: None,
            night_map_id: None,
            zoom: default_zoom(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_routing_base_url(),
            timeout_seconds: default_routing_timeout(),
            max_retries: default_routing_max_retries(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl OfficeMapConfig {
    /// Load configuration from `config_path`, or the user config directory when `None`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // OFFICEMAP__ROUTING__API_KEY and friends
        builder = builder.add_source(
            Environment::with_prefix("OFFICEMAP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: OfficeMapConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("officemap").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.map.zoom == 0 {
            self.map.zoom = default_zoom();
        }
        if self.routing.base_url.is_empty() {
            self.routing.base_url = default_routing_base_url();
        }
        if self.routing.timeout_seconds == 0 {
            self.routing.timeout_seconds = default_routing_timeout();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.map.zoom > 22 {
            return Err(OfficeMapError::config("Map zoom cannot exceed 22").into());
        }

        if self.routing.timeout_seconds > 300 {
            return Err(
                OfficeMapError::config("Routing timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.routing.max_retries > 10 {
            return Err(OfficeMapError::config("Routing max retries cannot exceed 10").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(OfficeMapError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["full", "compact", "pretty"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(OfficeMapError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.routing.base_url.starts_with("http://")
            && !self.routing.base_url.starts_with("https://")
        {
            return Err(OfficeMapError::config(
                "Routing base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if let Some(api_key) = &self.routing.api_key {
            if api_key.trim().is_empty() {
                return Err(OfficeMapError::config(
                    "Routing API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        Ok(())
    }
}
