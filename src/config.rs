//! Configuration management for the travel assistant
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AssistantError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "travel-assistant";

/// Upper bound for `planner.max_activities_per_day`
pub const MAX_ACTIVITIES_PER_DAY: usize = 3;

/// Upper bound for `planner.max_days`
pub const MAX_TRIP_DAYS: u32 = 3650;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Itinerary planner tuning
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Session store settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Itinerary planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Seed for the clustering initialization
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of clustering re-initializations
    #[serde(default = "default_restarts")]
    pub restarts: u32,
    /// Iteration cap per clustering run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Convergence tolerance, relative to the variance of the distances
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Longest trip a plan may cover
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    /// Maximum activities listed per day
    #[serde(default = "default_max_activities")]
    pub max_activities_per_day: usize,
    /// Points of interest fetched per itinerary day
    #[serde(default = "default_pois_per_day")]
    pub pois_per_day: usize,
    /// Points of interest returned for a plain tourism query
    #[serde(default = "default_tourism_limit")]
    pub tourism_limit: usize,
}

/// Session store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend (fjall or memory)
    #[serde(default = "default_session_backend")]
    pub backend: String,
    /// Session time-to-live in seconds
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
    /// Exchanges kept per session
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Directory of the embedded session store
    #[serde(default = "default_session_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// Default value functions
fn default_seed() -> u64 {
    42
}

fn default_restarts() -> u32 {
    10
}

fn default_max_iterations() -> u32 {
    300
}

fn default_tolerance() -> f64 {
    1e-4
}

fn default_max_days() -> u32 {
    365
}

fn default_max_activities() -> usize {
    3
}

fn default_pois_per_day() -> usize {
    5
}

fn default_tourism_limit() -> usize {
    5
}

fn default_session_backend() -> String {
    "fjall".to_string()
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_max_history() -> usize {
    50
}

fn default_session_location() -> String {
    "~/.cache/travel-assistant/sessions".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            restarts: default_restarts(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            max_days: default_max_days(),
            max_activities_per_day: default_max_activities(),
            pois_per_day: default_pois_per_day(),
            tourism_limit: default_tourism_limit(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            ttl_seconds: default_session_ttl(),
            max_history: default_max_history(),
            location: default_session_location(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Store directory with a leading `~` expanded to the home directory
    #[must_use]
    pub fn resolved_location(&self) -> PathBuf {
        match (self.location.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.location),
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // e.g. TRAVEL_ASSISTANT_SESSION__TTL_SECONDS=600
        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_ASSISTANT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Apply default values to empty or zeroed configuration fields
    pub fn apply_defaults(&mut self) {
        if self.planner.restarts == 0 {
            self.planner.restarts = default_restarts();
        }
        if self.planner.max_iterations == 0 {
            self.planner.max_iterations = default_max_iterations();
        }
        if self.planner.max_days == 0 {
            self.planner.max_days = default_max_days();
        }
        if self.planner.max_activities_per_day == 0 {
            self.planner.max_activities_per_day = default_max_activities();
        }
        if self.planner.pois_per_day == 0 {
            self.planner.pois_per_day = default_pois_per_day();
        }
        if self.planner.tourism_limit == 0 {
            self.planner.tourism_limit = default_tourism_limit();
        }
        if self.session.backend.is_empty() {
            self.session.backend = default_session_backend();
        }
        if self.session.ttl_seconds == 0 {
            self.session.ttl_seconds = default_session_ttl();
        }
        if self.session.max_history == 0 {
            self.session.max_history = default_max_history();
        }
        if self.session.location.is_empty() {
            self.session.location = default_session_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
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
        if self.planner.restarts > 100 {
            return Err(AssistantError::config("Planner restarts cannot exceed 100").into());
        }

        if self.planner.max_iterations > 10_000 {
            return Err(
                AssistantError::config("Planner max iterations cannot exceed 10000").into(),
            );
        }

        if !self.planner.tolerance.is_finite() || self.planner.tolerance < 0.0 {
            return Err(AssistantError::config(
                "Planner tolerance must be a non-negative number",
            )
            .into());
        }

        if self.planner.max_days > MAX_TRIP_DAYS {
            return Err(AssistantError::config(format!(
                "Planner max days cannot exceed {MAX_TRIP_DAYS}"
            ))
            .into());
        }

        if self.planner.max_activities_per_day > MAX_ACTIVITIES_PER_DAY {
            return Err(AssistantError::config(format!(
                "Planner max activities per day cannot exceed {MAX_ACTIVITIES_PER_DAY}"
            ))
            .into());
        }

        if self.planner.pois_per_day > 50 {
            return Err(
                AssistantError::config("Planner points of interest per day cannot exceed 50")
                    .into(),
            );
        }

        if self.session.ttl_seconds > 7 * 24 * 3600 {
            return Err(AssistantError::config(
                "Session TTL cannot exceed 604800 seconds (1 week)",
            )
            .into());
        }

        if self.session.max_history > 1000 {
            return Err(
                AssistantError::config("Session history cannot exceed 1000 exchanges").into(),
            );
        }

        if self.server.port == 0 {
            return Err(AssistantError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AssistantError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AssistantError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_backends = ["fjall", "memory"];
        if !valid_backends.contains(&self.session.backend.as_str()) {
            return Err(AssistantError::config(format!(
                "Invalid session backend '{}'. Must be one of: {}",
                self.session.backend,
                valid_backends.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
