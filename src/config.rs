//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::calendar::CalendarEvent;
use crate::content::SiteContent;
use crate::countdown::Countdown;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub site: SiteContent,
}

/// The wedding itself: when it starts, and how it appears in calendars
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    /// Ceremony start, local wall time at the venue
    #[serde(default = "default_starts_at")]
    pub starts_at: NaiveDateTime,

    #[serde(default = "default_ends_at")]
    pub ends_at: NaiveDateTime,

    /// Venue offset from UTC in minutes; the server's local zone when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    #[serde(default = "default_summary")]
    pub summary: String,

    #[serde(default = "default_description")]
    pub description: String,

    /// Calendar location; the venue address when unset
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default = "default_product_id")]
    pub product_id: String,

    #[serde(default = "default_calendar_file_name")]
    pub calendar_file_name: String,

    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

fn wedding_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 24).expect("valid wedding date")
}

fn default_starts_at() -> NaiveDateTime {
    wedding_day().and_hms_opt(16, 0, 0).expect("valid start time")
}

fn default_ends_at() -> NaiveDateTime {
    wedding_day().and_hms_opt(22, 0, 0).expect("valid end time")
}

fn default_summary() -> String {
    "Ben & Emily's Wedding".to_string()
}

fn default_description() -> String {
    "Join us for our special day in Charlottesville, VA!".to_string()
}

fn default_product_id() -> String {
    "-//Ben & Emily Wedding//EN".to_string()
}

fn default_calendar_file_name() -> String {
    "ben-emily-wedding.ics".to_string()
}

fn default_tick_interval() -> u64 {
    1000 // 1 second
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            starts_at: default_starts_at(),
            ends_at: default_ends_at(),
            utc_offset_minutes: None,
            summary: default_summary(),
            description: default_description(),
            location: None,
            product_id: default_product_id(),
            calendar_file_name: default_calendar_file_name(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl EventConfig {
    /// Resolve the ceremony start to an absolute instant
    pub fn target_instant(&self) -> Result<DateTime<Utc>, ConfigError> {
        let resolved = match self.utc_offset_minutes {
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .and_then(|offset| offset.from_local_datetime(&self.starts_at).single())
                .map(|dt| dt.with_timezone(&Utc)),
            None => Local
                .from_local_datetime(&self.starts_at)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };

        resolved.ok_or_else(|| {
            ConfigError::InvalidEventTime(format!(
                "{} with offset {:?} minutes",
                self.starts_at, self.utc_offset_minutes
            ))
        })
    }

    /// Countdown to the ceremony start
    pub fn countdown(&self) -> Result<Countdown, ConfigError> {
        Ok(Countdown::new(self.target_instant()?))
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Calendar entry for the wedding, linking back to `url`
    pub fn calendar_event(&self, site: &SiteContent, url: Option<String>) -> CalendarEvent {
        CalendarEvent {
            product_id: self.product_id.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            summary: self.summary.clone(),
            description: self.description.clone(),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| site.venue.one_line()),
            url,
        }
    }
}

/// Key-value storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Largest value accepted per key, in bytes
    #[serde(default = "default_max_value_bytes")]
    pub max_value_bytes: Option<usize>,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("save-the-date").to_string_lossy().to_string())
        .unwrap_or_else(|| "./save_the_date_data".to_string())
}

fn default_max_value_bytes() -> Option<usize> {
    Some(5 * 1024 * 1024) // 5 MB, a typical browser local storage quota
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_value_bytes: default_max_value_bytes(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded to the home directory
    pub fn data_path(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public address of the page, used as the calendar URL
    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Request body limit; guest book photos are sent inline
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024 // 16 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            cors_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("save-the-date").join("config.toml")),
            Some(PathBuf::from("/etc/save-the-date/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("SAVE_THE_DATE_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Ok(host) = std::env::var("SAVE_THE_DATE_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("SAVE_THE_DATE_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(url) = std::env::var("SAVE_THE_DATE_PUBLIC_URL") {
            self.api.public_url = Some(url);
        }

        if let Ok(level) = std::env::var("SAVE_THE_DATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SAVE_THE_DATE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Event start does not exist in the configured time zone: {0}")]
    InvalidEventTime(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Save the Date Configuration
#
# Environment variables override these settings:
# - SAVE_THE_DATE_DATA_DIR
# - SAVE_THE_DATE_HOST
# - SAVE_THE_DATE_PORT
# - SAVE_THE_DATE_PUBLIC_URL
# - SAVE_THE_DATE_LOG_LEVEL
# - SAVE_THE_DATE_LOG_FORMAT

[event]
# Ceremony start and end, local wall time at the venue
starts_at = "2026-10-24T16:00:00"
ends_at = "2026-10-24T22:00:00"

# Venue offset from UTC in minutes (server local time when omitted)
# utc_offset_minutes = -240

# Calendar file fields
summary = "Ben & Emily's Wedding"
description = "Join us for our special day in Charlottesville, VA!"
product_id = "-//Ben & Emily Wedding//EN"
calendar_file_name = "ben-emily-wedding.ics"

# How often connected pages receive a countdown update (ms)
tick_interval_ms = 1000

[storage]
# Directory for the guest book and excitement counter
# (default: the platform data directory, e.g. ~/.local/share/save-the-date)
# data_dir = "/var/lib/save-the-date"

# Largest value stored per key (bytes)
max_value_bytes = 5242880

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# Public page address, used as the URL in the calendar file
# public_url = "https://ben-and-emily.example"

# Allowed CORS origins (empty = any)
cors_origins = []

# Largest request body accepted (bytes)
max_body_bytes = 16777216

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Page copy can be overridden under [site], for example:
# [site.rsvp]
# form_url = "https://forms.gle/..."
# respond_by = "September 1, 2026"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.event.starts_at, default_starts_at());
        assert_eq!(config.event.calendar_file_name, "ben-emily-wedding.ics");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.storage.max_value_bytes, Some(5 * 1024 * 1024));
        assert_eq!(config.storage.data_dir, default_data_dir());
        assert!(!config.storage.data_path().starts_with("~"));
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.site, SiteContent::default());
    }

    #[test]
    fn test_home_relative_data_dir_is_expanded() {
        let config = Config::parse("[storage]\ndata_dir = \"~/wedding-data\"\n").unwrap();
        let path = config.storage.data_path();

        match dirs::home_dir() {
            Some(home) => assert_eq!(path, home.join("wedding-data")),
            None => assert_eq!(path, PathBuf::from("~/wedding-data")),
        }
    }

    #[test]
    fn test_absolute_data_dir_is_kept() {
        let config = Config::parse("[storage]\ndata_dir = \"/srv/wedding\"\n").unwrap();
        assert_eq!(config.storage.data_path(), PathBuf::from("/srv/wedding"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.event.tick_interval_ms, 1000);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_target_with_offset() {
        let event = EventConfig {
            utc_offset_minutes: Some(-240),
            ..Default::default()
        };

        let target = event.target_instant().unwrap();
        assert_eq!(target, Utc.with_ymd_and_hms(2026, 10, 24, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_target_local_time() {
        let event = EventConfig::default();
        let target = event.target_instant().unwrap();

        assert_eq!(target.with_timezone(&Local).naive_local(), event.starts_at);
    }

    #[test]
    fn test_invalid_offset() {
        let event = EventConfig {
            utc_offset_minutes: Some(100_000),
            ..Default::default()
        };
        assert!(matches!(
            event.target_instant(),
            Err(ConfigError::InvalidEventTime(_))
        ));
    }

    #[test]
    fn test_calendar_event_location_defaults_to_venue() {
        let event = EventConfig::default();
        let site = SiteContent::default();

        let calendar = event.calendar_event(&site, None);
        assert_eq!(calendar.location, site.venue.one_line());

        let custom = EventConfig {
            location: Some("Town Hall".to_string()),
            ..Default::default()
        };
        assert_eq!(custom.calendar_event(&site, None).location, "Town Hall");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
