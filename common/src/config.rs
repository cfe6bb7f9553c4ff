use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const API_KEY_ENV: &str = "GOOGLE_CLOUD_VISION_API_KEY";
pub const PROJECT_ID_ENV: &str = "GOOGLE_CLOUD_VISION_PROJECT_ID";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_device_index")]
    pub device_index: i32,
    /// Requested capture size; the driver may ignore it.
    #[serde(default)]
    pub frame_width: Option<u32>,
    #[serde(default)]
    pub frame_height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_poll_ms")]
    pub poll_ms: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: default_device_index(),
            frame_width: None,
            frame_height: None,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_results: default_max_results(),
            request_timeout_secs: default_request_timeout(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            poll_ms: default_poll_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // A zero timeout fails every request before it is sent.
        if self.vision.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "vision.request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Cloud credentials, read once at startup and never mutated.
///
/// Unset variables become empty strings; nothing is validated here, so a
/// bad key surfaces as an error from the remote call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub project_id: String,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup(API_KEY_ENV).unwrap_or_default(),
            project_id: lookup(PROJECT_ID_ENV).unwrap_or_default(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("api_key", &key)
            .field("project_id", &self.project_id)
            .finish()
    }
}

// Default value functions
fn default_device_index() -> i32 {
    0
}
fn default_endpoint() -> String {
    "https://vision.googleapis.com/v1/images:annotate".into()
}
fn default_max_results() -> u32 {
    10
}
fn default_request_timeout() -> u64 {
    10
}
fn default_jpeg_quality() -> u8 {
    90
}
fn default_window_title() -> String {
    "Trash Detection".into()
}
fn default_poll_ms() -> i32 {
    1
}
fn default_log_level() -> String {
    "info".into()
}
