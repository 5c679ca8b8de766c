//! Configuration file handling for snappaste.
//!
//! Loads configuration from `~/.config/snappaste/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::compositor::DEFAULT_JPEG_QUALITY;
use crate::editor::{CropSettings, DEFAULT_CROP_MARGIN, DEFAULT_MIN_CROP_SIZE};
use crate::geometry::Size;
use crate::transport::{DEFAULT_FILENAME, DEFAULT_SERVER_URL, PING_PATH, SERVER_URL_ENV, UPLOAD_PATH};
use crate::zoom::ZoomCapabilities;

/// Configuration file structure for snappaste.
/// Loaded from ~/.config/snappaste/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_ping_path")]
    pub ping_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            upload_path: default_upload_path(),
            ping_path: default_ping_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CaptureConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Send straight after the shutter, skipping the edit step
    #[serde(default)]
    pub instant_send: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            filename: default_filename(),
            instant_send: false,
        }
    }
}

/// Software zoom range, used when the device has no native zoom.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ZoomConfig {
    #[serde(default = "default_zoom_min")]
    pub min: f64,
    #[serde(default = "default_zoom_max")]
    pub max: f64,
    #[serde(default = "default_zoom_step")]
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: default_zoom_min(),
            max: default_zoom_max(),
            step: default_zoom_step(),
        }
    }
}

impl ZoomConfig {
    /// The configured range, or the built-in software range if it is unusable
    /// (non-finite values, `max < min`, or a non-positive step).
    pub fn capabilities(&self) -> ZoomCapabilities {
        let caps = ZoomCapabilities {
            min: self.min,
            max: self.max,
            step: self.step,
        };
        if !caps.is_usable() {
            log::warn!(
                "Ignoring invalid zoom range {}..{} (step {}), using defaults",
                self.min,
                self.max,
                self.step
            );
            return ZoomCapabilities::SOFTWARE;
        }
        caps
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_crop_margin")]
    pub crop_margin: f64,
    #[serde(default = "default_min_crop_size")]
    pub min_crop_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            crop_margin: default_crop_margin(),
            min_crop_size: default_min_crop_size(),
        }
    }
}

impl EditorConfig {
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    pub fn crop_settings(&self) -> CropSettings {
        CropSettings {
            margin: self.crop_margin,
            min_size: self.min_crop_size,
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_upload_path() -> String {
    UPLOAD_PATH.to_string()
}

fn default_ping_path() -> String {
    PING_PATH.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_zoom_min() -> f64 {
    ZoomCapabilities::SOFTWARE.min
}

fn default_zoom_max() -> f64 {
    ZoomCapabilities::SOFTWARE.max
}

fn default_zoom_step() -> f64 {
    ZoomCapabilities::SOFTWARE.step
}

fn default_viewport_width() -> f64 {
    400.0
}

fn default_viewport_height() -> f64 {
    300.0
}

fn default_crop_margin() -> f64 {
    DEFAULT_CROP_MARGIN
}

fn default_min_crop_size() -> f64 {
    DEFAULT_MIN_CROP_SIZE
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Let `SNAPPASTE_SERVER_URL` override the configured receiver.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                self.server.url = url;
            }
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("snappaste").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/snappaste/config.toml")
        })
}

/// Contents written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# snappaste configuration

[server]
# Desktop receiver address
url = "http://127.0.0.1:8080"
upload_path = "/api/upload"
ping_path = "/api/ping"

[capture]
# JPEG quality (1-100)
jpeg_quality = 80
filename = "photo.jpg"
# Send immediately after the shutter, skipping rotate/crop
instant_send = false

[zoom]
# Software zoom range when the camera has no native zoom
min = 1.0
max = 5.0
step = 0.1

[editor]
# On-screen preview size the crop box is drawn in
viewport_width = 400.0
viewport_height = 300.0
crop_margin = 40.0
min_crop_size = 50.0
"#;
