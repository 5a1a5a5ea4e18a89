//! Configuration module for asset-browser
//!
//! Holds catalog endpoints, paging and image sizing, and transport settings.
//! Configuration is read from the user's config directory
//! (`~/.config/asset-browser/config.toml` on Linux) and may be overridden by
//! `ASSET_BROWSER_*` environment variables, e.g. `ASSET_BROWSER_PAGE_SIZE=48`.
//! Every field has a default, so a missing or partial file is fine.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "asset-browser";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "ASSET_BROWSER";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Search endpoint; the encoded query is appended verbatim
    pub search_endpoint: String,

    /// Model endpoint; detail requests go to `<model_endpoint>/<uid>`
    pub model_endpoint: String,

    /// Category listing endpoint
    pub categories_endpoint: String,

    /// Results per page; drives previous-cursor arithmetic
    pub page_size: u64,

    /// Side length of square list thumbnails
    pub thumbnail_size: u32,

    /// Width of large previews
    pub preview_width: u32,

    /// Height-to-width ratio of large previews
    pub preview_ratio: f32,

    /// Decoded images at least this wide are treated as previews
    pub preview_threshold: u32,

    /// Requested preview thumbnails must be narrower than this
    pub preview_max_width: u32,

    /// Requested list thumbnails must be narrower than this
    pub thumbnail_max_width: u32,

    /// Per-request timeout for the HTTP transport
    pub request_timeout_secs: u64,

    /// Worker threads used by the HTTP transport
    pub worker_threads: usize,

    /// Maximum number of decoded images kept across searches
    pub image_cache_capacity: u64,

    /// How long decoded images stay cached
    pub image_cache_ttl_secs: u64,

    /// Catalog API token, sent as `Authorization: Token <token>`
    pub api_token: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            search_endpoint: "https://api.sketchfab.com/v3/search".to_string(),
            model_endpoint: "https://api.sketchfab.com/v3/models".to_string(),
            categories_endpoint: "https://api.sketchfab.com/v3/categories".to_string(),
            page_size: 24,
            thumbnail_size: 128,
            preview_width: 512,
            preview_ratio: 0.5625,
            preview_threshold: 512,
            preview_max_width: 768,
            thumbnail_max_width: 257,
            request_timeout_secs: 30,
            worker_threads: 4,
            image_cache_capacity: 512,
            image_cache_ttl_secs: 600,
            api_token: None,
        }
    }
}

impl BrowserConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults (plus any environment overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Height of large previews, `preview_width * preview_ratio` rounded
    #[must_use]
    pub fn preview_height(&self) -> u32 {
        (self.preview_width as f32 * self.preview_ratio).round() as u32
    }

    /// Render as TOML for display
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }
}
