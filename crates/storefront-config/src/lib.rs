//! Shared configuration for the storefront client.
//!
//! TOML config with `STOREFRONT_` env overrides for the catalog endpoint
//! and the static profile identity, plus the one piece of locally
//! persisted state: the profile avatar reference, a single string key in
//! the platform data directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_api::{CatalogClient, TransportConfig, DEFAULT_BASE_URL, DEFAULT_RESOURCE};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: Catalog,

    #[serde(default)]
    pub profile: ProfileIdentity,
}

/// Catalog endpoint settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Catalog {
    /// Base URL of the catalog host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Resource path under the base URL.
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource: default_resource(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_resource() -> String {
    DEFAULT_RESOURCE.into()
}
fn default_timeout() -> u64 {
    30
}

impl Catalog {
    /// Transport settings for the shared HTTP client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout),
            ..TransportConfig::default()
        }
    }

    /// Build a [`CatalogClient`] against this endpoint with a pre-built
    /// `reqwest::Client`.
    pub fn to_client(&self, http: reqwest::Client) -> Result<CatalogClient, ConfigError> {
        let base_url: url::Url =
            self.base_url
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "catalog.base_url".into(),
                    reason: format!("invalid URL: {}", self.base_url),
                })?;
        Ok(CatalogClient::new(http, base_url, self.resource.clone()))
    }
}

/// Static identity shown on the profile screen.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProfileIdentity {
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for ProfileIdentity {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            email: default_email(),
        }
    }
}

fn default_display_name() -> String {
    "Test User David".into()
}
fn default_email() -> String {
    "Test123@email.com".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "storefront", "storefront").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("storefront");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from an explicit file path + environment.
///
/// Env overrides use a double-underscore section separator so field names
/// that contain an underscore survive the mapping:
/// `STOREFRONT_CATALOG__BASE_URL` lands on `catalog.base_url`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOREFRONT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile avatar persistence ──────────────────────────────────────

/// The one locally persisted piece of state: a string reference to the
/// chosen profile image. Read at profile-view entry, written whenever the
/// user picks a new image. No schema beyond this single key.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store under the platform data directory.
    pub fn new() -> Self {
        let path = ProjectDirs::from("io", "storefront", "storefront").map_or_else(
            || {
                let mut p = dirs_fallback();
                p.push("profile_image");
                p
            },
            |dirs| dirs.data_dir().join("profile_image"),
        );
        Self { path }
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored avatar reference, if one has been chosen.
    ///
    /// A missing or unreadable file means no avatar — callers degrade to a
    /// placeholder.
    pub fn load_avatar(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    /// Persist a newly chosen avatar reference.
    pub fn save_avatar(&self, reference: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, reference)?;
        Ok(())
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}
