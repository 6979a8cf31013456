//! Configuration management for modelpick.
//!
//! Loads configuration from ${MODELPICK_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::PREFERRED_MODEL_ID;
use crate::loader::OpenRouterSource;

/// Where the catalog is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `GET {catalog_url}/api/models`
    #[default]
    Backend,
    /// The OpenRouter model listing, fetched directly and cached.
    OpenRouter,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Backend => "backend",
            SourceKind::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(SourceKind::Backend),
            "openrouter" => Ok(SourceKind::OpenRouter),
            other => Err(format!(
                "unknown source '{other}' (expected 'backend' or 'openrouter')"
            )),
        }
    }
}

/// Direct OpenRouter source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub cache_ttl_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: OpenRouterSource::DEFAULT_BASE_URL.to_string(),
            cache_ttl_secs: OpenRouterSource::DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

impl OpenRouterConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for modelpick configuration and logs.
    //!
    //! MODELPICK_HOME resolution order:
    //! 1. MODELPICK_HOME environment variable (if set)
    //! 2. ~/.config/modelpick (default)

    use std::path::PathBuf;

    /// Returns the modelpick home directory.
    pub fn modelpick_home() -> PathBuf {
        if let Ok(home) = std::env::var("MODELPICK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".modelpick"),
            |h| h.join(".config").join("modelpick"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        modelpick_home().join("config.toml")
    }

    /// Returns the directory the picker writes its log file to.
    pub fn logs_dir() -> PathBuf {
        modelpick_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend serving `/api/models`
    pub catalog_url: String,

    /// Catalog source
    pub source: SourceKind,

    /// Model id default selection looks for first
    pub preferred_model: String,

    /// Timeout for catalog requests in seconds
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

impl Config {
    const DEFAULT_CATALOG_URL: &str = "http://localhost:2024";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Serializes the effective values as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize config to TOML")
    }

    /// Writes the default config template to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a config TOML from Rust defaults, keeping the template's comments.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = Config::default().to_toml()?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;
        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());
        Ok(doc.to_string())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: Self::DEFAULT_CATALOG_URL.to_string(),
            source: SourceKind::default(),
            preferred_model: PREFERRED_MODEL_ID.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            openrouter: OpenRouterConfig::default(),
        }
    }
}
