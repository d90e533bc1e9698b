use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::images::POSTER_BASE_URL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub store: StoreConfig,

    pub tmdb: TmdbSettings,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
        }
    }
}

/// Identifiers of the hosted row store and its two tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub endpoint: String,

    pub project_id: String,

    /// Server API key. Client-side access with table permissions works
    /// without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub database_id: String,

    /// Table holding search popularity rows.
    pub search_table_id: String,

    /// Table holding saved movie rows.
    pub saved_table_id: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            api_key: None,
            database_id: String::new(),
            search_table_id: String::new(),
            saved_table_id: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub base_url: String,

    pub api_key: String,

    /// Prefix joined with TMDB poster paths when storing poster URLs.
    pub image_base_url: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
            image_base_url: POSTER_BASE_URL.to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Install a Prometheus recorder and print a snapshot after each command.
    pub metrics_enabled: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Overrides file values with `MARQUEE_*` variables found by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("MARQUEE_STORE_ENDPOINT") {
            self.store.endpoint = v;
        }
        if let Some(v) = get("MARQUEE_PROJECT_ID") {
            self.store.project_id = v;
        }
        if let Some(v) = get("MARQUEE_API_KEY") {
            self.store.api_key = Some(v);
        }
        if let Some(v) = get("MARQUEE_DATABASE_ID") {
            self.store.database_id = v;
        }
        if let Some(v) = get("MARQUEE_SEARCH_TABLE_ID") {
            self.store.search_table_id = v;
        }
        if let Some(v) = get("MARQUEE_SAVED_TABLE_ID") {
            self.store.saved_table_id = v;
        }
        if let Some(v) = get("MARQUEE_TMDB_API_KEY") {
            self.tmdb.api_key = v;
        }
        if let Some(v) = get("MARQUEE_LOG_LEVEL") {
            self.general.log_level = v;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("marquee").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".marquee").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("store.endpoint", &self.store.endpoint),
            ("store.project_id", &self.store.project_id),
            ("store.database_id", &self.store.database_id),
            ("store.search_table_id", &self.store.search_table_id),
            ("store.saved_table_id", &self.store.saved_table_id),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("{name} must be set (config file or environment)");
            }
        }

        url::Url::parse(&self.store.endpoint).context("store.endpoint is not a valid URL")?;

        if self.store.search_table_id == self.store.saved_table_id {
            anyhow::bail!("store.search_table_id and store.saved_table_id must differ");
        }

        Ok(())
    }
}
