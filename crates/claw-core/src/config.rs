use crate::error::ConfigError;
use crate::mode::WizardMode;
use claw_api::HttpConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Serialized settings from ~/.claw/config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub default_mode: WizardMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            default_mode: WizardMode::Standard,
        }
    }
}

impl Config {
    /// Replace the backend URL and key with any non-empty override.
    pub fn apply_overrides(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    /// Connection settings for the HTTP client.
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

/// Helper struct for storing the location to read/write global settings
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            path: Self::home().join("config.json"),
        }
    }

    /// Create with a custom file path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.claw`, or `./.claw` when there is no home directory.
    pub fn home() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".claw")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the user's saved config, or fallback to Default
    pub fn load(&self) -> Config {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable config");
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    /// Save the user's config back to disk
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Store an API key. The key is trimmed and must not be blank.
    pub fn store_api_key(&self, key: &str) -> Result<Config, ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Invalid("API Key is required".to_string()));
        }
        let mut config = self.load();
        config.api_key = Some(key.to_string());
        self.save(&config)?;
        Ok(config)
    }
}
