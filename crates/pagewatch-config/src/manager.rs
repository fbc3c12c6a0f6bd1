use crate::{ClientConfig, ConfigError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ORG: &str = "io";
const AUTHOR: &str = "PageWatch";
const APP: &str = "PageWatch";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::at(dirs.config_dir().join("config.toml"))
    }

    /// Use an explicit config file, writing the defaults if it does not exist yet.
    pub fn at(config_path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = config_path.into();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let initial = ClientConfig::default();
            let content = toml::to_string_pretty(&initial)?;
            fs::write(&config_path, content)?;
            tracing::info!(path = %config_path.display(), "wrote default client config");
        }

        Ok(Self { config_path })
    }

    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        validate(&config)?;
        Ok(config)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        validate(config)?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.backend.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("backend.base_url is empty".to_string()));
    }
    if config.backend.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "backend.request_timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}
