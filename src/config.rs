use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    if let Some(path) = option_env!("FACETAG_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    directories::ProjectDirs::from("", "", "facetag")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("facetag.toml"))
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Thumbnail crop inflation factor.
    pub inflate: f32,
    /// Default contact directory file, overridable per invocation.
    pub contacts: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inflate: facetag_vision::THUMBNAIL_INFLATE,
            contacts: None,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(&CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&CONFIG_PATH);
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
