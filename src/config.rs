use crate::i18n::FALLBACK_LOCALE;
use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub locales_dir: Option<PathBuf>,
    #[serde(default)]
    pub buttons_dir: Option<PathBuf>,
}

fn default_locale() -> String {
    FALLBACK_LOCALE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            locales_dir: None,
            buttons_dir: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).context("Failed to read config.json")?;
        let config: AppConfig = serde_json::from_str(&content).context("Failed to parse config.json")?;
        Ok(config)
    }

    pub fn effective_locales_dir(&self) -> Result<PathBuf> {
        match &self.locales_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::locales_dir(),
        }
    }

    pub fn effective_buttons_dir(&self) -> Result<PathBuf> {
        match &self.buttons_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::buttons_dir(),
        }
    }
}
