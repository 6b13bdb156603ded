use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn is_safe_path_component(s: &str) -> bool {
    !s.is_empty()
        && !s.contains('/')
        && !s.contains('\\')
        && !s.contains('\0')
        && s != ".."
        && s != "."
}

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("topic-buttons"))
}

pub fn config_path() -> Result<PathBuf> {
    config_dir().map(|p| p.join("config.json"))
}

pub fn buttons_dir() -> Result<PathBuf> {
    config_dir().map(|p| p.join("buttons"))
}

pub fn locales_dir() -> Result<PathBuf> {
    config_dir().map(|p| p.join("locales"))
}
