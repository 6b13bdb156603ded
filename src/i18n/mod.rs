use crate::paths;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

pub const FALLBACK_LOCALE: &str = "en";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"%\{(\w+)\}").expect("valid placeholder regex"));

pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Flat `dotted.key -> text` lookup for one locale plus the fallback locale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Default::default()
        }
    }

    pub fn from_json(locale: impl Into<String>, messages: &serde_json::Value) -> Self {
        let mut catalog = Self::new(locale);
        flatten_into(&mut catalog.entries, "", messages);
        catalog
    }

    pub fn with_fallback(mut self, messages: &serde_json::Value) -> Self {
        flatten_into(&mut self.fallback, "", messages);
        self
    }

    /// Loads `<dir>/<locale>.json`, plus `<dir>/en.json` as fallback when the
    /// locale is not English and that file exists. A missing locale file
    /// leaves only the fallback; an unreadable or malformed one is an error.
    pub fn load(dir: &Path, locale: &str) -> Result<Self> {
        if !paths::is_safe_path_component(locale) {
            anyhow::bail!("Invalid locale name: {:?}", locale);
        }

        let locale_path = dir.join(format!("{}.json", locale));
        let mut catalog = if locale_path.exists() {
            Self::from_json(locale, &read_messages(&locale_path)?)
        } else {
            log::warn!("No translations for locale {} at {:?}", locale, locale_path);
            Self::new(locale)
        };

        let fallback_path = dir.join(format!("{}.json", FALLBACK_LOCALE));
        if locale != FALLBACK_LOCALE && fallback_path.exists() {
            catalog = catalog.with_fallback(&read_messages(&fallback_path)?);
        }

        log::info!("Loaded {} translation(s) for locale {}", catalog.len(), locale);
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    /// Translates `key` and substitutes `%{name}` placeholders. Placeholders
    /// without a matching argument are left untouched.
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(text) = self.get(key) else {
            log::debug!("Missing translation for {}.{}", self.locale, key);
            return format!("[{}.{}]", self.locale, key);
        };

        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                args.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.translate_with(key, &[])
    }
}

fn read_messages(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read translations from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                flatten_into(out, &key, v);
            }
        }
        serde_json::Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => log::debug!("Skipping non-text translation {}: {}", prefix, other),
    }
}
