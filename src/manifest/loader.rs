use super::ButtonManifest;
use crate::buttons::{ButtonContext, ButtonRegistry};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "buttons.toml";

#[derive(Debug, Clone)]
pub struct PluginButtons {
    pub plugin_id: String,
    pub manifest: ButtonManifest,
}

pub struct ManifestLoader;

impl ManifestLoader {
    /// Plugin directories are visited in name order so registration, and
    /// therefore tie-breaking between equal priorities, is deterministic.
    pub fn load_from_dir(dir: &Path) -> Result<Vec<PluginButtons>> {
        if !dir.exists() {
            log::warn!("Buttons directory does not exist: {:?}", dir);
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).context("Failed to read buttons directory")?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .filter(|p| !p.extension().is_some_and(|ext| ext == "backup"))
            .collect();
        paths.sort();

        let loaded: Vec<PluginButtons> = paths
            .iter()
            .filter_map(|path| Self::try_load(path))
            .collect();

        log::info!("Loaded button manifests from {} plugin(s)", loaded.len());
        Ok(loaded)
    }

    fn try_load(path: &Path) -> Option<PluginButtons> {
        match Self::load(path) {
            Ok(loaded) => {
                log::info!(
                    "Loaded {} button(s) from plugin {}",
                    loaded.manifest.buttons.len(),
                    loaded.plugin_id
                );
                Some(loaded)
            }
            Err(e) => {
                log::warn!("Failed to load buttons from {:?}: {:#}", path, e);
                None
            }
        }
    }

    pub fn load(path: &Path) -> Result<PluginButtons> {
        let manifest_path = path.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            anyhow::bail!("No {} found in {:?}", MANIFEST_FILE, path);
        }

        let content = fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", MANIFEST_FILE))?;

        let manifest: ButtonManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", MANIFEST_FILE))?;

        let plugin_id = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("Invalid plugin directory name")?
            .to_string();

        Ok(PluginButtons { plugin_id, manifest })
    }

    /// Registers every button found under `dir`. Returns how many were stored;
    /// refused descriptors and duplicate ids are logged and skipped.
    pub fn register_all<C>(registry: &ButtonRegistry<C>, dir: &Path) -> Result<usize>
    where
        C: ButtonContext + 'static,
    {
        let before = registry.len();
        for plugin in Self::load_from_dir(dir)? {
            for spec in plugin.manifest.buttons {
                log::debug!("Registering button {:?} from plugin {}", spec.id, plugin.plugin_id);
                registry.register(spec.into_descriptor());
            }
        }
        Ok(registry.len() - before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct NoopCtx;

    impl ButtonContext for NoopCtx {
        fn call_action(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    const VALID_MANIFEST: &str = r#"
[[button]]
id = "share"
icon = "link"
priority = 1
"#;

    fn write_plugin(root: &Path, name: &str, manifest: &str) {
        let plugin_dir = root.join(name);
        fs::create_dir(&plugin_dir).unwrap();
        fs::write(plugin_dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    #[test]
    fn load_from_dir_returns_empty_when_no_valid_plugins() {
        let temp_dir = TempDir::new().unwrap();

        // Empty dir
        assert!(ManifestLoader::load_from_dir(temp_dir.path()).unwrap().is_empty());

        // File instead of dir
        fs::write(temp_dir.path().join("file.txt"), "content").unwrap();
        assert!(ManifestLoader::load_from_dir(temp_dir.path()).unwrap().is_empty());

        // Dir without manifest
        fs::create_dir(temp_dir.path().join("no-manifest")).unwrap();
        assert!(ManifestLoader::load_from_dir(temp_dir.path()).unwrap().is_empty());

        // Nonexistent dir
        let nonexistent = PathBuf::from("/nonexistent/path");
        assert!(ManifestLoader::load_from_dir(&nonexistent).unwrap().is_empty());
    }

    #[test]
    fn load_extracts_plugin_id_from_directory_name() {
        let temp_dir = TempDir::new().unwrap();
        write_plugin(temp_dir.path(), "discourse-sharing", VALID_MANIFEST);

        let loaded = ManifestLoader::load(&temp_dir.path().join("discourse-sharing")).unwrap();

        assert_eq!(loaded.plugin_id, "discourse-sharing");
        assert_eq!(loaded.manifest.buttons[0].id, "share");
    }

    #[test]
    fn load_fails_for_invalid_dirs() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ManifestLoader::load(temp_dir.path()).is_err());

        fs::write(temp_dir.path().join(MANIFEST_FILE), "invalid {{{").unwrap();
        assert!(ManifestLoader::load(temp_dir.path()).is_err());
    }

    #[test]
    fn load_from_dir_skips_backup_and_broken_plugins() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        write_plugin(temp_dir.path(), "valid", VALID_MANIFEST);
        write_plugin(temp_dir.path(), "old.backup", VALID_MANIFEST);
        write_plugin(temp_dir.path(), "broken", "not valid toml {{{");

        // Act
        let loaded = ManifestLoader::load_from_dir(temp_dir.path()).unwrap();

        // Assert
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].plugin_id, "valid");
    }

    #[test]
    fn register_all_counts_stored_buttons_and_first_plugin_wins() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        write_plugin(temp_dir.path(), "a-plugin", VALID_MANIFEST);
        write_plugin(
            temp_dir.path(),
            "b-plugin",
            r#"
[[button]]
id = "share"
icon = "other"

[[button]]
id = "flag"
translated_title = "Flag"

[[button]]
id = "no-content"
label = "x.label"
"#,
        );
        let registry: ButtonRegistry<NoopCtx> = ButtonRegistry::new(Arc::new(|key: &str| key.to_string()));

        // Act
        let stored = ManifestLoader::register_all(&registry, temp_dir.path()).unwrap();

        // Assert
        assert_eq!(stored, 2);
        assert_eq!(registry.ids(), ["share", "flag"]);
        let share = registry.get("share").unwrap();
        assert_eq!(share.icon.unwrap().resolve(&NoopCtx), "link");
    }
}
