use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use topic_buttons::config::AppConfig;
use topic_buttons::manifest::ManifestLoader;
use topic_buttons::{ButtonContext, ButtonRegistry, Catalog, ResolvedButton, Translator};

/// Topic state read from a JSON file; named actions are only logged.
struct TopicState {
    state: serde_json::Value,
}

impl ButtonContext for TopicState {
    fn call_action(&self, name: &str) -> Result<()> {
        log::info!("Dispatching topic action: {}", name);
        Ok(())
    }

    fn lookup(&self, path: &str) -> Option<serde_json::Value> {
        path.split('.')
            .try_fold(&self.state, |value, key| value.get(key))
            .cloned()
    }
}

fn load_catalog(config: &AppConfig) -> Arc<dyn Translator> {
    let catalog = config
        .effective_locales_dir()
        .and_then(|dir| Catalog::load(&dir, &config.locale));

    match catalog {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            log::warn!("Using empty translation catalog: {:#}", e);
            Arc::new(Catalog::new(config.locale.clone()))
        }
    }
}

fn load_state(path: Option<&str>) -> Result<serde_json::Value> {
    let Some(path) = path else {
        return Ok(serde_json::Value::Object(Default::default()));
    };
    let content = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read topic state from {}", path))?;
    serde_json::from_str(&content).context("Failed to parse topic state")
}

fn print_button(button: &ResolvedButton) {
    println!(
        "{:>4}  {:<20} {:<24} icon={} class=\"{}\"{}{}",
        button.priority,
        button.id,
        button.label.as_deref().or(button.title.as_deref()).unwrap_or("-"),
        button.icon.as_deref().unwrap_or("-"),
        button.class_names,
        if button.disabled { " disabled" } else { "" },
        if button.dropdown { " dropdown" } else { "" },
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::load()?;

    let registry: ButtonRegistry<TopicState> = ButtonRegistry::new(load_catalog(&config));
    let buttons_dir = config.effective_buttons_dir()?;
    let stored = ManifestLoader::register_all(&registry, &buttons_dir)?;
    log::info!("Registered {} topic button(s)", stored);

    let ctx = Arc::new(TopicState {
        state: load_state(args.first().map(String::as_str))?,
    });
    let buttons = registry.visible_buttons(&ctx);
    log::debug!("Dependent keys: {:?}", registry.dependent_keys());

    for button in &buttons {
        print_button(button);
    }

    if let Some(id) = args.get(1) {
        let button = buttons
            .iter()
            .find(|b| &b.id == id)
            .with_context(|| format!("Topic button not visible: {}", id))?;
        button.invoke()?;
    }

    Ok(())
}
