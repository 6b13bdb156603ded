pub mod loader;

pub use loader::ManifestLoader;

use crate::buttons::{ButtonContext, ButtonDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ButtonManifest {
    #[serde(default, rename = "button")]
    pub buttons: Vec<ButtonSpec>,
}

/// A button declared in `buttons.toml`. Conditions name state paths that are
/// looked up on the context when the visible list is built.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ButtonSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub translated_title: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub translated_label: Option<String>,
    #[serde(default)]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub translated_aria_label: Option<String>,
    #[serde(default)]
    pub dropdown: bool,
    #[serde(default)]
    pub class_names: Vec<String>,
    #[serde(default)]
    pub dependent_keys: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub displayed_if: Option<String>,
    #[serde(default)]
    pub hidden_if: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub disabled_if: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

impl ButtonSpec {
    pub fn into_descriptor<C: ButtonContext + 'static>(self) -> ButtonDescriptor<C> {
        let mut button = ButtonDescriptor::new(self.id)
            .dropdown(self.dropdown)
            .class_names(self.class_names)
            .dependent_keys(self.dependent_keys)
            .priority(self.priority)
            .disabled(self.disabled);

        if let Some(icon) = self.icon {
            button = button.icon(icon);
        }
        if let Some(title) = self.title {
            button = button.title(title);
        }
        if let Some(text) = self.translated_title {
            button = button.translated_title(text);
        }
        if let Some(label) = self.label {
            button = button.label(label);
        }
        if let Some(text) = self.translated_label {
            button = button.translated_label(text);
        }
        if let Some(aria_label) = self.aria_label {
            button = button.aria_label(aria_label);
        }
        if let Some(text) = self.translated_aria_label {
            button = button.translated_aria_label(text);
        }

        let (shown, hidden) = (self.displayed_if, self.hidden_if);
        if shown.is_some() || hidden.is_some() {
            button = button.displayed_when(move |ctx: &C| {
                shown.as_deref().map_or(true, |path| truthy(ctx.lookup(path)))
                    && !hidden.as_deref().is_some_and(|path| truthy(ctx.lookup(path)))
            });
        }
        if let Some(path) = self.disabled_if {
            button = button.disabled_when(move |ctx: &C| truthy(ctx.lookup(&path)));
        }
        if let Some(method) = self.action {
            button = button.action(method);
        }

        button
    }
}

/// JSON truthiness: absent, `null`, `false`, `0`, `""` and `[]` are false.
pub fn truthy(value: Option<serde_json::Value>) -> bool {
    use serde_json::Value;

    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}
