use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// Host state that dynamic fields are evaluated against and that named
/// actions are dispatched to.
pub trait ButtonContext {
    /// Invokes the method called `name` on the context.
    fn call_action(&self, name: &str) -> Result<()>;

    /// Reads a dotted state path such as `topic.details.can_edit`.
    fn lookup(&self, _path: &str) -> Option<serde_json::Value> {
        None
    }
}

/// A field that is either fixed at registration or computed from the context
/// every time the visible list is built.
pub enum Dynamic<C, T> {
    Literal(T),
    Computed(Arc<dyn Fn(&C) -> T + Send + Sync>),
}

impl<C, T: Clone> Dynamic<C, T> {
    pub fn computed(f: impl Fn(&C) -> T + Send + Sync + 'static) -> Self {
        Dynamic::Computed(Arc::new(f))
    }

    pub fn resolve(&self, ctx: &C) -> T {
        match self {
            Dynamic::Literal(value) => value.clone(),
            Dynamic::Computed(f) => f(ctx),
        }
    }
}

impl<C> Dynamic<C, String> {
    /// An empty literal counts as unset. Computed text is only known at
    /// resolve time, so it always counts as present.
    pub fn is_present(&self) -> bool {
        match self {
            Dynamic::Literal(value) => !value.is_empty(),
            Dynamic::Computed(_) => true,
        }
    }
}

impl<C, T: Clone> Clone for Dynamic<C, T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Literal(value) => Dynamic::Literal(value.clone()),
            Dynamic::Computed(f) => Dynamic::Computed(Arc::clone(f)),
        }
    }
}

impl<C, T: fmt::Debug> fmt::Debug for Dynamic<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

pub enum ButtonAction<C> {
    /// Name of a method dispatched through [`ButtonContext::call_action`].
    Named(String),
    Callable(Arc<dyn Fn(&C) -> Result<()> + Send + Sync>),
}

impl<C> Clone for ButtonAction<C> {
    fn clone(&self) -> Self {
        match self {
            ButtonAction::Named(name) => ButtonAction::Named(name.clone()),
            ButtonAction::Callable(f) => ButtonAction::Callable(Arc::clone(f)),
        }
    }
}

impl<C> fmt::Debug for ButtonAction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ButtonAction::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

type Text<C> = Option<Dynamic<C, String>>;

/// A button as contributed by a plugin. `new` fills in the defaults, so a
/// descriptor is always field-complete once built.
///
/// `title`, `label` and `aria_label` hold translation keys; the
/// `translated_*` variants hold text that is used as-is.
pub struct ButtonDescriptor<C> {
    pub id: String,
    pub icon: Text<C>,
    pub title: Text<C>,
    pub translated_title: Text<C>,
    pub label: Text<C>,
    pub translated_label: Text<C>,
    pub aria_label: Text<C>,
    pub translated_aria_label: Text<C>,
    /// Shown in the overflow dropdown instead of inline.
    pub dropdown: Dynamic<C, bool>,
    pub class_names: Dynamic<C, Vec<String>>,
    /// State paths whose change should force the visible list to be rebuilt.
    pub dependent_keys: Vec<String>,
    pub displayed: Dynamic<C, bool>,
    pub disabled: Dynamic<C, bool>,
    /// Display order, higher comes first.
    pub priority: Dynamic<C, i32>,
    pub action: Option<ButtonAction<C>>,
}

impl<C> ButtonDescriptor<C> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            title: None,
            translated_title: None,
            label: None,
            translated_label: None,
            aria_label: None,
            translated_aria_label: None,
            dropdown: Dynamic::Literal(false),
            class_names: Dynamic::Literal(Vec::new()),
            dependent_keys: Vec::new(),
            displayed: Dynamic::Literal(true),
            disabled: Dynamic::Literal(false),
            priority: Dynamic::Literal(0),
            action: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(Dynamic::Literal(icon.into()));
        self
    }

    pub fn icon_with(mut self, f: impl Fn(&C) -> String + Send + Sync + 'static) -> Self {
        self.icon = Some(Dynamic::computed(f));
        self
    }

    pub fn title(mut self, key: impl Into<String>) -> Self {
        self.title = Some(Dynamic::Literal(key.into()));
        self
    }

    pub fn translated_title(mut self, text: impl Into<String>) -> Self {
        self.translated_title = Some(Dynamic::Literal(text.into()));
        self
    }

    pub fn label(mut self, key: impl Into<String>) -> Self {
        self.label = Some(Dynamic::Literal(key.into()));
        self
    }

    pub fn label_with(mut self, f: impl Fn(&C) -> String + Send + Sync + 'static) -> Self {
        self.label = Some(Dynamic::computed(f));
        self
    }

    pub fn translated_label(mut self, text: impl Into<String>) -> Self {
        self.translated_label = Some(Dynamic::Literal(text.into()));
        self
    }

    pub fn aria_label(mut self, key: impl Into<String>) -> Self {
        self.aria_label = Some(Dynamic::Literal(key.into()));
        self
    }

    pub fn translated_aria_label(mut self, text: impl Into<String>) -> Self {
        self.translated_aria_label = Some(Dynamic::Literal(text.into()));
        self
    }

    pub fn dropdown(mut self, dropdown: bool) -> Self {
        self.dropdown = Dynamic::Literal(dropdown);
        self
    }

    pub fn dropdown_when(mut self, f: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.dropdown = Dynamic::computed(f);
        self
    }

    pub fn class_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_names = Dynamic::Literal(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn dependent_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependent_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = Dynamic::Literal(displayed);
        self
    }

    pub fn displayed_when(mut self, f: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.displayed = Dynamic::computed(f);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Dynamic::Literal(disabled);
        self
    }

    pub fn disabled_when(mut self, f: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Dynamic::computed(f);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Dynamic::Literal(priority);
        self
    }

    pub fn priority_with(mut self, f: impl Fn(&C) -> i32 + Send + Sync + 'static) -> Self {
        self.priority = Dynamic::computed(f);
        self
    }

    pub fn action(mut self, method: impl Into<String>) -> Self {
        self.action = Some(ButtonAction::Named(method.into()));
        self
    }

    pub fn action_fn(mut self, f: impl Fn(&C) -> Result<()> + Send + Sync + 'static) -> Self {
        self.action = Some(ButtonAction::Callable(Arc::new(f)));
        self
    }

    /// True when the button has something to show: an icon or a title.
    pub fn has_display_content(&self) -> bool {
        [&self.icon, &self.title, &self.translated_title]
            .into_iter()
            .any(|field| field.as_ref().is_some_and(Dynamic::is_present))
    }
}

impl<C> Clone for ButtonDescriptor<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            icon: self.icon.clone(),
            title: self.title.clone(),
            translated_title: self.translated_title.clone(),
            label: self.label.clone(),
            translated_label: self.translated_label.clone(),
            aria_label: self.aria_label.clone(),
            translated_aria_label: self.translated_aria_label.clone(),
            dropdown: self.dropdown.clone(),
            class_names: self.class_names.clone(),
            dependent_keys: self.dependent_keys.clone(),
            displayed: self.displayed.clone(),
            disabled: self.disabled.clone(),
            priority: self.priority.clone(),
            action: self.action.clone(),
        }
    }
}

impl<C> fmt::Debug for ButtonDescriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonDescriptor")
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("translated_title", &self.translated_title)
            .field("label", &self.label)
            .field("translated_label", &self.translated_label)
            .field("aria_label", &self.aria_label)
            .field("translated_aria_label", &self.translated_aria_label)
            .field("dropdown", &self.dropdown)
            .field("class_names", &self.class_names)
            .field("dependent_keys", &self.dependent_keys)
            .field("displayed", &self.displayed)
            .field("disabled", &self.disabled)
            .field("priority", &self.priority)
            .field("action", &self.action)
            .finish()
    }
}
