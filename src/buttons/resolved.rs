use super::descriptor::{ButtonAction, ButtonContext};
use anyhow::Result;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

type BoundAction = Rc<dyn Fn() -> Result<()>>;

/// A button ready for display: text translated, dynamic fields evaluated
/// and the action bound to the context it was resolved against.
#[derive(Clone)]
pub struct ResolvedButton {
    pub id: String,
    pub label: Option<String>,
    pub title: Option<String>,
    pub aria_label: Option<String>,
    pub icon: Option<String>,
    /// Space separated, ready for a `class` attribute.
    pub class_names: String,
    pub disabled: bool,
    pub dropdown: bool,
    pub priority: i32,
    action: BoundAction,
}

impl ResolvedButton {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        label: Option<String>,
        title: Option<String>,
        aria_label: Option<String>,
        icon: Option<String>,
        class_names: String,
        disabled: bool,
        dropdown: bool,
        priority: i32,
        action: BoundAction,
    ) -> Self {
        Self {
            id,
            label,
            title,
            aria_label,
            icon,
            class_names,
            disabled,
            dropdown,
            priority,
            action,
        }
    }

    pub fn invoke(&self) -> Result<()> {
        log::debug!("Invoking topic button: {}", self.id);
        (self.action)()
    }
}

impl fmt::Debug for ResolvedButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("title", &self.title)
            .field("aria_label", &self.aria_label)
            .field("icon", &self.icon)
            .field("class_names", &self.class_names)
            .field("disabled", &self.disabled)
            .field("dropdown", &self.dropdown)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

pub(crate) fn bind_action<C>(id: &str, action: Option<&ButtonAction<C>>, ctx: &Arc<C>) -> BoundAction
where
    C: ButtonContext + 'static,
{
    let ctx = Arc::clone(ctx);
    match action {
        Some(ButtonAction::Callable(f)) => {
            let f = Arc::clone(f);
            Rc::new(move || f(&*ctx))
        }
        Some(ButtonAction::Named(name)) => {
            let name = name.clone();
            Rc::new(move || ctx.call_action(&name))
        }
        None => {
            let id = id.to_string();
            Rc::new(move || Err(anyhow::anyhow!("Topic button {} has no action", id)))
        }
    }
}
