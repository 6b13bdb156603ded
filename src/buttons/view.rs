use super::descriptor::ButtonContext;
use super::registry::ButtonRegistry;
use super::resolved::ResolvedButton;
use std::sync::Arc;

/// Caches the visible button list until a dependent key changes, the
/// registry itself changes, or the list is asked for with another context.
pub struct ButtonsView<C> {
    registry: Arc<ButtonRegistry<C>>,
    cached: Option<Vec<ResolvedButton>>,
    context: Option<Arc<C>>,
    generation: u64,
}

impl<C> ButtonsView<C> {
    pub fn new(registry: Arc<ButtonRegistry<C>>) -> Self {
        Self {
            registry,
            cached: None,
            context: None,
            generation: 0,
        }
    }

    pub fn dependent_keys(&self) -> Vec<String> {
        self.registry.dependent_keys()
    }

    /// Reports a state change at `path`. Returns true when the cached list
    /// was dropped because some button depends on that path.
    pub fn notify_changed(&mut self, path: &str) -> bool {
        let affected = self
            .registry
            .dependent_keys()
            .iter()
            .any(|key| paths_overlap(key, path));

        if affected && self.cached.take().is_some() {
            log::debug!("Topic buttons invalidated by change to {}", path);
        }
        affected
    }

    /// Drops the cached list unconditionally, e.g. after a state change the
    /// host cannot express as a path.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_stale(&self) -> bool {
        self.cached.is_none() || self.generation != self.registry.generation()
    }
}

impl<C: ButtonContext + 'static> ButtonsView<C> {
    /// Actions on the returned buttons are bound to `ctx`; a different context
    /// than the previous call always forces a rebuild.
    pub fn buttons(&mut self, ctx: &Arc<C>) -> &[ResolvedButton] {
        let same_context = self.context.as_ref().is_some_and(|last| Arc::ptr_eq(last, ctx));
        if !same_context || self.is_stale() {
            self.generation = self.registry.generation();
            self.context = Some(Arc::clone(ctx));
            self.cached = Some(self.registry.visible_buttons(ctx));
        }
        self.cached.as_deref().unwrap_or_default()
    }
}

/// `topic` and `topic.bookmarked` overlap: replacing the parent changes the
/// child and vice versa. `topic` and `topics` do not.
fn paths_overlap(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    long.strip_prefix(short)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
