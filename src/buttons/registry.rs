use super::descriptor::{ButtonContext, ButtonDescriptor, Dynamic};
use super::error::RegistrationError;
use super::events::{EventBus, RegistryEvent};
use super::resolved::{bind_action, ResolvedButton};
use crate::i18n::Translator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Stored,
    /// The id was already taken; the earlier registration is kept.
    Duplicate,
}

struct Entries<C> {
    order: Vec<Arc<ButtonDescriptor<C>>>,
    index: HashMap<String, usize>,
    generation: u64,
}

impl<C> Entries<C> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
            generation: 0,
        }
    }
}

/// Topic footer buttons keyed by id, kept in registration order.
pub struct ButtonRegistry<C> {
    translator: Arc<dyn Translator>,
    entries: Mutex<Entries<C>>,
    events: EventBus,
}

impl<C> ButtonRegistry<C> {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            entries: Mutex::new(Entries::new()),
            events: EventBus::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries<C>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a button, logging rather than returning a refusal so one bad
    /// descriptor cannot abort plugin initialization.
    pub fn register(&self, button: ButtonDescriptor<C>) {
        if let Err(e) = self.try_register(button) {
            log::error!("{}", e);
        }
    }

    pub fn try_register(&self, button: ButtonDescriptor<C>) -> Result<Registration, RegistrationError> {
        if button.id.is_empty() {
            return Err(RegistrationError::MissingId);
        }

        let mut entries = self.lock();
        if entries.index.contains_key(&button.id) {
            log::debug!("Topic button {} already registered, ignoring", button.id);
            return Ok(Registration::Duplicate);
        }

        if !button.has_display_content() {
            return Err(RegistrationError::MissingContent { id: button.id });
        }

        let id = button.id.clone();
        let position = entries.order.len();
        entries.order.push(Arc::new(button));
        entries.index.insert(id.clone(), position);
        entries.generation += 1;
        drop(entries);

        log::debug!("Registered topic button: {}", id);
        self.events.send(RegistryEvent::Registered { id });
        Ok(Registration::Stored)
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.order.clear();
        entries.index.clear();
        entries.generation += 1;
        drop(entries);

        self.events.send(RegistryEvent::Cleared);
    }

    pub fn get(&self, id: &str) -> Option<ButtonDescriptor<C>> {
        let entries = self.lock();
        entries
            .index
            .get(id)
            .map(|&position| (*entries.order[position]).clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.lock().order.iter().map(|b| b.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped by every successful registration and every clear.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Every stored button's dependent keys, flattened. Duplicates are kept
    /// and `displayed` is not consulted.
    pub fn dependent_keys(&self) -> Vec<String> {
        self.lock()
            .order
            .iter()
            .flat_map(|b| b.dependent_keys.iter().cloned())
            .collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    fn snapshot(&self) -> Vec<Arc<ButtonDescriptor<C>>> {
        self.lock().order.clone()
    }

    fn translate(&self, key: &Option<Dynamic<C, String>>, ctx: &C) -> Option<String> {
        text(key, ctx).map(|key| self.translator.translate(&key))
    }
}

impl<C: ButtonContext + 'static> ButtonRegistry<C> {
    /// Buttons to display for `ctx`, highest priority first. Buttons with
    /// equal priority keep their registration order.
    pub fn visible_buttons(&self, ctx: &Arc<C>) -> Vec<ResolvedButton> {
        let mut buttons: Vec<ResolvedButton> = self
            .snapshot()
            .iter()
            .filter(|button| button.displayed.resolve(ctx))
            .map(|button| self.resolve(button, ctx))
            .collect();

        buttons.sort_by(|a, b| b.priority.cmp(&a.priority));
        buttons
    }

    fn resolve(&self, button: &ButtonDescriptor<C>, ctx: &Arc<C>) -> ResolvedButton {
        let c: &C = ctx;

        let label = self
            .translate(&button.label, c)
            .or_else(|| text(&button.translated_label, c));
        let aria_label = self
            .translate(&button.aria_label, c)
            .or_else(|| text(&button.translated_aria_label, c))
            .or_else(|| label.clone());
        let title = self
            .translate(&button.title, c)
            .or_else(|| text(&button.translated_title, c));

        ResolvedButton::new(
            button.id.clone(),
            label,
            title,
            aria_label,
            text(&button.icon, c),
            button.class_names.resolve(c).join(" "),
            button.disabled.resolve(c),
            button.dropdown.resolve(c),
            button.priority.resolve(c),
            bind_action(&button.id, button.action.as_ref(), ctx),
        )
    }
}

fn text<C>(field: &Option<Dynamic<C, String>>, ctx: &C) -> Option<String> {
    field
        .as_ref()
        .map(|value| value.resolve(ctx))
        .filter(|value| !value.is_empty())
}
