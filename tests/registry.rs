use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use topic_buttons::{ButtonContext, ButtonDescriptor, ButtonRegistry, ButtonsView, Catalog, Translator};

#[derive(Default)]
struct TopicController {
    bookmarked: AtomicBool,
    invoked: Mutex<Vec<String>>,
}

impl TopicController {
    fn is_bookmarked(&self) -> bool {
        self.bookmarked.load(Ordering::SeqCst)
    }
}

impl ButtonContext for TopicController {
    fn call_action(&self, name: &str) -> Result<()> {
        match name {
            "toggleBookmark" | "share" => {
                self.invoked.lock().unwrap().push(name.to_string());
                Ok(())
            }
            other => anyhow::bail!("No such topic action: {}", other),
        }
    }
}

fn catalog() -> Arc<dyn Translator> {
    let mut catalog = Catalog::new("en");
    catalog.insert("topic.bookmark.title", "Bookmark");
    catalog.insert("topic.bookmark.help", "bookmark this topic");
    catalog.insert("topic.share.title", "Share");
    Arc::new(catalog)
}

fn registry() -> ButtonRegistry<TopicController> {
    ButtonRegistry::new(catalog())
}

#[test]
fn plugin_buttons_resolve_for_display() {
    // Arrange
    let registry = registry();
    registry.register(
        ButtonDescriptor::new("bookmark")
            .icon("bookmark")
            .title("topic.bookmark.help")
            .label("topic.bookmark.title")
            .class_names(["bookmark", "with-label"])
            .dependent_keys(["topic.bookmarked"])
            .disabled_when(|ctx: &TopicController| ctx.is_bookmarked())
            .priority(10)
            .action("toggleBookmark"),
    );
    registry.register(
        ButtonDescriptor::new("share")
            .icon("link")
            .label("topic.share.title")
            .priority(20)
            .action("share"),
    );
    let ctx = Arc::new(TopicController::default());

    // Act
    let buttons = registry.visible_buttons(&ctx);

    // Assert
    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].id, "share");
    assert_eq!(buttons[0].aria_label.as_deref(), Some("Share"));
    let bookmark = &buttons[1];
    assert_eq!(bookmark.label.as_deref(), Some("Bookmark"));
    assert_eq!(bookmark.title.as_deref(), Some("bookmark this topic"));
    assert_eq!(bookmark.aria_label.as_deref(), Some("Bookmark"));
    assert_eq!(bookmark.class_names, "bookmark with-label");
    assert!(!bookmark.disabled);
    assert_eq!(registry.dependent_keys(), ["topic.bookmarked"]);
}

#[test]
fn actions_dispatch_to_controller() {
    // Arrange
    let registry = registry();
    registry.register(ButtonDescriptor::new("bookmark").icon("bookmark").action("toggleBookmark"));
    registry.register(ButtonDescriptor::new("broken").icon("x").action("missingMethod"));
    let ctx = Arc::new(TopicController::default());
    let buttons = registry.visible_buttons(&ctx);

    // Act
    let ok = buttons[0].invoke();
    let err = buttons[1].invoke();

    // Assert
    assert!(ok.is_ok());
    assert!(err.unwrap_err().to_string().contains("missingMethod"));
    assert_eq!(*ctx.invoked.lock().unwrap(), ["toggleBookmark"]);
}

#[test]
fn missing_translation_is_marked() {
    let registry = registry();
    registry.register(ButtonDescriptor::new("flag").icon("flag").label("topic.flag.title"));
    let ctx = Arc::new(TopicController::default());

    let buttons = registry.visible_buttons(&ctx);

    assert_eq!(buttons[0].label.as_deref(), Some("[en.topic.flag.title]"));
}

#[test]
fn invalid_registrations_never_surface() {
    // Arrange
    let registry = registry();

    // Act
    registry.register(ButtonDescriptor::new("").icon("x"));
    registry.register(ButtonDescriptor::new("no-content").label("topic.share.title"));
    registry.register(ButtonDescriptor::new("ok").translated_title("OK"));

    // Assert
    let ctx = Arc::new(TopicController::default());
    let ids: Vec<String> = registry.visible_buttons(&ctx).into_iter().map(|b| b.id).collect();
    assert_eq!(ids, ["ok"]);
}

#[test]
fn view_recomputes_after_dependent_change() {
    // Arrange
    let registry = Arc::new(registry());
    registry.register(
        ButtonDescriptor::new("bookmark")
            .icon("bookmark")
            .dependent_keys(["topic.bookmarked"])
            .disabled_when(|ctx: &TopicController| ctx.is_bookmarked()),
    );
    let mut view = ButtonsView::new(Arc::clone(&registry));
    let ctx = Arc::new(TopicController::default());

    // Act
    let disabled_before = view.buttons(&ctx)[0].disabled;
    ctx.bookmarked.store(true, Ordering::SeqCst);
    let cached = view.buttons(&ctx)[0].disabled;
    view.notify_changed("topic.bookmarked");
    let disabled_after = view.buttons(&ctx)[0].disabled;

    // Assert
    assert!(!disabled_before);
    assert!(!cached);
    assert!(disabled_after);
}

#[test]
fn view_dispatches_to_latest_controller() {
    // Arrange
    let registry = Arc::new(registry());
    registry.register(ButtonDescriptor::new("bookmark").icon("bookmark").action("toggleBookmark"));
    let mut view = ButtonsView::new(Arc::clone(&registry));
    let previous = Arc::new(TopicController::default());
    let current = Arc::new(TopicController::default());
    view.buttons(&previous);

    // Act
    view.buttons(&current)[0].invoke().unwrap();

    // Assert
    assert!(previous.invoked.lock().unwrap().is_empty());
    assert_eq!(*current.invoked.lock().unwrap(), ["toggleBookmark"]);
}
