use std::fmt::{self, Debug};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Turn;

/// A shared reference to an element owned by the host.
pub type ElementRef = Arc<dyn Element>;

/// A callback registered for an event on an element.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// The events the widget listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A form was submitted.
    Submit,
    /// A key was released while the element had focus.
    KeyUp,
}

/// An event dispatched by the host to registered listeners.
pub struct Event {
    kind: EventKind,
    key: Option<String>,
    default_prevented: AtomicBool,
}

impl Event {
    /// Creates a form submission event.
    #[inline]
    pub fn submit() -> Self {
        Self {
            kind: EventKind::Submit,
            key: None,
            default_prevented: AtomicBool::new(false),
        }
    }

    /// Creates a key release event. `key` is the key name, e.g. `Enter`.
    #[inline]
    pub fn key_up<S: Into<String>>(key: S) -> Self {
        Self {
            kind: EventKind::KeyUp,
            key: Some(key.into()),
            default_prevented: AtomicBool::new(false),
        }
    }

    /// Returns the kind of this event.
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the released key, for key events.
    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Tells the host not to run its default action for this event.
    #[inline]
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::Relaxed);
    }

    /// Returns whether a listener called [`Event::prevent_default`].
    #[inline]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Relaxed)
    }
}

impl Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("default_prevented", &self.is_default_prevented())
            .finish()
    }
}

/// A node in the host's view.
///
/// All methods take `&self`: elements are shared handles, and the host is
/// responsible for its own interior mutability. Text passed to the `*_text*`
/// methods is literal and must be escaped by the host if it renders markup.
pub trait Element: Send + Sync {
    /// Returns the element's text content.
    fn text_content(&self) -> String;

    /// Replaces the element's content with literal text.
    fn set_text_content(&self, text: &str);

    /// Appends literal text to the element's content.
    fn append_text(&self, text: &str) {
        let mut content = self.text_content();
        content.push_str(text);
        self.set_text_content(&content);
    }

    /// Appends raw markup to the element's content, without escaping.
    fn append_markup(&self, markup: &str);

    /// Appends a rendered transcript entry as a child of this element.
    fn append_turn(&self, turn: &Turn);

    /// Scrolls the element so that its last child is visible.
    fn scroll_to_bottom(&self);

    /// Reads the value of the named field, if this element is a form that
    /// has one.
    fn field_value(&self, name: &str) -> Option<String>;

    /// Registers a listener for events of the given kind.
    fn add_event_listener(&self, kind: EventKind, listener: Listener);
}

/// The subtree rendered for the widget.
pub trait ViewHost: Send + Sync {
    /// Returns the first element matching a selector, e.g. `form` or
    /// `#container`.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;

    /// Returns the element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// Shows a blocking message to the user.
    fn alert(&self, message: &str);
}
