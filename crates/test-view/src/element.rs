use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use chat_widget_view::{Element, Event, EventKind, Listener, Turn, escape_html};

use crate::{Document, lock};

#[derive(Default)]
struct State {
    id: Option<String>,
    text: String,
    markup: String,
    history: Vec<String>,
    scrolls: usize,
    fields: HashMap<String, String>,
    listeners: Vec<(EventKind, Listener)>,
}

/// An in-memory element.
///
/// Every mutation of the content is recorded, so tests can replay what the
/// user would have seen tick by tick.
pub struct TestElement {
    doc: Weak<Document>,
    state: Mutex<State>,
}

impl TestElement {
    pub(crate) fn new(doc: Weak<Document>) -> Arc<Self> {
        Arc::new(Self {
            doc,
            state: Mutex::default(),
        })
    }

    /// Returns the `id` attribute.
    pub fn id(&self) -> Option<String> {
        lock(&self.state).id.clone()
    }

    /// Returns the current text content.
    pub fn text(&self) -> String {
        lock(&self.state).text.clone()
    }

    /// Returns the current content as markup, with literal text escaped.
    pub fn markup(&self) -> String {
        lock(&self.state).markup.clone()
    }

    /// Returns the text content after each mutation, oldest first. The
    /// content the element was created with is not included.
    pub fn history(&self) -> Vec<String> {
        lock(&self.state).history.clone()
    }

    /// Returns how many times the element was scrolled to the bottom.
    pub fn scroll_count(&self) -> usize {
        lock(&self.state).scrolls
    }

    pub(crate) fn set_field(&self, name: &str, value: &str) {
        lock(&self.state)
            .fields
            .insert(name.to_owned(), value.to_owned());
    }

    pub(crate) fn listener_count(&self, kind: EventKind) -> usize {
        lock(&self.state)
            .listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub(crate) fn dispatch(&self, event: &Event) {
        // Listeners may call back into this element.
        let listeners: Vec<_> = lock(&self.state)
            .listeners
            .iter()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut State)) {
        let mut state = lock(&self.state);
        f(&mut state);
        let snapshot = state.text.clone();
        state.history.push(snapshot);
    }
}

impl Element for TestElement {
    fn text_content(&self) -> String {
        self.text()
    }

    fn set_text_content(&self, text: &str) {
        self.mutate(|state| {
            state.text = text.to_owned();
            state.markup = escape_html(text);
        });
    }

    fn append_text(&self, text: &str) {
        self.mutate(|state| {
            state.text.push_str(text);
            state.markup.push_str(&escape_html(text));
        });
    }

    fn append_markup(&self, markup: &str) {
        self.mutate(|state| {
            state.text.push_str(markup);
            state.markup.push_str(markup);
        });
    }

    fn append_turn(&self, turn: &Turn) {
        let Some(doc) = self.doc.upgrade() else {
            return;
        };
        let id = turn.id().map(|id| id.to_string());
        let message = Arc::new(TestElement {
            doc: self.doc.clone(),
            state: Mutex::new(State {
                id: id.clone(),
                text: turn.text().to_owned(),
                markup: escape_html(turn.text()),
                ..Default::default()
            }),
        });
        doc.register(turn.role(), id.as_deref(), message);
    }

    fn scroll_to_bottom(&self) {
        lock(&self.state).scrolls += 1;
    }

    fn field_value(&self, name: &str) -> Option<String> {
        lock(&self.state).fields.get(name).cloned()
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) {
        lock(&self.state).listeners.push((kind, listener));
    }
}
