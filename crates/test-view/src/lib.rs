//! An in-memory view host for testing purpose.

mod element;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chat_widget_view::{ElementRef, Event, EventKind, Role, ViewHost};

pub use element::TestElement;

/// One entry in the fake transcript, as the user would see it now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub role: Role,
    pub id: Option<String>,
    pub text: String,
}

#[derive(Default)]
pub(crate) struct Document {
    by_id: Mutex<HashMap<String, Arc<TestElement>>>,
    transcript: Mutex<Vec<(Role, Arc<TestElement>)>>,
    alerts: Mutex<Vec<String>>,
}

impl Document {
    pub(crate) fn register(
        &self,
        role: Role,
        id: Option<&str>,
        element: Arc<TestElement>,
    ) {
        if let Some(id) = id {
            lock(&self.by_id).insert(id.to_owned(), Arc::clone(&element));
        }
        lock(&self.transcript).push((role, element));
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fake host: one form with named fields, one `#container` transcript,
/// and an alert log.
///
/// Elements appended through [`chat_widget_view::Element::append_turn`] on
/// the container become addressable by id, like in a real document.
///
/// # Note
///
/// Markup is not parsed. Raw markup appended to an element shows up
/// verbatim in its text content.
pub struct TestView {
    doc: Arc<Document>,
    form: Option<Arc<TestElement>>,
    container: Option<Arc<TestElement>>,
}

impl TestView {
    /// Creates a view with both a form and a container.
    pub fn new() -> Arc<Self> {
        Self::with_parts(true, true)
    }

    /// Creates a view that lacks a transcript container.
    pub fn without_container() -> Arc<Self> {
        Self::with_parts(true, false)
    }

    /// Creates a view that lacks a form.
    pub fn without_form() -> Arc<Self> {
        Self::with_parts(false, true)
    }

    fn with_parts(form: bool, container: bool) -> Arc<Self> {
        let doc = Arc::new(Document::default());
        let weak: Weak<Document> = Arc::downgrade(&doc);
        Arc::new(Self {
            form: form.then(|| TestElement::new(weak.clone())),
            container: container.then(|| TestElement::new(weak.clone())),
            doc,
        })
    }

    /// Returns the form element.
    ///
    /// # Panics
    ///
    /// Panics if the view was created without a form.
    pub fn form(&self) -> &Arc<TestElement> {
        self.form.as_ref().expect("view has no form")
    }

    /// Returns the transcript container.
    ///
    /// # Panics
    ///
    /// Panics if the view was created without a container.
    pub fn container(&self) -> &Arc<TestElement> {
        self.container.as_ref().expect("view has no container")
    }

    /// Sets the value of a form field.
    pub fn set_field(&self, name: &str, value: &str) {
        self.form().set_field(name, value);
    }

    /// Dispatches a submit event on the form and returns it.
    pub fn submit(&self) -> Event {
        let event = Event::submit();
        self.form().dispatch(&event);
        event
    }

    /// Dispatches a key release event on the form and returns it.
    pub fn key_up(&self, key: &str) -> Event {
        let event = Event::key_up(key);
        self.form().dispatch(&event);
        event
    }

    /// Returns the element registered under `id`.
    pub fn element(&self, id: &str) -> Option<Arc<TestElement>> {
        lock(&self.doc.by_id).get(id).cloned()
    }

    /// Returns the transcript in order, with each entry's current text.
    pub fn transcript(&self) -> Vec<Entry> {
        lock(&self.doc.transcript)
            .iter()
            .map(|(role, element)| Entry {
                role: *role,
                id: element.id(),
                text: element.text(),
            })
            .collect()
    }

    /// Returns every alert raised so far, in order.
    pub fn alerts(&self) -> Vec<String> {
        lock(&self.doc.alerts).clone()
    }

    /// Returns how many listeners are registered on the form for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.form().listener_count(kind)
    }
}

impl ViewHost for TestView {
    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        let element = match selector {
            "form" => self.form.clone(),
            "#container" => self.container.clone(),
            _ => selector.strip_prefix('#').and_then(|id| self.element(id)),
        };
        element.map(|element| element as ElementRef)
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.element(id).map(|element| element as ElementRef)
    }

    fn alert(&self, message: &str) {
        lock(&self.doc.alerts).push(message.to_owned());
    }
}
