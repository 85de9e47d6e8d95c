//! A view host that renders the widget into the terminal.
//!
//! User turns are printed as plain lines. Each bot turn gets its own
//! progress line, so the loader dots and the typing animation redraw in
//! place instead of scrolling the terminal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chat_widget::view::{
    Element, ElementRef, Event, EventKind, Listener, Role, Turn, ViewHost,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";
const PROMPT_FIELD: &str = "prompt";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The terminal, seen as the widget's subtree.
pub struct TerminalView {
    form: Arc<Form>,
    transcript: Arc<Transcript>,
    alerts: Mutex<Vec<String>>,
}

impl TerminalView {
    /// Creates a view with an empty form and an empty transcript.
    pub fn new() -> Arc<Self> {
        let style = ProgressStyle::with_template("{prefix} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        Arc::new(Self {
            form: Arc::new(Form::default()),
            transcript: Arc::new(Transcript {
                messages: Default::default(),
                style,
            }),
            alerts: Default::default(),
        })
    }

    /// Puts `prompt` into the form and submits it. Returns whether a
    /// listener took over the submission.
    pub fn submit_prompt(&self, prompt: &str) -> bool {
        lock(&self.form.fields)
            .insert(PROMPT_FIELD.to_owned(), prompt.to_owned());
        let event = Event::submit();
        self.form.dispatch(&event);
        event.is_default_prevented()
    }

    /// Freezes every bot line in its final state and prints the alerts
    /// raised in the meantime.
    pub fn flush(&self) {
        let messages: Vec<_> = lock(&self.transcript.messages)
            .drain()
            .map(|(_, message)| message)
            .collect();
        for message in messages {
            message.bar.finish();
            if message.bar.is_hidden() {
                println!("{}🤖 {}", BAR_CHAR.bright_cyan(), message.text());
            }
        }

        for alert in lock(&self.alerts).drain(..) {
            let bar = BAR_CHAR.bright_yellow();
            println!("{bar}⚠️  {}", alert.bright_white());
        }
    }
}

impl ViewHost for TerminalView {
    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        match selector {
            "form" => Some(Arc::clone(&self.form) as ElementRef),
            "#container" => Some(Arc::clone(&self.transcript) as ElementRef),
            _ => selector
                .strip_prefix('#')
                .and_then(|id| self.element_by_id(id)),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        lock(&self.transcript.messages)
            .get(id)
            .map(|message| Arc::clone(message) as ElementRef)
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_owned());
    }
}

#[derive(Default)]
struct Form {
    fields: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<(EventKind, Listener)>>,
}

impl Form {
    fn dispatch(&self, event: &Event) {
        let listeners: Vec<_> = lock(&self.listeners)
            .iter()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl Element for Form {
    fn text_content(&self) -> String {
        String::new()
    }

    fn set_text_content(&self, _text: &str) {}

    fn append_markup(&self, _markup: &str) {}

    fn append_turn(&self, _turn: &Turn) {
        warn!("turns can only be appended to the transcript");
    }

    fn scroll_to_bottom(&self) {}

    fn field_value(&self, name: &str) -> Option<String> {
        lock(&self.fields).get(name).cloned()
    }

    fn add_event_listener(&self, kind: EventKind, listener: Listener) {
        lock(&self.listeners).push((kind, listener));
    }
}

struct Transcript {
    messages: Mutex<HashMap<String, Arc<Message>>>,
    style: ProgressStyle,
}

impl Element for Transcript {
    fn text_content(&self) -> String {
        String::new()
    }

    fn set_text_content(&self, _text: &str) {}

    fn append_markup(&self, _markup: &str) {}

    fn append_turn(&self, turn: &Turn) {
        match (turn.role(), turn.id()) {
            (Role::Bot, Some(id)) => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(self.style.clone());
                bar.set_prefix(format!("{}🤖", BAR_CHAR.bright_cyan()));
                bar.set_message(turn.text().to_owned());
                let message = Message {
                    text: Mutex::new(turn.text().to_owned()),
                    bar,
                };
                lock(&self.messages).insert(id.to_string(), Arc::new(message));
            }
            _ => {
                println!("{}👤 {}", BAR_CHAR.bright_green(), turn.text());
            }
        }
    }

    // The terminal scrolls by itself.
    fn scroll_to_bottom(&self) {}

    fn field_value(&self, _name: &str) -> Option<String> {
        None
    }

    fn add_event_listener(&self, kind: EventKind, _listener: Listener) {
        trace!("transcript never fires {kind:?}");
    }
}

struct Message {
    text: Mutex<String>,
    bar: ProgressBar,
}

impl Message {
    fn text(&self) -> String {
        lock(&self.text).clone()
    }
}

impl Element for Message {
    fn text_content(&self) -> String {
        self.text()
    }

    fn set_text_content(&self, text: &str) {
        let mut current = lock(&self.text);
        *current = text.to_owned();
        self.bar.set_message(current.clone());
    }

    fn append_text(&self, text: &str) {
        let mut current = lock(&self.text);
        current.push_str(text);
        self.bar.set_message(current.clone());
    }

    // No markup in a terminal, it shows up as typed.
    fn append_markup(&self, markup: &str) {
        self.append_text(markup);
    }

    fn append_turn(&self, _turn: &Turn) {
        warn!("turns can only be appended to the transcript");
    }

    fn scroll_to_bottom(&self) {}

    fn field_value(&self, _name: &str) -> Option<String> {
        None
    }

    fn add_event_listener(&self, _kind: EventKind, _listener: Listener) {}
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chat_widget::view::{Avatars, MessageId, Speaker, render_turn};

    use super::*;

    #[test]
    fn test_selectors() {
        let view = TerminalView::new();
        assert!(view.query_selector("form").is_some());
        assert!(view.query_selector("#container").is_some());
        assert!(view.query_selector("#nope").is_none());
    }

    #[test]
    fn test_bot_turns_are_addressable() {
        let view = TerminalView::new();
        let id = MessageId::from_parts(1, 2);
        let turn =
            render_turn(Speaker::Bot(id.clone()), " ", &Avatars::default());
        view.query_selector("#container").unwrap().append_turn(&turn);

        let message = view.element_by_id(id.as_str()).unwrap();
        assert_eq!(message.text_content(), " ");
        message.set_text_content("");
        message.append_text("hi");
        assert_eq!(message.text_content(), "hi");

        view.flush();
        assert!(view.element_by_id(id.as_str()).is_none());
    }

    #[test]
    fn test_submit_prompt() {
        let view = TerminalView::new();
        assert!(!view.submit_prompt("ignored"));

        let calls = Arc::new(AtomicUsize::new(0));
        let form = view.query_selector("form").unwrap();
        form.add_event_listener(EventKind::Submit, {
            let calls = Arc::clone(&calls);
            Arc::new(move |event: &Event| {
                calls.fetch_add(1, Ordering::SeqCst);
                event.prevent_default();
            })
        });

        assert!(view.submit_prompt("hello"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(form.field_value(PROMPT_FIELD).as_deref(), Some("hello"));
    }
}
