mod builder;
mod pipeline;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chat_widget_view::{ElementRef, Event, EventKind, MessageId, ViewHost};

use crate::config::{EnterKeySubmit, WidgetConfig};
use crate::error::Error;
use crate::reply_client::ReplyClient;
pub use builder::ChatWidgetBuilder;
pub use pipeline::{Outcome, PendingReply, Stage};
use pipeline::InFlight;

const FORM_SELECTOR: &str = "form";
const CONTAINER_SELECTOR: &str = "#container";

/// A chat widget bound to a view host and a reply provider.
///
/// The widget is a cheap handle, clones share the same state. Each
/// submission runs independently: it owns its placeholder element, its
/// loader and its reply, so submissions made while another one is still
/// waiting don't interfere with each other.
#[derive(Clone)]
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

struct WidgetInner {
    host: Arc<dyn ViewHost>,
    client: ReplyClient,
    config: WidgetConfig,
    bound: OnceLock<Bound>,
    in_flight: Mutex<HashMap<MessageId, InFlight>>,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

struct Bound {
    form: ElementRef,
    container: ElementRef,
}

impl ChatWidget {
    /// Binds the widget to its view: finds the form and the transcript
    /// container, and registers the submit and key-release listeners on the
    /// form.
    ///
    /// Call this once the host has rendered the widget's subtree. It can
    /// only succeed once per widget.
    pub fn attach(&self) -> Result<(), Error> {
        let inner = &self.inner;
        if inner.bound.get().is_some() {
            return Err(Error::already_attached());
        }

        let form = inner.host.query_selector(FORM_SELECTOR).ok_or_else(|| {
            Error::missing_element()
                .with_reason(format!("no `{FORM_SELECTOR}` in view"))
        })?;
        let container = inner
            .host
            .query_selector(CONTAINER_SELECTOR)
            .ok_or_else(|| {
                Error::missing_element()
                    .with_reason(format!("no `{CONTAINER_SELECTOR}` in view"))
            })?;
        let bound = Bound {
            form: Arc::clone(&form),
            container,
        };
        if inner.bound.set(bound).is_err() {
            return Err(Error::already_attached());
        }

        // Listeners hold weak references, otherwise the form would keep the
        // widget alive through its own listener list.
        let weak = Arc::downgrade(&self.inner);
        form.add_event_listener(
            EventKind::Submit,
            Arc::new(move |event: &Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                ChatWidget { inner }.handle_event(event);
            }),
        );

        let weak = Arc::downgrade(&self.inner);
        let enter_key = inner.config.enter_key;
        form.add_event_listener(
            EventKind::KeyUp,
            Arc::new(move |event: &Event| {
                if enter_key == EnterKeySubmit::Inert
                    || event.key() != Some("Enter")
                {
                    trace!("ignoring key release: {event:?}");
                    return;
                }
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                ChatWidget { inner }.handle_event(event);
            }),
        );

        debug!("attached to view");
        Ok(())
    }

    /// Returns whether [`ChatWidget::attach`] has succeeded.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.inner.bound.get().is_some()
    }

    /// Returns where the submission identified by `id` currently is.
    /// Submissions that have settled, or never existed, are `Idle`.
    pub fn stage(&self, id: &MessageId) -> Stage {
        self.inner
            .lock_in_flight()
            .get(id)
            .map(|in_flight| in_flight.stage)
            .unwrap_or_default()
    }

    /// Returns how many submissions are waiting for or revealing a reply.
    pub fn in_flight(&self) -> usize {
        self.inner.lock_in_flight().len()
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    fn handle_event(&self, event: &Event) {
        event.prevent_default();
        if let Err(err) = self.submit() {
            error!("failed to submit: {err}");
        }
    }
}

impl ChatWidget {
    fn spawn_from_builder(builder: ChatWidgetBuilder) -> Self {
        let ChatWidgetBuilder {
            host,
            client,
            config,
            on_idle,
        } = builder;

        let inner = WidgetInner {
            host,
            client,
            config,
            bound: OnceLock::new(),
            in_flight: Default::default(),
            on_idle,
        };
        Self {
            inner: Arc::new(inner),
        }
    }
}

impl WidgetInner {
    #[inline]
    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<MessageId, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
