use std::sync::Arc;

use chat_widget_protocol::ErrorKind as ReplyErrorKind;
use chat_widget_view::{ElementRef, MessageId, Speaker, render_turn};
use tokio::task::JoinHandle;
use tracing::Instrument;

use super::ChatWidget;
use crate::animation::{Loader, type_text};
use crate::error::Error;

/// Text of a bot turn before anything is known about its reply.
const PLACEHOLDER: &str = " ";

/// Where a submission is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing is pending.
    #[default]
    Idle,
    /// The prompt has been rendered as a user turn.
    UserRendered,
    /// The bot placeholder is rendered and the loader is running while the
    /// reply is pending.
    AwaitingResponse,
    /// The reply arrived and is being typed into the placeholder.
    TypingReveal,
    /// The reply failed and the placeholder shows the error text.
    ErrorShown,
}

/// How a submission settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The trimmed reply has been fully revealed.
    Revealed {
        /// Id of the bot turn.
        id: MessageId,
        /// The revealed text.
        text: String,
    },
    /// The reply failed; the error text is shown and the host was alerted.
    Failed {
        /// Id of the bot turn.
        id: MessageId,
        /// What went wrong.
        kind: ReplyErrorKind,
        /// The message passed to the alert. For non-success responses this
        /// is the raw response body.
        message: String,
    },
}

impl Outcome {
    /// Returns the id of the bot turn this outcome belongs to.
    #[inline]
    pub fn id(&self) -> &MessageId {
        match self {
            Outcome::Revealed { id, .. } | Outcome::Failed { id, .. } => id,
        }
    }
}

/// A handle to a submission whose reply is still on its way.
///
/// Dropping the handle does not cancel the submission.
#[derive(Debug)]
pub struct PendingReply {
    id: MessageId,
    task: JoinHandle<Outcome>,
}

impl PendingReply {
    /// Returns the id of the bot turn rendered for this submission.
    #[inline]
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Waits until the reply is revealed or the failure is shown.
    pub async fn outcome(self) -> Result<Outcome, Error> {
        self.task.await.map_err(|err| {
            Error::interrupted().with_reason(format!("{}: {err}", self.id))
        })
    }
}

pub(crate) struct InFlight {
    pub(crate) stage: Stage,
    loader: Option<Loader>,
}

impl ChatWidget {
    /// Submits the prompt currently in the form.
    ///
    /// The user turn and the bot placeholder are rendered before this
    /// returns; the request itself and everything after it happen on a
    /// spawned task. Must be called within a tokio runtime.
    pub fn submit(&self) -> Result<PendingReply, Error> {
        let inner = &self.inner;
        let bound = inner.bound.get().ok_or_else(Error::not_attached)?;
        let config = &inner.config;

        let prompt =
            bound.form.field_value(&config.prompt_field).unwrap_or_else(|| {
                warn!("form has no `{}` field", config.prompt_field);
                String::new()
            });

        bound.container.append_turn(&render_turn(
            Speaker::User,
            &prompt,
            &config.avatars,
        ));
        trace!("stage: {:?}", Stage::UserRendered);

        let id = MessageId::generate();
        bound.container.append_turn(&render_turn(
            Speaker::Bot(id.clone()),
            PLACEHOLDER,
            &config.avatars,
        ));
        bound.container.scroll_to_bottom();

        let Some(placeholder) = inner.host.element_by_id(id.as_str()) else {
            // Both turns are in the transcript already and the host offers
            // no way to take them back.
            warn!("placeholder {id} is not addressable, left it behind");
            return Err(Error::missing_element()
                .with_reason(format!("no element with id `{id}`")));
        };

        let loader =
            Loader::start(Arc::clone(&placeholder), config.loader_interval);
        inner.lock_in_flight().insert(
            id.clone(),
            InFlight {
                stage: Stage::AwaitingResponse,
                loader: Some(loader),
            },
        );
        debug!("awaiting reply for {id}");

        let widget = self.clone();
        let span = debug_span!("submission", id = %id);
        let task = tokio::spawn(
            widget
                .settle(id.clone(), prompt, placeholder)
                .instrument(span),
        );
        Ok(PendingReply { id, task })
    }

    async fn settle(
        self,
        id: MessageId,
        prompt: String,
        placeholder: ElementRef,
    ) -> Outcome {
        // Runs the cleanup even if the task unwinds or gets dropped midway.
        let _settled = Settled {
            widget: self.clone(),
            id: id.clone(),
        };

        let inner = &self.inner;
        let result = inner.client.send_prompt(prompt).await;

        let loader = inner
            .lock_in_flight()
            .get_mut(&id)
            .and_then(|in_flight| in_flight.loader.take());
        if let Some(loader) = loader {
            loader.stop().await;
        }
        placeholder.set_text_content("");

        match result {
            Ok(text) => {
                self.set_stage(&id, Stage::TypingReveal);
                type_text(
                    placeholder,
                    &text,
                    inner.config.typing_interval,
                    inner.config.reveal_mode,
                )
                .await;
                Outcome::Revealed {
                    id: id.clone(),
                    text,
                }
            }
            Err(err) => {
                self.set_stage(&id, Stage::ErrorShown);
                placeholder.set_text_content(&inner.config.error_text);
                inner.host.alert(err.message());
                Outcome::Failed {
                    id: id.clone(),
                    kind: err.kind(),
                    message: err.message().to_owned(),
                }
            }
        }
    }

    fn set_stage(&self, id: &MessageId, stage: Stage) {
        if let Some(in_flight) = self.inner.lock_in_flight().get_mut(id) {
            in_flight.stage = stage;
        }
        trace!("stage: {stage:?}");
    }

    fn finish(&self, id: &MessageId) {
        let (removed, idle) = {
            let mut in_flight = self.inner.lock_in_flight();
            let removed = in_flight.remove(id);
            (removed, in_flight.is_empty())
        };
        // Dropping a leftover loader stops its animation.
        drop(removed);
        debug!("settled {id}");

        if idle {
            if let Some(on_idle) = &self.inner.on_idle {
                on_idle();
            }
        }
    }
}

/// Takes a submission out of the in-flight set when dropped.
struct Settled {
    widget: ChatWidget,
    id: MessageId,
}

impl Drop for Settled {
    fn drop(&mut self) {
        self.widget.finish(&self.id);
    }
}
