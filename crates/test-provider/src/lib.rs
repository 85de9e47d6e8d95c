//! A local fake reply service for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::pending;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chat_widget_protocol::{
    BotReply, ErrorKind, PromptRequest, ReplyProvider, ReplyProviderError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Error {
    fn new(message: String, kind: ErrorKind) -> Self {
        Self {
            message,
            kind,
            status: None,
        }
    }

    /// Returns the scripted status code, for failure presets.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ReplyProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    prompts: Vec<String>,
}

/// A local fake reply service for testing purpose.
///
/// Before sending prompts, you need to set up the script, which is how the
/// service should settle each request. Replies are consumed in order, one
/// per prompt. If the script runs dry, a transport error is returned.
///
/// Clones share the same script, so a test can keep one clone around to
/// inspect the prompts the widget sent.
#[derive(Clone, Default)]
pub struct TestProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn add_reply(&mut self, reply: PresetReply) {
        self.lock().replies.push_back(reply);
    }

    /// Makes every request wait this long before settling.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ReplyProvider for TestProvider {
    type Error = crate::Error;

    fn send_prompt(
        &self,
        req: &PromptRequest,
    ) -> impl Future<Output = Result<BotReply, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut script = self.lock();
            script.prompts.push(req.prompt.clone());
            script.replies.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match preset {
                Some(PresetReply::Bot(text)) => Ok(BotReply::new(text)),
                Some(PresetReply::Failure { status, body }) => Err(Error {
                    status: Some(status),
                    ..Error::new(body, ErrorKind::Application)
                }),
                Some(PresetReply::Transport(message)) => {
                    Err(Error::new(message, ErrorKind::Transport))
                }
                Some(PresetReply::Malformed(body)) => Err(Error::new(
                    format!("Unexpected reply body: {body}"),
                    ErrorKind::InvalidReply,
                )),
                Some(PresetReply::Hang) => pending().await,
                None => Err(Error::new(
                    "no more preset replies".to_owned(),
                    ErrorKind::Transport,
                )),
            }
        }
    }
}
