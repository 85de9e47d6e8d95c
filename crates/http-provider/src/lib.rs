//! A reply provider that posts prompts to a JSON endpoint over HTTP.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use chat_widget_protocol::{
    BotReply, ErrorKind, PromptRequest, ReplyProvider, ReplyProviderError,
};
use reqwest::{Client, header};

pub use config::{DEFAULT_ENDPOINT, HttpConfig, HttpConfigBuilder};

/// Error type for [`HttpProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status: None,
        }
    }

    #[inline]
    fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the HTTP status code, if the server answered at all.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => {
                write!(f, "{} ({status}): {}", self.kind, self.message)
            }
            None => write!(f, "{}: {}", self.kind, self.message),
        }
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

/// HTTP reply provider.
///
/// Each prompt is one `POST` with a `{"prompt": ...}` JSON body. A success
/// status must come with a `{"bot": ...}` body; any other status is an
/// application error whose message is the raw response body.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    config: Arc<HttpConfig>,
}

impl HttpProvider {
    /// Creates a new `HttpProvider` with the given configuration.
    #[inline]
    pub fn new(config: HttpConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl ReplyProvider for HttpProvider {
    type Error = Error;

    fn send_prompt(
        &self,
        req: &PromptRequest,
    ) -> impl Future<Output = Result<BotReply, Self::Error>> + Send + 'static
    {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(req);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let resp_fut = builder.send();
        let endpoint = self.config.endpoint.clone();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    warn!("request to {endpoint} failed: {err}");
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    ));
                }
            };

            let status = resp.status();
            trace!("got status {status} from {endpoint}");

            let body = match resp.text().await {
                Ok(body) => body,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Transport,
                    )
                    .with_status(status.as_u16()));
                }
            };

            proto::decode_reply(status.is_success(), status.as_u16(), body)
        }
    }
}
