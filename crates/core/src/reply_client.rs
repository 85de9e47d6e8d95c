use std::pin::Pin;
use std::sync::Arc;

use chat_widget_protocol::{PromptRequest, ReplyProvider, ReplyProviderError};
use tracing::Instrument;

type SendPromptResult = Result<String, Box<dyn ReplyProviderError>>;
type BoxedSendPromptFuture =
    Pin<Box<dyn Future<Output = SendPromptResult> + Send>>;
#[rustfmt::skip]
type HandlerFn = Arc<
    dyn Fn(PromptRequest) -> BoxedSendPromptFuture + Send + Sync
>;

/// A wrapper around a reply provider that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct ReplyClient {
    handler_fn: HandlerFn,
}

impl ReplyClient {
    #[inline]
    pub fn new<P: ReplyProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ChatWidget` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_prompt(&req);
            Box::pin(
                async move {
                    trace!("sent a prompt: {:?}", req);
                    match fut.await {
                        Ok(reply) => Ok(reply.trimmed().to_owned()),
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ReplyProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("reply client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a prompt and returns the trimmed reply text.
    #[inline]
    pub async fn send_prompt(&self, prompt: String) -> SendPromptResult {
        (self.handler_fn)(PromptRequest { prompt }).await
    }
}
