use std::error::Error;

use crate::error::ErrorKind;
use crate::request::PromptRequest;
use crate::response::BotReply;

/// The error type for a reply provider.
pub trait ReplyProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the text that should be surfaced to the user.
    ///
    /// For [`ErrorKind::Application`] errors this must be the raw response
    /// body, verbatim.
    fn message(&self) -> &str;
}

/// A type that answers prompts.
///
/// Once the provider is created, it should behave like a stateless object.
/// Every call to [`ReplyProvider::send_prompt`] is an independent request,
/// no conversation context is carried between calls.
pub trait ReplyProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ReplyProviderError;

    /// Sends a prompt and waits for the complete reply.
    fn send_prompt(
        &self,
        req: &PromptRequest,
    ) -> impl Future<Output = Result<BotReply, Self::Error>> + Send + 'static;
}
