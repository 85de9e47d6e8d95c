use serde::{Deserialize, Serialize};

/// A successful answer from the reply service.
///
/// Deserializes from `{"bot": "..."}`. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotReply {
    /// The reply text as sent by the service, untrimmed.
    pub bot: String,
}

impl BotReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(bot: S) -> Self {
        Self { bot: bot.into() }
    }

    /// Returns the reply text with leading and trailing whitespace removed,
    /// which is what gets displayed.
    #[inline]
    pub fn trimmed(&self) -> &str {
        self.bot.trim()
    }
}
