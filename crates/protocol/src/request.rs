use serde::{Deserialize, Serialize};

/// The body posted to the reply service.
///
/// Serializes as `{"prompt": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptRequest {
    /// The raw text the user submitted.
    pub prompt: String,
}

impl PromptRequest {
    /// Creates a request for the given prompt.
    #[inline]
    pub fn new<S: Into<String>>(prompt: S) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}
