use serde::{Deserialize, Serialize};

/// How the fake service settles one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Answers with a success status and `{"bot": <text>}`.
    #[serde(rename = "bot")]
    Bot(String),
    /// Answers with a non-success status and a raw body.
    #[serde(rename = "failure")]
    Failure {
        /// The HTTP status code.
        status: u16,
        /// The raw body text.
        body: String,
    },
    /// Never reaches the service.
    #[serde(rename = "transport")]
    Transport(String),
    /// Answers with a success status but a body that is not a reply.
    #[serde(rename = "malformed")]
    Malformed(String),
    /// Never settles.
    #[serde(rename = "hang")]
    Hang,
}

impl PresetReply {
    /// Shorthand for [`PresetReply::Bot`].
    #[inline]
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self::Bot(text.into())
    }

    /// Shorthand for [`PresetReply::Failure`].
    #[inline]
    pub fn failure<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Failure {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let script = vec![
            PresetReply::bot("Hello!\n"),
            PresetReply::failure(500, "server exploded"),
            PresetReply::Transport("connection refused".to_string()),
            PresetReply::Hang,
        ];

        let serialized = serde_json::to_string(&script).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(script, deserialized);
    }
}
