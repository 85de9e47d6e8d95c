use chat_widget_protocol::{BotReply, ErrorKind};

use crate::Error;

/// Turns a settled response into a reply or an error.
///
/// Non-success statuses carry the raw body as the message, since that is
/// what the user gets to see.
pub fn decode_reply(
    success: bool,
    status: u16,
    body: String,
) -> Result<BotReply, Error> {
    if !success {
        return Err(
            Error::new(body, ErrorKind::Application).with_status(status)
        );
    }
    match serde_json::from_str::<BotReply>(&body) {
        Ok(reply) => Ok(reply),
        Err(err) => Err(Error::new(
            format!("Unexpected reply body: {err}"),
            ErrorKind::InvalidReply,
        )
        .with_status(status)),
    }
}

#[cfg(test)]
mod tests {
    use chat_widget_protocol::ReplyProviderError;

    use super::*;

    #[test]
    fn test_success() {
        let reply =
            decode_reply(true, 200, r#"{"bot":"  hello world  "}"#.to_owned())
                .unwrap();
        assert_eq!(reply.trimmed(), "hello world");
    }

    #[test]
    fn test_application_error_keeps_raw_body() {
        let err =
            decode_reply(false, 500, "server exploded".to_owned()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.message(), "server exploded");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_invalid_reply() {
        let err = decode_reply(true, 200, "not json".to_owned()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReply);

        let body = r#"{"answer":"hi"}"#.to_owned();
        let err = decode_reply(true, 200, body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidReply);
    }
}
