use std::sync::Arc;
use std::time::Duration;

use chat_widget_core::{
    ChatWidget, ChatWidgetBuilder, Error, PendingReply, WidgetConfig,
};
use chat_widget_http::{HttpConfigBuilder, HttpProvider};
use chat_widget_view::ViewHost;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    host: Arc<dyn ViewHost>,
    http_config: HttpConfigBuilder,
    widget_config: WidgetConfig,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl SessionBuilder {
    /// Creates a session builder rendering into `host`.
    pub fn new(host: Arc<dyn ViewHost>) -> Self {
        Self {
            host,
            http_config: HttpConfigBuilder::new(),
            widget_config: WidgetConfig::default(),
            on_idle: None,
        }
    }

    /// Sets the URL prompts are posted to.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.http_config = self.http_config.with_endpoint(endpoint);
        self
    }

    /// Sets a deadline for each request.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Replaces the default widget configuration.
    #[inline]
    pub fn with_widget_config(mut self, config: WidgetConfig) -> Self {
        self.widget_config = config;
        self
    }

    /// Attaches a callback to be invoked when no submission is pending.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds a new session and binds it to the host's view.
    pub fn build(self) -> Result<Session, Error> {
        let provider = HttpProvider::new(self.http_config.build());
        debug!("replies from {}", provider.config().endpoint());

        let mut builder =
            ChatWidgetBuilder::with_reply_provider(self.host, provider)
                .with_config(self.widget_config);
        if let Some(on_idle) = self.on_idle {
            builder = builder.on_idle(on_idle);
        }

        let widget = builder.build();
        widget.attach()?;
        Ok(Session { widget })
    }
}

/// A chat session: a widget attached to its view that asks an HTTP
/// endpoint for replies.
///
/// Submissions normally come from the form's submit event, which the
/// session listens to from the moment it is built.
pub struct Session {
    widget: ChatWidget,
}

impl Session {
    /// Submits the prompt currently in the form, as if the form had been
    /// submitted by the user.
    #[inline]
    pub fn submit(&self) -> Result<PendingReply, Error> {
        self.widget.submit()
    }

    /// Returns the underlying widget.
    #[inline]
    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }
}

#[cfg(test)]
mod tests {
    use chat_widget_core::ErrorKind;
    use chat_widget_test_view::TestView;

    use super::*;

    #[tokio::test]
    async fn test_build_attaches() {
        let view = TestView::new();
        let session = SessionBuilder::new(view.clone()).build().unwrap();
        assert!(session.widget().is_attached());
        assert_eq!(session.widget().in_flight(), 0);
    }

    #[tokio::test]
    async fn test_build_without_container() {
        let result =
            SessionBuilder::new(TestView::without_container()).build();
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert_eq!(err.kind(), ErrorKind::MissingElement);
    }
}
