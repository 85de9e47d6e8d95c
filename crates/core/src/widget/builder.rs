use std::sync::Arc;

use chat_widget_protocol::ReplyProvider;
use chat_widget_view::ViewHost;

use super::ChatWidget;
use crate::config::WidgetConfig;
use crate::reply_client::ReplyClient;

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    pub(crate) host: Arc<dyn ViewHost>,
    pub(crate) client: ReplyClient,
    pub(crate) config: WidgetConfig,
    pub(crate) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatWidgetBuilder {
    /// Creates a new builder rendering into `host` and asking `provider`
    /// for replies.
    #[inline]
    pub fn with_reply_provider<P: ReplyProvider + 'static>(
        host: Arc<dyn ViewHost>,
        provider: P,
    ) -> Self {
        Self {
            host,
            client: ReplyClient::new(provider),
            config: WidgetConfig::default(),
            on_idle: None,
        }
    }

    /// Replaces the default configuration.
    #[inline]
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a callback to be invoked when the last pending submission
    /// has settled.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the widget. It still needs to be attached to its view.
    #[inline]
    pub fn build(self) -> ChatWidget {
        ChatWidget::spawn_from_builder(self)
    }
}
