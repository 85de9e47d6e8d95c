//! Widget configuration.

use std::time::Duration;

use chat_widget_view::Avatars;

/// How revealed reply text is inserted into the message element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealMode {
    /// Characters are inserted as literal text.
    #[default]
    Text,
    /// Characters are inserted as raw markup. Only use this with a reply
    /// service you trust: anything it returns gets interpreted by the host.
    Markup,
}

/// Whether releasing a key on the form submits it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnterKeySubmit {
    /// The key-release listener is registered but never submits. Hosts that
    /// submit forms on Enter natively get exactly one submission.
    #[default]
    Inert,
    /// Releasing `Enter` submits the form.
    OnEnter,
}

/// Builder for [`WidgetConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WidgetConfigBuilder {
    avatars: Option<Avatars>,
    prompt_field: Option<String>,
    error_text: Option<String>,
    loader_interval: Option<Duration>,
    typing_interval: Option<Duration>,
    reveal_mode: RevealMode,
    enter_key: EnterKeySubmit,
}

impl WidgetConfigBuilder {
    /// Creates a builder with every option at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the avatar image paths.
    #[inline]
    pub fn with_avatars(mut self, avatars: Avatars) -> Self {
        self.avatars = Some(avatars);
        self
    }

    /// Sets the name of the form field holding the prompt.
    #[inline]
    pub fn with_prompt_field<S: Into<String>>(mut self, name: S) -> Self {
        self.prompt_field = Some(name.into());
        self
    }

    /// Sets the text shown in place of a reply that failed.
    #[inline]
    pub fn with_error_text<S: Into<String>>(mut self, text: S) -> Self {
        self.error_text = Some(text.into());
        self
    }

    /// Sets the period of the loading dots.
    #[inline]
    pub fn with_loader_interval(mut self, interval: Duration) -> Self {
        self.loader_interval = Some(interval);
        self
    }

    /// Sets the delay between two revealed characters.
    #[inline]
    pub fn with_typing_interval(mut self, interval: Duration) -> Self {
        self.typing_interval = Some(interval);
        self
    }

    /// Sets how reply text is inserted.
    #[inline]
    pub fn with_reveal_mode(mut self, mode: RevealMode) -> Self {
        self.reveal_mode = mode;
        self
    }

    /// Sets whether releasing Enter submits the form.
    #[inline]
    pub fn with_enter_key(mut self, enter_key: EnterKeySubmit) -> Self {
        self.enter_key = enter_key;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> WidgetConfig {
        WidgetConfig {
            avatars: self.avatars.unwrap_or_default(),
            prompt_field: self
                .prompt_field
                .unwrap_or_else(|| "prompt".to_owned()),
            error_text: self
                .error_text
                .unwrap_or_else(|| "Something went wrong".to_owned()),
            loader_interval: self
                .loader_interval
                .unwrap_or(Duration::from_millis(300)),
            typing_interval: self
                .typing_interval
                .unwrap_or(Duration::from_millis(20)),
            reveal_mode: self.reveal_mode,
            enter_key: self.enter_key,
        }
    }
}

/// Configuration for [`crate::ChatWidget`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetConfig {
    pub(crate) avatars: Avatars,
    pub(crate) prompt_field: String,
    pub(crate) error_text: String,
    pub(crate) loader_interval: Duration,
    pub(crate) typing_interval: Duration,
    pub(crate) reveal_mode: RevealMode,
    pub(crate) enter_key: EnterKeySubmit,
}

impl WidgetConfig {
    /// Returns the avatar image paths.
    #[inline]
    pub fn avatars(&self) -> &Avatars {
        &self.avatars
    }

    /// Returns the text shown in place of a reply that failed.
    #[inline]
    pub fn error_text(&self) -> &str {
        &self.error_text
    }

    /// Returns the period of the loading dots.
    #[inline]
    pub fn loader_interval(&self) -> Duration {
        self.loader_interval
    }

    /// Returns the delay between two revealed characters.
    #[inline]
    pub fn typing_interval(&self) -> Duration {
        self.typing_interval
    }
}

impl Default for WidgetConfig {
    #[inline]
    fn default() -> Self {
        WidgetConfigBuilder::new().build()
    }
}
