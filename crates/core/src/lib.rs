//! Core logic of the chat widget: the submission pipeline, its animations,
//! and configurations.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod animation;
pub mod config;
mod error;
mod reply_client;
mod widget;

pub use chat_widget_protocol::ErrorKind as ReplyErrorKind;
pub use config::{
    EnterKeySubmit, RevealMode, WidgetConfig, WidgetConfigBuilder,
};
pub use error::{Error, ErrorKind};
pub use widget::{ChatWidget, ChatWidgetBuilder, Outcome, PendingReply, Stage};
