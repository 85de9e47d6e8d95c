//! An out-of-the-box chat widget that posts prompts to an HTTP endpoint.
//!
//! The crate includes a CLI demo for using in the terminal. And you can also
//! use it as a library to put the widget into your own host apps, by
//! implementing [`view::ViewHost`] for them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`chat_widget_core`] crate.
pub mod core {
    pub use chat_widget_core::*;
}

/// Re-exports of [`chat_widget_view`] crate.
pub mod view {
    pub use chat_widget_view::*;
}
