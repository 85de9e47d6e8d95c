//! The contract between the chat widget and the service answering prompts.
//!
//! The widget only ever talks to a reply service through the types defined
//! here, so that the transport (a real HTTP endpoint, a scripted fake, ...)
//! can be swapped without touching the pipeline.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
