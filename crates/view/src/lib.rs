//! The capability a rendering host lends to the chat widget.
//!
//! The widget never touches a real document. It sees the host through two
//! narrow traits, [`ViewHost`] for the component's subtree and [`Element`]
//! for single nodes in it, plus the fixed-markup [`Turn`] fragments it
//! appends to the transcript. A browser binding, a terminal, or an
//! in-memory fake for tests can all stand behind the same interface.

#![deny(missing_docs)]

mod element;
mod id;
mod turn;

pub use element::*;
pub use id::*;
pub use turn::*;
