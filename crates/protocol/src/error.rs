use std::fmt::{self, Display};

/// The kind of error that occurred while asking for a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service answered, but with a non-success status.
    Application,
    /// The request never completed (unreachable host, refused connection,
    /// timeout, ...).
    Transport,
    /// The service answered with a success status, but the body is not a
    /// valid reply.
    InvalidReply,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Application => write!(f, "Application error"),
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::InvalidReply => write!(f, "Invalid reply"),
        }
    }
}
