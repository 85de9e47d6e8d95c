use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The widget is already bound to its view.
    AlreadyAttached,
    /// The widget has not been bound to a view yet.
    NotAttached,
    /// The view lacks an element the widget needs.
    MissingElement,
    /// A submission stopped before settling.
    Interrupted,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::AlreadyAttached => write!(f, "Already attached"),
            ErrorKind::NotAttached => write!(f, "Not attached"),
            ErrorKind::MissingElement => write!(f, "Missing element"),
            ErrorKind::Interrupted => write!(f, "Interrupted"),
        }
    }
}

/// Describes a widget error.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind) -> Self {
        Self { kind, reason: None }
    }

    /// Creates a new error with the `AlreadyAttached` kind.
    #[inline]
    pub fn already_attached() -> Self {
        Self::new(ErrorKind::AlreadyAttached)
    }

    /// Creates a new error with the `NotAttached` kind.
    #[inline]
    pub fn not_attached() -> Self {
        Self::new(ErrorKind::NotAttached)
    }

    /// Creates a new error with the `MissingElement` kind.
    #[inline]
    pub fn missing_element() -> Self {
        Self::new(ErrorKind::MissingElement)
    }

    /// Creates a new error with the `Interrupted` kind.
    #[inline]
    pub fn interrupted() -> Self {
        Self::new(ErrorKind::Interrupted)
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {}
