//! Unified error type for store, service and transport.

use serde::{Deserialize, Serialize};

/// Things that can go wrong when serving posts.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backing file is missing, unreadable or unwritable.
    Io(String),
    /// The stored bytes are not a well-formed sequence of posts.
    Format(String),
    /// A store failure hit in the middle of a mutation. Carries the cause.
    Internal(Box<Error>),
    /// The operation has no implementation on this service.
    Unimplemented(String),
    /// Bad configuration (empty path, unknown policy, etc.).
    Config(String),
    /// A request that could not be decoded or dispatched.
    InvalidRequest(String),
}

/// Coarse classification of an [`Error`], sent over the wire as the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`Error::Io`].
    Io,
    /// See [`Error::Format`].
    Format,
    /// See [`Error::Internal`].
    Internal,
    /// See [`Error::Unimplemented`].
    Unimplemented,
    /// See [`Error::Config`].
    Config,
    /// See [`Error::InvalidRequest`].
    InvalidRequest,
}

impl Error {
    /// Wrap a store error raised during a mutation.
    pub fn internal(cause: Error) -> Self {
        Error::Internal(Box::new(cause))
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Format(_) => ErrorKind::Format,
            Error::Internal(_) => ErrorKind::Internal,
            Error::Unimplemented(_) => ErrorKind::Unimplemented,
            Error::Config(_) => ErrorKind::Config,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// The wrapped store error, if this is an internal failure.
    #[must_use]
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Error::Internal(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }

    /// Message part only, without the kind prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Io(msg)
            | Error::Format(msg)
            | Error::Unimplemented(msg)
            | Error::Config(msg)
            | Error::InvalidRequest(msg) => msg.clone(),
            Error::Internal(cause) => cause.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Format(msg) => write!(f, "format error: {msg}"),
            Error::Internal(cause) => write!(f, "internal failure: {cause}"),
            Error::Unimplemented(msg) => write!(f, "unimplemented: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Internal(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else {
            Error::Format(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
