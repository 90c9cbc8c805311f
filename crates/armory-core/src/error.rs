//! Error types for the armory client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, storage and input validation errors.
//! [`Error::kind`] folds them into the three outcomes a caller acts on.

use std::fmt;
use thiserror::Error;

/// The unified error type for armory operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, expired session).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success status, unexpected response bodies).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (unknown role, malformed URL or profile).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Persisted session storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// How a caller should treat a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend rejected the credentials. Shown inline; the session is untouched.
    InvalidCredentials,
    /// An authenticated call was answered with 401. The session has been torn down.
    SessionExpired,
    /// Anything else coming back from a collaborator.
    NetworkOrServer,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth(AuthError::InvalidCredentials(_)) => ErrorKind::InvalidCredentials,
            Error::Auth(AuthError::SessionExpired) => ErrorKind::SessionExpired,
            _ => ErrorKind::NetworkOrServer,
        }
    }

    /// Returns true if this error is a 401 from the server.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_auth_error())
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected by the backend. Carries the backend's message verbatim.
    #[error("{0}")]
    InvalidCredentials(String),

    /// An authenticated request was rejected with 401.
    #[error("session expired")]
    SessionExpired,
}

/// Protocol-level errors from REST responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error text from the `error` field of the response body (if present).
    pub error: Option<String>,
    /// Additional message from the `message` field (if present).
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication failure.
    ///
    /// Only 401 counts. A 403 means the server knows who we are and said no.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Role string outside the known taxonomy.
    #[error("unknown role '{value}'")]
    Role { value: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A stored or received user profile could not be decoded.
    #[error("invalid user profile: {reason}")]
    Profile { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Errors raised by a [`SessionStore`](crate::traits::SessionStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be encoded or decoded.
    #[error("corrupt session data: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::from(err))
    }
}
