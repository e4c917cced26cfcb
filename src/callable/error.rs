//! Error taxonomy for callable invocations.

use std::error::Error;
use std::fmt;

/// Error raised by a callable invocation.
///
/// Handlers produce the four fixed kinds the mobile client branches on
/// (`unauthenticated`, `invalid-argument`, `internal`, `unknown`);
/// `NotFound` belongs to the dispatch boundary and marks a name with no
/// registered handler. Callers see kind + message only; the source chain
/// stays server-side for logs.
#[derive(Debug)]
pub enum CallableError {
    /// No caller identity was attached to the invocation.
    Unauthenticated(String),
    /// The request payload is malformed or missing a required field.
    InvalidArgument(String),
    /// Unexpected failure from the payment gateway.
    Internal(String),
    /// Unexpected failure from the push gateway, keeping the original
    /// error as source.
    Unknown {
        message: String,
        source: Option<Box<dyn Error + Send + Sync>>,
    },
    /// No callable registered under this name.
    NotFound(String),
}

impl fmt::Display for CallableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableError::Unauthenticated(msg) => write!(f, "unauthenticated: {}", msg),
            CallableError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CallableError::Internal(msg) => write!(f, "internal: {}", msg),
            CallableError::Unknown { message, .. } => write!(f, "unknown: {}", message),
            CallableError::NotFound(name) => write!(f, "no callable named {}", name),
        }
    }
}

impl Error for CallableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CallableError::Unknown {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl CallableError {
    /// The wire code the calling client branches on.
    pub fn code(&self) -> &'static str {
        match self {
            CallableError::Unauthenticated(_) => "unauthenticated",
            CallableError::InvalidArgument(_) => "invalid-argument",
            CallableError::Internal(_) => "internal",
            CallableError::Unknown { .. } => "unknown",
            CallableError::NotFound(_) => "not-found",
        }
    }

    /// The caller-facing message, without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            CallableError::Unauthenticated(msg)
            | CallableError::InvalidArgument(msg)
            | CallableError::Internal(msg) => msg.clone(),
            CallableError::Unknown { message, .. } => message.clone(),
            CallableError::NotFound(name) => format!("no callable named {}", name),
        }
    }

    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            CallableError::Unauthenticated(_) => 401,
            CallableError::InvalidArgument(_) => 400,
            CallableError::Internal(_) => 500,
            CallableError::Unknown { .. } => 500,
            CallableError::NotFound(_) => 404,
        }
    }
}
