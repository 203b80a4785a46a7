//! Failure kinds produced by the token lifecycle operations.
//!
//! Every fallible auth operation returns exactly one `AuthFailure` kind or a
//! success value. The kinds are HTTP-agnostic; the mapping to status codes
//! and response bodies lives in `crate::error`.

use thiserror::Error;

use crate::directory::DirectoryError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// Request shape is unusable (empty/blank field, malformed token or header).
    #[error("malformed input")]
    MalformedInput,
    /// Token signature does not match the configured secret/algorithm.
    #[error("invalid signature")]
    InvalidSignature,
    /// Token `exp` is at or before the current time.
    #[error("token expired")]
    Expired,
    /// Token subject no longer exists in the user directory.
    #[error("unknown subject")]
    UnknownSubject,
    /// Credentials matched a deactivated user.
    #[error("inactive subject")]
    InactiveSubject,
    /// No user matched the supplied username/password pair.
    #[error("bad credentials")]
    BadCredentials,
}

impl AuthFailure {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::MalformedInput => "MALFORMED_INPUT",
            AuthFailure::InvalidSignature => "INVALID_SIGNATURE",
            AuthFailure::Expired => "EXPIRED",
            AuthFailure::UnknownSubject => "UNKNOWN_SUBJECT",
            AuthFailure::InactiveSubject => "INACTIVE_SUBJECT",
            AuthFailure::BadCredentials => "BAD_CREDENTIALS",
        }
    }

    /// Human-readable reason safe to return to clients.
    ///
    /// Never includes request data. `InactiveSubject` and `BadCredentials`
    /// share wording so callers cannot probe which usernames exist.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::MalformedInput => "Invalid token",
            AuthFailure::InvalidSignature => "Invalid token signature",
            AuthFailure::Expired => "Token has expired",
            AuthFailure::UnknownSubject => "User not found",
            AuthFailure::InactiveSubject | AuthFailure::BadCredentials => "Invalid credentials",
        }
    }
}

/// Error returned by the auth service operations that touch I/O or encoding.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Failure(#[from] AuthFailure),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Signing a well-formed claims set failed; indicates a broken key setup.
    #[error("token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// The failure kind, if this error is one of the client-facing kinds.
    pub fn failure(&self) -> Option<AuthFailure> {
        match self {
            AuthError::Failure(kind) => Some(*kind),
            _ => None,
        }
    }
}
