use tracing::{debug, error, warn};

use crate::auth::failure::AuthFailure;
use crate::directory::DirectoryError;
use crate::logging::pii::RedactedUsername;
use crate::trace_ctx;

/// Log a rejected login attempt.
pub fn login_failed(failure: AuthFailure, username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %RedactedUsername(username),
        reason = failure.code(),
        "Authentication failure"
    );
}

/// Log a token that failed verification or validation.
pub fn token_rejected(operation: &'static str, failure: AuthFailure) {
    let trace_id = trace_ctx::trace_id();

    debug!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        operation,
        reason = failure.code(),
        "Token rejected"
    );
}

/// Log a user-directory outage seen while serving `operation`.
pub fn directory_failed(operation: &'static str, err: &DirectoryError) {
    let trace_id = trace_ctx::trace_id();

    error!(
        event = "DIRECTORY_FAILURE",
        %trace_id,
        operation,
        error = %err,
        "User directory call failed"
    );
}
