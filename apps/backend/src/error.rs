use actix_web::error::ResponseError;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::failure::{AuthError, AuthFailure};
use crate::directory::DirectoryError;
use crate::trace_ctx;

pub const MSG_CREDENTIALS_REQUIRED: &str = "Username and password are required";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_TOKEN_REQUIRED: &str = "Token is required";
pub const MSG_HEADER_REQUIRED: &str = "Authorization header is required";
pub const MSG_HEADER_FORMAT: &str = "Invalid authorization header format";
pub const MSG_USER_NOT_FOUND: &str = "User not found";
pub const MSG_UNAVAILABLE: &str = "Authentication service unavailable";
pub const MSG_INTERNAL: &str = "Internal server error";

/// `{ "error": "..." }`
#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// `{ "valid": false, "message": "..." }`
#[derive(Serialize)]
pub struct RejectionBody<'a> {
    pub valid: bool,
    pub message: &'a str,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// 400 with a client-safe message.
    #[error("Bad request: {message}")]
    BadRequest { message: String },
    /// 401 with an `{error}` body.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: &'static str },
    /// 401 with a `{valid:false, message}` body.
    #[error("Token rejected: {failure}")]
    TokenRejected { failure: AuthFailure },
    #[error("Directory unavailable: {detail}")]
    Unavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Unauthorized { .. } => "UNAUTHORIZED",
            AppError::TokenRejected { failure } => failure.code(),
            AppError::Unavailable { .. } => "DIRECTORY_UNAVAILABLE",
            AppError::Internal { .. } => "INTERNAL",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } | AppError::TokenRejected { .. } => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized { message }
    }

    pub fn token_rejected(failure: AuthFailure) -> Self {
        Self::TokenRejected { failure }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    /// Map a login failure onto its response.
    ///
    /// Unknown user, wrong password and inactive user all share one message.
    pub fn from_login(err: AuthError) -> Self {
        match err {
            AuthError::Failure(AuthFailure::MalformedInput) => {
                Self::bad_request(MSG_CREDENTIALS_REQUIRED)
            }
            AuthError::Failure(_) => Self::unauthorized(MSG_INVALID_CREDENTIALS),
            other => Self::from_infrastructure(other),
        }
    }

    /// Map a bearer-token validation failure onto its response.
    pub fn from_validate(err: AuthError) -> Self {
        match err {
            AuthError::Failure(AuthFailure::UnknownSubject) => {
                Self::unauthorized(MSG_USER_NOT_FOUND)
            }
            AuthError::Failure(failure) => Self::token_rejected(failure),
            other => Self::from_infrastructure(other),
        }
    }

    fn from_infrastructure(err: AuthError) -> Self {
        match err {
            AuthError::Directory(DirectoryError::Unavailable(detail)) => {
                Self::Unavailable { detail }
            }
            AuthError::Directory(other) => Self::internal(other.to_string()),
            AuthError::Encoding(e) => Self::internal(format!("token encoding failed: {e}")),
            AuthError::Failure(failure) => Self::token_rejected(failure),
        }
    }

    fn public_message(&self) -> &str {
        match self {
            AppError::BadRequest { message } => message,
            AppError::Unauthorized { message } => message,
            AppError::TokenRejected { failure } => failure.reason(),
            AppError::Unavailable { .. } => MSG_UNAVAILABLE,
            AppError::Internal { .. } | AppError::Config { .. } => MSG_INTERNAL,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(%trace_id, code = self.code(), error = %self, "Request failed");
        }

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer")));
        }

        match self {
            AppError::TokenRejected { failure } => builder.json(RejectionBody {
                valid: false,
                message: failure.reason(),
            }),
            _ => builder.json(ErrorBody {
                error: self.public_message(),
            }),
        }
    }
}
