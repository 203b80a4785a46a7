//! Token lifecycle operations: login, verify and validate.
//!
//! - `login` checks credentials and issues a token.
//! - `verify` is a stateless signature/expiry check; it never calls the
//!   user directory.
//! - `validate` verifies a bearer token and resolves its subject to a live
//!   directory record.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::info;

use super::credentials::CredentialVerifier;
use crate::auth::claims::{format_expiry, Claims};
use crate::auth::failure::{AuthError, AuthFailure};
use crate::auth::jwt::TokenCodec;
use crate::directory::{Identity, UserDirectory};
use crate::logging::security;
use crate::state::security_config::SecurityConfig;

/// A freshly issued token.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub claims: Claims,
}

impl LoginGrant {
    pub fn expires_at(&self) -> OffsetDateTime {
        self.claims.expires_at
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn expires_iso(&self) -> String {
        format_expiry(self.claims.expires_at)
    }
}

/// Result of a stateless token check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(Claims),
    Invalid(AuthFailure),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    /// Client-safe reason for an invalid token.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Verification::Valid(_) => None,
            Verification::Invalid(failure) => Some(failure.reason()),
        }
    }
}

/// A bearer token resolved to a current directory record.
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub user: Identity,
    pub claims: Claims,
}

impl ValidatedToken {
    pub fn expires_iso(&self) -> String {
        format_expiry(self.claims.expires_at)
    }
}

/// Split an `Authorization` value into its bearer token.
///
/// Exactly `<scheme> <token>` separated by a single space; the scheme must
/// be `bearer` in any case.
pub fn parse_bearer(header: &str) -> Result<&str, AuthFailure> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if !token.is_empty() && scheme.eq_ignore_ascii_case("bearer") =>
        {
            Ok(token)
        }
        _ => Err(AuthFailure::MalformedInput),
    }
}

#[derive(Clone)]
pub struct AuthService {
    codec: TokenCodec,
    verifier: CredentialVerifier,
    directory: Arc<dyn UserDirectory>,
}

impl AuthService {
    pub fn new(security: &SecurityConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            codec: TokenCodec::new(security),
            verifier: CredentialVerifier::new(directory.clone()),
            directory,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Check credentials and issue a token for the resolved identity.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, AuthError> {
        let identity = self
            .verifier
            .verify_credentials(username, password)
            .await
            .inspect_err(|err| match err {
                AuthError::Failure(failure) => security::login_failed(*failure, username),
                AuthError::Directory(err) => security::directory_failed("login", err),
                AuthError::Encoding(_) => {}
            })?;

        let claims = self.codec.claims_for(&identity, OffsetDateTime::now_utc());
        let token = self.codec.issue(&claims)?;

        info!(user_id = identity.id, "Issued access token");
        Ok(LoginGrant { token, claims })
    }

    /// Signature and expiry check only.
    ///
    /// Fails with `MalformedInput` only when no token was supplied; every
    /// other problem is reported as `Verification::Invalid`.
    pub fn verify(&self, token: &str) -> Result<Verification, AuthFailure> {
        if token.is_empty() {
            return Err(AuthFailure::MalformedInput);
        }

        Ok(match self.codec.decode(token) {
            Ok(claims) => Verification::Valid(claims),
            Err(failure) => {
                security::token_rejected("verify", failure);
                Verification::Invalid(failure)
            }
        })
    }

    /// Parse an `Authorization` header value and validate its bearer token.
    pub async fn validate(&self, header: &str) -> Result<ValidatedToken, AuthError> {
        let token = parse_bearer(header)?;
        self.validate_token(token).await
    }

    /// Validate an already-extracted bearer token against the directory.
    pub async fn validate_token(&self, token: &str) -> Result<ValidatedToken, AuthError> {
        let claims = self
            .codec
            .decode(token)
            .inspect_err(|failure| security::token_rejected("validate", *failure))?;

        let user = self
            .directory
            .find_by_id(claims.subject_id)
            .await
            .inspect_err(|err| security::directory_failed("validate", err))?
            .ok_or_else(|| {
                security::token_rejected("validate", AuthFailure::UnknownSubject);
                AuthFailure::UnknownSubject
            })?;

        Ok(ValidatedToken { user, claims })
    }
}
