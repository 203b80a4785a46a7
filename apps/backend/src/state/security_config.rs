use jsonwebtoken::Algorithm;
use time::Duration;

use crate::config::{first_set, parse_or, process_env};
use crate::error::AppError;

/// Default access token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: u32 = 3600;

/// Configuration for JWT security settings.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (always HS256)
    pub algorithm: Algorithm,
    /// Lifetime of issued access tokens, in whole seconds
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and the default TTL
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::seconds(i64::from(DEFAULT_TOKEN_TTL_SECS)),
        }
    }

    pub fn with_ttl_secs(mut self, secs: u32) -> Self {
        self.token_ttl = Duration::seconds(i64::from(secs));
        self
    }

    /// Load from `BACKEND_JWT_SECRET` (falling back to `BACKEND_SECRET_KEY`),
    /// `BACKEND_JWT_ALGORITHM` and `BACKEND_JWT_TTL_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = first_set(&lookup, &["BACKEND_JWT_SECRET", "BACKEND_SECRET_KEY"])
            .ok_or_else(|| {
                AppError::config(
                    "BACKEND_JWT_SECRET (or BACKEND_SECRET_KEY) must be set".to_string(),
                )
            })?;

        if let Some(algorithm) = first_set(&lookup, &["BACKEND_JWT_ALGORITHM"]) {
            if !algorithm.eq_ignore_ascii_case("HS256") {
                return Err(AppError::config(format!(
                    "unsupported JWT algorithm '{algorithm}', only HS256 is allowed"
                )));
            }
        }

        let ttl_secs = parse_or(&lookup, "BACKEND_JWT_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(AppError::config(
                "BACKEND_JWT_TTL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self::new(secret.into_bytes()).with_ttl_secs(ttl_secs))
    }
}
