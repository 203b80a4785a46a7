//! Claims carried inside issued access tokens.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::directory::Identity;

/// Payload signed into every access token.
///
/// Wire names follow the token format clients already depend on
/// (`user_id`, `username`, `iat`, `exp`, `jti`). Unknown fields are rejected
/// at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Directory primary key of the subject.
    #[serde(rename = "user_id")]
    pub subject_id: i64,
    /// Login name at issuance time; may go stale.
    #[serde(rename = "username")]
    pub subject_name: String,
    #[serde(rename = "iat", with = "time::serde::timestamp")]
    pub issued_at: OffsetDateTime,
    #[serde(rename = "exp", with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
    /// Random token identifier. Not checked; reserved for revocation.
    #[serde(rename = "jti")]
    pub token_id: String,
}

impl Claims {
    /// Build claims for `identity`, issued at `now` (truncated to whole seconds).
    pub fn for_identity(identity: &Identity, now: OffsetDateTime, ttl: Duration) -> Self {
        let issued_at = truncate_to_second(now);
        Self {
            subject_id: identity.id,
            subject_name: identity.name.clone(),
            issued_at,
            expires_at: issued_at + ttl,
            token_id: Uuid::new_v4().to_string(),
        }
    }

    /// Strict expiry: a token whose `exp` equals `now` is already expired.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }

    pub fn ttl(&self) -> Duration {
        self.expires_at - self.issued_at
    }
}

/// Tokens carry second-precision timestamps, so issuance drops sub-seconds
/// up front to keep `exp - iat == ttl` after a round trip.
pub fn truncate_to_second(at: OffsetDateTime) -> OffsetDateTime {
    at - Duration::nanoseconds(i64::from(at.nanosecond()))
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ` (UTC, second precision).
pub fn format_expiry(at: OffsetDateTime) -> String {
    let utc = truncate_to_second(at.to_offset(time::UtcOffset::UTC));
    utc.format(&Rfc3339)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}
