use auth_backend::auth::{Claims, TokenCodec};
use auth_backend::directory::Identity;
use auth_backend::state::security_config::SecurityConfig;
use time::{Duration, OffsetDateTime};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET.as_bytes())
}

pub fn identity(id: i64, name: &str) -> Identity {
    Identity {
        id,
        name: name.to_string(),
        active: true,
    }
}

/// Sign a token for `identity` as if issued at `issued_at` with the test config.
pub fn token_issued_at(identity: &Identity, issued_at: OffsetDateTime) -> String {
    let codec = TokenCodec::new(&test_security());
    codec.issue(&codec.claims_for(identity, issued_at)).unwrap()
}

pub fn fresh_token(identity: &Identity) -> String {
    token_issued_at(identity, OffsetDateTime::now_utc())
}

/// A token whose `exp` passed an hour ago.
pub fn expired_token(identity: &Identity) -> String {
    token_issued_at(identity, OffsetDateTime::now_utc() - Duration::hours(2))
}

pub fn decode(token: &str) -> Claims {
    TokenCodec::new(&test_security()).decode(token).unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
