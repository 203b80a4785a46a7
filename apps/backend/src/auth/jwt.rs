//! HS256 token codec: signs claims into compact tokens and verifies them back.
//!
//! No I/O. `decode` reads the wall clock; `decode_at` takes the time
//! explicitly.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, DecodingKey, EncodingKey, Header, Validation};
use time::OffsetDateTime;

use super::claims::Claims;
use super::failure::AuthFailure;
use crate::directory::Identity;
use crate::state::security_config::SecurityConfig;

/// Encodes and decodes access tokens with a fixed secret and algorithm.
#[derive(Clone)]
pub struct TokenCodec {
    security: SecurityConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.security.algorithm)
            .field("token_ttl", &self.security.token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Self {
        // Signature and algorithm are checked by jsonwebtoken; expiry is
        // checked here so that `exp == now` counts as expired.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            security: security.clone(),
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Fresh claims for `identity` issued at `now` with the configured TTL.
    pub fn claims_for(&self, identity: &Identity, now: OffsetDateTime) -> Claims {
        Claims::for_identity(identity, now, self.security.token_ttl)
    }

    /// Sign `claims` into a compact `header.payload.signature` token.
    ///
    /// Failure here means the key setup is broken, not that the request was bad.
    pub fn issue(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(self.security.algorithm),
            claims,
            &self.encoding_key,
        )
    }

    /// Decode and verify `token` against the current wall-clock time.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthFailure> {
        self.decode_at(token, OffsetDateTime::now_utc())
    }

    /// Decode and verify `token` as of `now`.
    ///
    /// Checks run in order: structure, signature, claims schema, expiry.
    pub fn decode_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, AuthFailure> {
        check_structure(token)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify_decode_error(e.kind()))?;

        if claims.is_expired_at(now) {
            return Err(AuthFailure::Expired);
        }

        Ok(claims)
    }
}

/// Reject anything that is not three non-empty segments with a parseable
/// header and a base64url JSON-object payload. After this passes, any
/// remaining decoding problem belongs to the signature or the claims schema.
fn check_structure(token: &str) -> Result<(), AuthFailure> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(AuthFailure::MalformedInput);
    }

    decode_header(token).map_err(|_| AuthFailure::MalformedInput)?;

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|_| AuthFailure::MalformedInput)?;
    serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&payload)
        .map_err(|_| AuthFailure::MalformedInput)?;

    Ok(())
}

fn classify_decode_error(kind: &ErrorKind) -> AuthFailure {
    match kind {
        ErrorKind::ExpiredSignature => AuthFailure::Expired,
        // Structure was already validated, so a base64 error can only come
        // from the signature segment.
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::Base64(_) => {
            AuthFailure::InvalidSignature
        }
        _ => AuthFailure::MalformedInput,
    }
}
