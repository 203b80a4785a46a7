pub mod auth;
pub mod credentials;

pub use auth::{parse_bearer, AuthService, LoginGrant, ValidatedToken, Verification};
pub use credentials::CredentialVerifier;
