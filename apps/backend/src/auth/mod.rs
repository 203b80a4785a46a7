//! Token format and failure taxonomy.

pub mod claims;
pub mod failure;
pub mod jwt;

pub use claims::Claims;
pub use failure::{AuthError, AuthFailure};
pub use jwt::TokenCodec;
