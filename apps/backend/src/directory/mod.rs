//! User directory boundary.
//!
//! The directory owns credentials and identities; the auth core only asks it
//! two questions: "do these credentials match someone?" and "does this id
//! still exist?".

pub mod in_memory;
pub mod password;
pub mod seed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use in_memory::InMemoryUserDirectory;

/// A user record as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

/// Outcome of a credential check.
///
/// `Rejected` covers both "no such username" and "wrong password"; the
/// directory must not tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Matched(Identity),
    Rejected,
}

/// Infrastructure failures of the directory. Never carries user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
    #[error("user directory internal error: {0}")]
    Internal(String),
    #[error("username already taken")]
    UsernameTaken,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Compare `password` against the stored salted hash for `username`.
    /// Inactive users still report `Matched`; callers decide what to do.
    async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialCheck, DirectoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DirectoryError>;

    /// Number of known users, active or not. Reported by `/health`.
    async fn user_count(&self) -> Result<usize, DirectoryError>;
}
