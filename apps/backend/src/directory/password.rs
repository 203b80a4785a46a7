use bcrypt::{hash, verify};

use super::DirectoryError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, DirectoryError> {
    hash(password, cost).map_err(|e| DirectoryError::Internal(format!("bcrypt hash failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}
