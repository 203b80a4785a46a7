use std::path::PathBuf;

use super::{first_set, parse_or, process_env};
use crate::error::AppError;

/// Process-level settings that are not part of token security.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional JSON seed file for the in-memory user directory.
    pub users_file: Option<PathBuf>,
    /// bcrypt cost used when hashing seeded passwords.
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = first_set(&lookup, &["BACKEND_HOST"]).unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "BACKEND_PORT", 3001u16)?;
        let users_file = first_set(&lookup, &["BACKEND_USERS_FILE"]).map(PathBuf::from);
        let bcrypt_cost = parse_or(&lookup, "BACKEND_BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::config(
                "BACKEND_BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            users_file,
            bcrypt_cost,
        })
    }
}
