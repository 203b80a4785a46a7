//! Loading initial users into the in-memory directory from a JSON file.
//!
//! File format:
//!
//! ```json
//! [
//!   { "username": "testuser", "password": "testpass123" },
//!   { "username": "retired", "password": "pw", "active": false }
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{DirectoryError, InMemoryUserDirectory};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub fn parse_seed(json: &str) -> Result<Vec<SeedUser>, AppError> {
    let users: Vec<SeedUser> = serde_json::from_str(json)
        .map_err(|e| AppError::config(format!("invalid users file: {e}")))?;

    for user in &users {
        if user.username.trim().is_empty() || user.username.trim() != user.username {
            return Err(AppError::config(
                "users file contains a blank or whitespace-padded username".to_string(),
            ));
        }
        if user.password.is_empty() {
            return Err(AppError::config(format!(
                "users file entry '{}' has an empty password",
                user.username
            )));
        }
    }

    Ok(users)
}

pub fn seed_directory(
    directory: &InMemoryUserDirectory,
    users: &[SeedUser],
) -> Result<usize, AppError> {
    for user in users {
        directory
            .create_user(&user.username, &user.password, user.active)
            .map_err(|e| match e {
                DirectoryError::UsernameTaken => AppError::config(format!(
                    "users file contains duplicate username '{}'",
                    user.username
                )),
                other => AppError::config(format!("failed to seed users: {other}")),
            })?;
    }
    Ok(users.len())
}

pub fn load_seed_file(
    directory: &InMemoryUserDirectory,
    path: impl AsRef<Path>,
) -> Result<usize, AppError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("cannot read users file {}: {e}", path.display()))
    })?;
    let users = parse_seed(&contents)?;
    let count = seed_directory(directory, &users)?;
    info!(users = count, path = %path.display(), "Seeded user directory");
    Ok(count)
}
