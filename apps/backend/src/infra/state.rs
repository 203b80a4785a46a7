use std::path::PathBuf;
use std::sync::Arc;

use crate::directory::seed::load_seed_file;
use crate::directory::{InMemoryUserDirectory, UserDirectory};
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    directory: Option<Arc<dyn UserDirectory>>,
    users_file: Option<PathBuf>,
    bcrypt_cost: u32,
}

impl StateBuilder {
    /// The signing config has no default; every state is built with an explicit secret.
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            directory: None,
            users_file: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Use an existing directory instead of a fresh in-memory one.
    /// A seed file is ignored in that case.
    pub fn with_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_users_file(mut self, path: Option<PathBuf>) -> Self {
        self.users_file = path;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let directory = match self.directory {
            Some(directory) => directory,
            None => {
                let directory = InMemoryUserDirectory::new(self.bcrypt_cost)
                    .map_err(|e| AppError::config(format!("user directory: {e}")))?;
                if let Some(path) = &self.users_file {
                    load_seed_file(&directory, path)?;
                }
                Arc::new(directory) as Arc<dyn UserDirectory>
            }
        };

        Ok(AppState::new(self.security_config, directory))
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}
