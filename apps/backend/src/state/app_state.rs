use std::sync::Arc;

use time::OffsetDateTime;

use super::security_config::SecurityConfig;
use crate::directory::UserDirectory;
use crate::services::auth::AuthService;

/// Shared, read-only application state handed to every worker.
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub auth: AuthService,
    pub directory: Arc<dyn UserDirectory>,
    pub started_at: OffsetDateTime,
}

impl AppState {
    pub fn new(security: SecurityConfig, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            auth: AuthService::new(&security, directory.clone()),
            security,
            directory,
            started_at: OffsetDateTime::now_utc(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("algorithm", &self.security.algorithm)
            .field("token_ttl", &self.security.token_ttl)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
