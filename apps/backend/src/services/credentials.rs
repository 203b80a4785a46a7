//! Username/password checks against the user directory.

use std::sync::Arc;

use tracing::debug;

use crate::auth::failure::{AuthError, AuthFailure};
use crate::directory::{CredentialCheck, Identity, UserDirectory};

#[derive(Clone)]
pub struct CredentialVerifier {
    directory: Arc<dyn UserDirectory>,
}

impl CredentialVerifier {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve a username/password pair to an active identity.
    ///
    /// The username is trimmed; the password is compared exactly as given.
    /// Blank input fails with `MalformedInput` before the directory is called.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthFailure::MalformedInput.into());
        }

        match self.directory.check_credentials(username, password).await? {
            CredentialCheck::Matched(identity) if identity.active => {
                debug!(user_id = identity.id, "Credentials accepted");
                Ok(identity)
            }
            CredentialCheck::Matched(_) => Err(AuthFailure::InactiveSubject.into()),
            CredentialCheck::Rejected => Err(AuthFailure::BadCredentials.into()),
        }
    }
}
