//! Process-local user directory with bcrypt-hashed passwords.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::password::{hash_password, verify_password};
use super::{CredentialCheck, DirectoryError, Identity, UserDirectory};

#[derive(Debug, Clone)]
struct StoredUser {
    identity: Identity,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<i64, StoredUser>,
    ids_by_name: HashMap<String, i64>,
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryUserDirectory {
    users: RwLock<Users>,
    cost: u32,
    /// Compared against when the username is unknown, so a miss costs the
    /// same bcrypt verification as a wrong password.
    dummy_hash: String,
}

impl InMemoryUserDirectory {
    /// Create an empty directory hashing passwords with bcrypt `cost`.
    pub fn new(cost: u32) -> Result<Self, DirectoryError> {
        Ok(Self {
            users: RwLock::new(Users {
                next_id: 1,
                ..Users::default()
            }),
            cost,
            dummy_hash: hash_password("unused-timing-equalizer", cost)?,
        })
    }

    /// Add a user. Usernames are unique and case-sensitive.
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        active: bool,
    ) -> Result<Identity, DirectoryError> {
        if self.users.read().ids_by_name.contains_key(username) {
            return Err(DirectoryError::UsernameTaken);
        }

        // Hash outside the lock; re-check for a racing insert afterwards.
        let password_hash = hash_password(password, self.cost)?;

        let mut users = self.users.write();
        if users.ids_by_name.contains_key(username) {
            return Err(DirectoryError::UsernameTaken);
        }

        let id = users.next_id;
        users.next_id += 1;

        let identity = Identity {
            id,
            name: username.to_string(),
            active,
        };
        users.ids_by_name.insert(username.to_string(), id);
        users.by_id.insert(
            id,
            StoredUser {
                identity: identity.clone(),
                password_hash,
            },
        );

        debug!(user_id = id, "User added to directory");
        Ok(identity)
    }

    /// Returns `false` if no user has this id.
    pub fn set_active(&self, id: i64, active: bool) -> bool {
        match self.users.write().by_id.get_mut(&id) {
            Some(stored) => {
                stored.identity.active = active;
                true
            }
            None => false,
        }
    }

    /// Returns the removed identity, if any.
    pub fn remove_user(&self, id: i64) -> Option<Identity> {
        let mut users = self.users.write();
        let stored = users.by_id.remove(&id)?;
        users.ids_by_name.remove(&stored.identity.name);
        Some(stored.identity)
    }

    pub fn len(&self) -> usize {
        self.users.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialCheck, DirectoryError> {
        let candidate = {
            let users = self.users.read();
            users
                .ids_by_name
                .get(username)
                .and_then(|id| users.by_id.get(id))
                .cloned()
        };

        let (hash, identity) = match candidate {
            Some(stored) => (stored.password_hash, Some(stored.identity)),
            None => (self.dummy_hash.clone(), None),
        };
        let password = password.to_string();

        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DirectoryError::Internal(format!("password check task failed: {e}")))?;

        Ok(match identity {
            Some(identity) if matches => CredentialCheck::Matched(identity),
            _ => CredentialCheck::Rejected,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DirectoryError> {
        Ok(self
            .users
            .read()
            .by_id
            .get(&id)
            .map(|stored| stored.identity.clone()))
    }

    async fn user_count(&self) -> Result<usize, DirectoryError> {
        Ok(self.len())
    }
}
