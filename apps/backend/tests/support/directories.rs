//! `UserDirectory` doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use auth_backend::directory::{
    CredentialCheck, DirectoryError, Identity, InMemoryUserDirectory, UserDirectory,
};

/// Every call fails as if the backing store were unreachable.
pub struct UnavailableDirectory;

fn refused() -> DirectoryError {
    DirectoryError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl UserDirectory for UnavailableDirectory {
    async fn check_credentials(&self, _: &str, _: &str) -> Result<CredentialCheck, DirectoryError> {
        Err(refused())
    }

    async fn find_by_id(&self, _: i64) -> Result<Option<Identity>, DirectoryError> {
        Err(refused())
    }

    async fn user_count(&self) -> Result<usize, DirectoryError> {
        Err(refused())
    }
}

/// Delegates to an in-memory directory and counts every call.
pub struct CountingDirectory {
    inner: Arc<InMemoryUserDirectory>,
    calls: AtomicUsize,
}

impl CountingDirectory {
    pub fn new(inner: Arc<InMemoryUserDirectory>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for CountingDirectory {
    async fn check_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialCheck, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.check_credentials(username, password).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn user_count(&self) -> Result<usize, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.user_count().await
    }
}
