use std::sync::Arc;

use tracing::info;

use crate::{AccessToken, AuthError, CredentialStore};

/// Package tokens obtained by earlier runs.
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn CredentialStore>,
    namespace: String,
}

impl TokenCache {
    pub fn new(store: Arc<dyn CredentialStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Returns the first cached token. `force_refresh` skips the store
    /// entirely so the caller goes through authorization again.
    pub fn lookup(&self, force_refresh: bool) -> Result<Option<AccessToken>, AuthError> {
        if force_refresh {
            return Ok(None);
        }

        let cached = self.store.find_first(&self.namespace)?;
        if let Some(credential) = &cached {
            info!(account = %credential.account, "found cached package token");
        }
        Ok(cached.map(|credential| credential.secret))
    }

    pub fn store(&self, account_id: &str, token: &str) -> Result<(), AuthError> {
        self.store.set(&self.namespace, account_id, token)
    }
}
