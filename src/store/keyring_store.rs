use keyring::Entry;
use tracing::warn;

use crate::{AuthError, Credential};

use super::CredentialStore;
use super::account_index::{self, INDEX_ACCOUNT};

/// Credential store backed by the OS keyring (Keychain, Credential Manager,
/// Secret Service).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringCredentialStore;

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(namespace: &str, account: &str) -> Result<Entry, AuthError> {
        Entry::new(namespace, account).map_err(keyring_error)
    }

    fn read_secret(namespace: &str, account: &str) -> Result<Option<String>, AuthError> {
        match Self::entry(namespace, account)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(keyring_error(err)),
        }
    }

    fn read_index(namespace: &str) -> Result<Vec<String>, AuthError> {
        match Self::read_secret(namespace, INDEX_ACCOUNT)? {
            Some(raw) => account_index::parse(namespace, &raw),
            None => Ok(Vec::new()),
        }
    }

    fn write_index(namespace: &str, accounts: &[String]) -> Result<(), AuthError> {
        let raw = account_index::render(accounts)?;
        Self::entry(namespace, INDEX_ACCOUNT)?
            .set_password(&raw)
            .map_err(keyring_error)
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn find_all(&self, namespace: &str) -> Result<Vec<Credential>, AuthError> {
        let accounts = Self::read_index(namespace)?;
        account_index::collect(namespace, accounts, |account| {
            Self::read_secret(namespace, account)
        })
    }

    /// The index is written before the secret, so a secret is never stored
    /// without being listed.
    fn set(&self, namespace: &str, account: &str, secret: &str) -> Result<(), AuthError> {
        let previous = Self::read_index(namespace)?;
        let updated = account_index::with_account(&previous, account)?;
        if let Some(accounts) = &updated {
            Self::write_index(namespace, accounts)?;
        }

        let stored = Self::entry(namespace, account)?
            .set_password(secret)
            .map_err(keyring_error);
        if stored.is_err() && updated.is_some() {
            if let Err(err) = Self::write_index(namespace, &previous) {
                warn!(%namespace, %account, error = %err, "could not roll back account index");
            }
        }
        stored
    }
}

fn keyring_error(err: keyring::Error) -> AuthError {
    AuthError::Credential(err.to_string())
}
