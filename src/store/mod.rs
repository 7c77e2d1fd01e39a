//! Secret storage keyed by `(namespace, account)`.

#[cfg(any(feature = "keyring", test))]
mod account_index;
#[cfg(feature = "keyring")]
mod keyring_store;
mod memory;

#[cfg(feature = "keyring")]
pub use keyring_store::KeyringCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::{AuthError, Credential};

/// Backend for persisted secrets.
///
/// `find_all` returns credentials in a stable order (insertion order for the
/// bundled stores) so callers that take the first match behave the same on
/// every run. `set` overwrites the secret of an existing account.
pub trait CredentialStore: Send + Sync {
    fn find_all(&self, namespace: &str) -> Result<Vec<Credential>, AuthError>;

    fn set(&self, namespace: &str, account: &str, secret: &str) -> Result<(), AuthError>;

    fn find_first(&self, namespace: &str) -> Result<Option<Credential>, AuthError> {
        Ok(self.find_all(namespace)?.into_iter().next())
    }
}
