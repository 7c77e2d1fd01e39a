use std::sync::Mutex;

use crate::{AuthError, Credential};

use super::CredentialStore;

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<Vec<(String, Credential)>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored credentials across all namespaces.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find_all(&self, namespace: &str) -> Result<Vec<Credential>, AuthError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Credential("memory store lock poisoned".to_string()))?;
        Ok(entries
            .iter()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, credential)| credential.clone())
            .collect())
    }

    fn set(&self, namespace: &str, account: &str, secret: &str) -> Result<(), AuthError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Credential("memory store lock poisoned".to_string()))?;
        match entries
            .iter_mut()
            .find(|(ns, credential)| ns == namespace && credential.account == account)
        {
            Some((_, credential)) => credential.secret = secret.to_string(),
            None => entries.push((namespace.to_string(), Credential::new(account, secret))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryCredentialStore;
    use crate::{Credential, CredentialStore};

    #[test]
    fn keeps_namespaces_apart_in_insertion_order() {
        let store = MemoryCredentialStore::new();
        store.set("apps", "b", "1").unwrap();
        store.set("tokens", "x", "2").unwrap();
        store.set("apps", "a", "3").unwrap();

        assert_eq!(
            store.find_all("apps").unwrap(),
            vec![Credential::new("b", "1"), Credential::new("a", "3")]
        );
        assert_eq!(store.find_first("tokens").unwrap(), Some(Credential::new("x", "2")));
        assert!(store.find_all("missing").unwrap().is_empty());
    }

    #[test]
    fn set_overwrites_existing_account() {
        let store = MemoryCredentialStore::new();
        store.set("apps", "a", "old").unwrap();
        store.set("apps", "a", "new").unwrap();

        assert_eq!(store.find_all("apps").unwrap(), vec![Credential::new("a", "new")]);
        assert_eq!(store.len(), 1);
    }
}
