//! Per-namespace list of account names kept next to the secrets. The OS
//! keyrings have no portable way to enumerate entries by service.

use tracing::debug;

use crate::{AuthError, Credential};

/// Account under which each namespace keeps the JSON list of its accounts.
pub(super) const INDEX_ACCOUNT: &str = "__accounts__";

pub(super) fn parse(namespace: &str, raw: &str) -> Result<Vec<String>, AuthError> {
    serde_json::from_str(raw).map_err(|err| {
        AuthError::Credential(format!("corrupt account index for {namespace}: {err}"))
    })
}

pub(super) fn render(accounts: &[String]) -> Result<String, AuthError> {
    serde_json::to_string(accounts).map_err(|err| AuthError::Credential(err.to_string()))
}

/// Returns the index with `account` appended, or `None` when it is already
/// listed and the index needs no write.
pub(super) fn with_account(
    accounts: &[String],
    account: &str,
) -> Result<Option<Vec<String>>, AuthError> {
    if account == INDEX_ACCOUNT {
        return Err(AuthError::Credential(format!("`{INDEX_ACCOUNT}` is reserved")));
    }
    if accounts.iter().any(|existing| existing == account) {
        return Ok(None);
    }
    let mut updated = accounts.to_vec();
    updated.push(account.to_string());
    Ok(Some(updated))
}

/// Looks up every indexed account in index order. Accounts whose secret is
/// gone are skipped.
pub(super) fn collect<F>(
    namespace: &str,
    accounts: Vec<String>,
    mut lookup: F,
) -> Result<Vec<Credential>, AuthError>
where
    F: FnMut(&str) -> Result<Option<String>, AuthError>,
{
    let mut credentials = Vec::with_capacity(accounts.len());
    for account in accounts {
        match lookup(&account)? {
            Some(secret) => credentials.push(Credential::new(account, secret)),
            None => debug!(%namespace, %account, "indexed keyring entry is gone"),
        }
    }
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{INDEX_ACCOUNT, collect, parse, render, with_account};
    use crate::{AuthError, Credential};

    fn accounts(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn new_accounts_are_appended_in_order() {
        let first = with_account(&[], "Iv1.a").unwrap().unwrap();
        let second = with_account(&first, "Iv1.b").unwrap().unwrap();
        assert_eq!(second, accounts(&["Iv1.a", "Iv1.b"]));
    }

    #[test]
    fn known_account_needs_no_write() {
        let index = accounts(&["Iv1.a", "Iv1.b"]);
        assert!(with_account(&index, "Iv1.a").unwrap().is_none());
    }

    #[test]
    fn index_account_is_reserved() {
        let result = with_account(&[], INDEX_ACCOUNT);
        assert!(matches!(result, Err(AuthError::Credential(_))));
    }

    #[test]
    fn rendered_index_parses_back() {
        let index = accounts(&["Iv1.a", "Iv1.b"]);
        let raw = render(&index).unwrap();
        assert_eq!(parse("ns", &raw).unwrap(), index);
    }

    #[test]
    fn corrupt_index_names_the_namespace() {
        let error = parse("pkgs://github.com", "not json").unwrap_err();
        assert!(error.to_string().contains("pkgs://github.com"));
    }

    #[test]
    fn stale_entries_are_skipped_and_order_kept() {
        let secrets = HashMap::from([("Iv1.a", "tok_a"), ("Iv1.c", "tok_c")]);
        let credentials = collect("ns", accounts(&["Iv1.c", "Iv1.b", "Iv1.a"]), |account| {
            Ok(secrets.get(account).map(|secret| secret.to_string()))
        })
        .unwrap();
        assert_eq!(
            credentials,
            [
                Credential::new("Iv1.c", "tok_c"),
                Credential::new("Iv1.a", "tok_a")
            ]
        );
    }

    #[test]
    fn lookup_errors_propagate() {
        let result = collect("ns", accounts(&["Iv1.a"]), |_| {
            Err(AuthError::Credential("locked".to_string()))
        });
        assert!(matches!(result, Err(AuthError::Credential(_))));
    }
}
