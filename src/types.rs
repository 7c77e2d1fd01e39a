use std::collections::BTreeMap;

use serde::Deserialize;

use crate::AuthError;

pub type AccessToken = String;

/// One secret stored under a credential namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub account: String,
    pub secret: String,
}

impl Credential {
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            secret: secret.into(),
        }
    }
}

/// A registered OAuth application. The client id doubles as the account
/// name of every token it obtains.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthApplication {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthApplication {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for OAuthApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthApplication")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl From<Credential> for OAuthApplication {
    fn from(credential: Credential) -> Self {
        Self {
            client_id: credential.account,
            client_secret: credential.secret,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub authorization_url: String,
    pub state: String,
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct AuthorizationResponse {
    pub code: String,
    pub state: Option<String>,
}

impl AuthorizationResponse {
    /// Reads the query of the redirect the provider sent back. A callback
    /// without a `code` is the provider reporting a denial or an error.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, AuthError> {
        match params.get("code").filter(|code| !code.is_empty()) {
            Some(code) => Ok(Self {
                code: code.clone(),
                state: params.get("state").cloned(),
            }),
            None => Err(AuthError::AuthorizationDenied {
                error: params
                    .get("error")
                    .cloned()
                    .unwrap_or_else(|| "missing_code".to_string()),
                description: params.get("error_description").cloned(),
            }),
        }
    }
}

/// Token endpoint body. GitHub answers some failures with `200` and an
/// `error` field instead of `access_token`, so every field is optional here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
