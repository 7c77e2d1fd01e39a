use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

use crate::{AuthError, GitHubProvider};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Organization {
    login: String,
}

/// Lists the organizations the token's user belongs to.
#[derive(Debug, Clone)]
pub struct OrgDirectory {
    http: Client,
    api_url: String,
}

impl OrgDirectory {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_http_client(api_url, Client::new())
    }

    pub fn with_http_client(api_url: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn for_provider(provider: &GitHubProvider) -> Self {
        Self::new(provider.api_url())
    }

    pub async fn list_orgs(&self, token: &str) -> Result<Vec<String>, AuthError> {
        let url = format!("{}/user/orgs", self.api_url);
        debug!(%url, "listing organizations");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AuthError::InvalidResponse {
                message: format!("listing organizations failed with http {}", status.as_u16()),
                body,
            });
        }

        let orgs: Vec<Organization> =
            serde_json::from_str(&body).map_err(|err| AuthError::InvalidResponse {
                message: err.to_string(),
                body,
            })?;
        Ok(orgs.into_iter().map(|org| org.login).collect())
    }
}
