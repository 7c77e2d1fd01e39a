use crate::OAuthProvider;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_URL: &str = "https://api.github.com";
const REGISTRATION_URL: &str = "https://github.com/settings/applications/new";

pub const DEFAULT_SCOPE: &str = "repo write:packages read:org";

#[derive(Debug, Clone)]
pub struct GitHubProvider {
    authorize_url: String,
    token_url: String,
    api_url: String,
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self {
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_url: API_URL.to_string(),
        }
    }
}

impl OAuthProvider for GitHubProvider {
    fn id(&self) -> &str {
        "github"
    }

    fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    fn token_url(&self) -> &str {
        &self.token_url
    }

    fn default_scope(&self) -> &str {
        DEFAULT_SCOPE
    }

    fn registration_url(&self) -> &str {
        REGISTRATION_URL
    }

    // Without this GitHub answers the token request form-encoded.
    fn token_headers(&self) -> Vec<(String, String)> {
        vec![("Accept".to_string(), "application/json".to_string())]
    }
}

impl GitHubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// REST API base, without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::GitHubProvider;
    use crate::OAuthProvider;

    #[test]
    fn defaults_point_at_github() {
        let provider = GitHubProvider::new();
        assert_eq!(
            provider.authorize_url(),
            "https://github.com/login/oauth/authorize"
        );
        assert_eq!(provider.api_url(), "https://api.github.com");
        assert!(
            provider
                .token_headers()
                .contains(&("Accept".to_string(), "application/json".to_string()))
        );
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let provider = GitHubProvider::new().with_api_url("http://127.0.0.1:9000/");
        assert_eq!(provider.api_url(), "http://127.0.0.1:9000");
    }
}
