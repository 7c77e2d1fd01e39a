/// Endpoints and defaults of an OAuth authorization server.
pub trait OAuthProvider: Send + Sync {
    fn id(&self) -> &str;
    fn authorize_url(&self) -> &str;
    fn token_url(&self) -> &str;
    fn default_scope(&self) -> &str;

    /// Page where a user registers a new OAuth application.
    fn registration_url(&self) -> &str;

    fn authorize_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn token_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
