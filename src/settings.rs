use std::time::Duration;

use crate::CallbackConfig;

/// Namespace holding the registered OAuth application (account = client id).
pub const OAUTH_APP_NAMESPACE: &str = "gh-pkg-helper://github.com";
/// Namespace holding package tokens (account = client id that obtained it).
pub const PACKAGE_TOKEN_NAMESPACE: &str = "pkgs://github.com";

pub const DEFAULT_AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Runtime settings shared by the token cache, app registry and flow.
#[derive(Debug, Clone)]
pub struct Settings {
    pub oauth_app_namespace: String,
    pub package_token_namespace: String,
    pub scope: Option<String>,
    pub callback: CallbackConfig,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            oauth_app_namespace: OAUTH_APP_NAMESPACE.to_string(),
            package_token_namespace: PACKAGE_TOKEN_NAMESPACE.to_string(),
            scope: None,
            callback: CallbackConfig::default().with_timeout(DEFAULT_AUTHORIZATION_TIMEOUT),
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.callback = self.callback.with_port(port);
        self
    }

    /// `None` waits for the browser redirect indefinitely.
    pub fn with_authorization_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.callback = match timeout {
            Some(timeout) => self.callback.with_timeout(timeout),
            None => self.callback.without_timeout(),
        };
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_callback_config(mut self, callback: CallbackConfig) -> Self {
        self.callback = callback;
        self
    }
}
