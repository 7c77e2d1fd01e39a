use std::time::Duration;

use tracing::{info, warn};

use crate::{
    AccessToken, AuthError, Browser, CallbackConfig, OAuthApplication, OAuthClient,
    OAuthClientConfig, OAuthProvider, TokenCache,
};

/// One browser round trip: listen, authorize, exchange, cache.
#[derive(Clone)]
pub struct AuthorizationFlow<P: OAuthProvider + Clone> {
    provider: P,
    cache: TokenCache,
    callback: CallbackConfig,
    request_timeout: Option<Duration>,
}

impl<P: OAuthProvider + Clone> AuthorizationFlow<P> {
    pub fn new(provider: P, cache: TokenCache, callback: CallbackConfig) -> Self {
        Self {
            provider,
            cache,
            callback,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Authorizes `app`, stores the resulting token under its client id and
    /// returns it. Nothing is written when any step fails.
    pub async fn run(
        &self,
        app: &OAuthApplication,
        scope: &str,
        browser: &dyn Browser,
    ) -> Result<AccessToken, AuthError> {
        let mut config = OAuthClientConfig::for_application(app)
            .with_scope(scope)
            .with_callback_config(self.callback.clone());
        if let Some(timeout) = self.request_timeout {
            config = config.with_timeout(timeout);
        }
        let client = OAuthClient::new(self.provider.clone(), config)?;

        info!(provider = %self.provider.id(), client_id = %app.client_id, "authenticating");
        let token = client
            .run_local_flow(|auth| {
                if let Err(err) = browser.open(&auth.authorization_url) {
                    warn!(
                        error = %err,
                        url = %auth.authorization_url,
                        "could not open browser, open the url manually"
                    );
                }
                Ok(())
            })
            .await?;

        self.cache.store(&app.client_id, &token)?;
        info!("got token");
        Ok(token)
    }
}
