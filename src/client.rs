use std::time::Duration;

use reqwest::{
    Client, RequestBuilder,
    header::{HeaderName, HeaderValue},
};
use tracing::{debug, info};
use url::Url;

use crate::{
    AccessToken, AuthError, AuthorizationRequest, AuthorizationResponse, CallbackConfig,
    CallbackListener, OAuthApplication, OAuthProvider, TokenResponse, nonce,
};

#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: Option<String>,
    pub authorize_params: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub callback: CallbackConfig,
}

impl OAuthClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
            authorize_params: Vec::new(),
            timeout: None,
            callback: CallbackConfig::default(),
        }
    }

    pub fn for_application(app: &OAuthApplication) -> Self {
        Self::new(app.client_id.clone(), app.client_secret.clone())
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Timeout for requests to the provider, not for the browser round trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_callback_config(mut self, callback: CallbackConfig) -> Self {
        self.callback = callback;
        self
    }

    pub fn with_authorize_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.authorize_params.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct OAuthClient<P: OAuthProvider> {
    provider: P,
    config: OAuthClientConfig,
    http: Client,
}

impl<P: OAuthProvider> OAuthClient<P> {
    pub fn new(provider: P, config: OAuthClientConfig) -> Result<Self, AuthError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            provider,
            config,
            http,
        })
    }

    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        state: &str,
    ) -> Result<AuthorizationRequest, AuthError> {
        let scope = self
            .config
            .scope
            .as_deref()
            .unwrap_or(self.provider.default_scope());

        let mut url = Url::parse(self.provider.authorize_url())?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self
                .provider
                .authorize_params()
                .iter()
                .chain(&self.config.authorize_params)
            {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("client_id", &self.config.client_id);
            pairs.append_pair("redirect_uri", redirect_uri);
            pairs.append_pair("scope", scope);
            pairs.append_pair("state", state);
        }

        Ok(AuthorizationRequest {
            authorization_url: url.to_string(),
            state: state.to_string(),
            scope: scope.to_string(),
        })
    }

    /// Runs the whole browser round trip and returns the access token.
    ///
    /// The callback listener is bound before `on_authorize` is called, so the
    /// closure may open the browser right away.
    pub async fn run_local_flow<F>(&self, on_authorize: F) -> Result<AccessToken, AuthError>
    where
        F: FnOnce(&AuthorizationRequest) -> Result<(), AuthError>,
    {
        let pending = CallbackListener::new(self.config.callback.clone())
            .start()
            .await?;
        let redirect_uri = pending.redirect_uri().to_string();
        let state = nonce::generate_state()?;
        let auth = self.authorization_url(&redirect_uri, &state)?;

        on_authorize(&auth)?;

        info!(redirect_uri = %redirect_uri, "waiting for authorization callback");
        let response = pending.wait().await?;

        self.exchange_code(response, &redirect_uri, &state).await
    }

    pub async fn exchange_code(
        &self,
        response: AuthorizationResponse,
        redirect_uri: &str,
        expected_state: &str,
    ) -> Result<AccessToken, AuthError> {
        let AuthorizationResponse { code, state } = response;

        if let Some(returned) = state.as_deref() {
            if returned != expected_state {
                return Err(AuthError::StateMismatch {
                    expected: expected_state.to_string(),
                    received: returned.to_string(),
                });
            }
        }

        let payload = vec![
            ("client_id".to_string(), self.config.client_id.clone()),
            ("client_secret".to_string(), self.config.client_secret.clone()),
            ("code".to_string(), code),
            ("redirect_uri".to_string(), redirect_uri.to_string()),
            ("state".to_string(), expected_state.to_string()),
        ];

        self.send_token_request(payload).await
    }

    async fn send_token_request(
        &self,
        payload: Vec<(String, String)>,
    ) -> Result<AccessToken, AuthError> {
        let headers = self.provider.token_headers();
        let mut builder = self.http.post(self.provider.token_url());
        builder = apply_headers(builder, &headers)?;

        debug!(token_url = %self.provider.token_url(), "exchanging authorization code");
        let response = builder.form(&payload).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::TokenExchange {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
                body,
            });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|err| AuthError::TokenExchange {
                status: Some(status.as_u16()),
                message: format!("unreadable token response: {err}"),
                body: body.clone(),
            })?;

        match token.access_token.filter(|value| !value.is_empty()) {
            Some(access_token) => Ok(access_token),
            None => Err(AuthError::TokenExchange {
                status: Some(status.as_u16()),
                message: token
                    .error_description
                    .or(token.error)
                    .unwrap_or_else(|| "response did not include an access_token".to_string()),
                body,
            }),
        }
    }
}

fn apply_headers(
    mut builder: RequestBuilder,
    headers: &[(String, String)],
) -> Result<RequestBuilder, AuthError> {
    for (name, value) in headers {
        let name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| AuthError::InvalidHeader {
                name: name.clone(),
                value: value.clone(),
            })?;
        let value = HeaderValue::from_str(value).map_err(|_| AuthError::InvalidHeader {
            name: name.to_string(),
            value: value.clone(),
        })?;
        builder = builder.header(name, value);
    }
    Ok(builder)
}
