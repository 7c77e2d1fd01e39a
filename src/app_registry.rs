use std::sync::Arc;

use tracing::{info, warn};

use crate::{AuthError, Browser, CredentialStore, OAuthApplication, Prompter};

/// Result of looking up (or registering) the OAuth application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppResolution {
    Registered(OAuthApplication),
    /// The user chose not to register an app. Not an error.
    Declined,
}

/// Holds the one OAuth application this tool authorizes through.
#[derive(Clone)]
pub struct OAuthAppRegistry {
    store: Arc<dyn CredentialStore>,
    namespace: String,
    registration_url: String,
    callback_url: String,
}

impl OAuthAppRegistry {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        namespace: impl Into<String>,
        registration_url: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            registration_url: registration_url.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Returns the stored application, registering one first if none exists.
    pub fn resolve(
        &self,
        prompter: &dyn Prompter,
        browser: &dyn Browser,
    ) -> Result<AppResolution, AuthError> {
        if let Some(credential) = self.store.find_first(&self.namespace)? {
            return Ok(AppResolution::Registered(credential.into()));
        }

        let proceed = prompter.confirm(
            "In order to use this cli, you first need to create an OAuth app. Open browser now?",
        )?;
        if !proceed {
            prompter.notice("Can't continue without an app setup. Exiting...");
            return Ok(AppResolution::Declined);
        }

        prompter.notice(&format!(
            "Make sure you set the callback to {} so this CLI can handle the callback!",
            self.callback_url
        ));
        if let Err(err) = browser.open(&self.registration_url) {
            warn!(error = %err, "could not open browser");
            prompter.notice(&format!("Open {} to register the app", self.registration_url));
        }

        let client_id = prompter.input("What's your Client ID?")?;
        if client_id.is_empty() {
            return Err(AuthError::SelectionRequired("client id"));
        }
        let client_secret = prompter.secret("What's your Client Secret?")?;
        if client_secret.is_empty() {
            return Err(AuthError::SelectionRequired("client secret"));
        }

        self.store.set(&self.namespace, &client_id, &client_secret)?;
        info!(%client_id, "registered OAuth application");

        Ok(AppResolution::Registered(OAuthApplication::new(
            client_id,
            client_secret,
        )))
    }
}
