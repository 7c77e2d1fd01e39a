use std::sync::Arc;

use tracing::info;

use crate::{
    AccessToken, AppResolution, AuthError, AuthorizationFlow, Browser, CredentialStore,
    GitHubProvider, OAuthAppRegistry, OAuthProvider, OrgDirectory, Prompter, Provider,
    ProviderRegistry, SetterInputs, Settings, TokenCache,
};

/// What the caller asked for on the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub provider: Option<String>,
    pub user: Option<String>,
    pub org: Option<String>,
    pub local: bool,
    pub force_refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Configured { provider: String },
    /// No OAuth app exists and the user chose not to register one.
    Declined,
}

/// Runs provider selection, token resolution, input collection and the
/// provider's setter, in that order.
pub struct Orchestrator {
    settings: Settings,
    github: GitHubProvider,
    registry: ProviderRegistry,
    orgs: OrgDirectory,
    store: Arc<dyn CredentialStore>,
    prompter: Arc<dyn Prompter>,
    browser: Arc<dyn Browser>,
}

impl Orchestrator {
    pub fn new(
        settings: Settings,
        store: Arc<dyn CredentialStore>,
        prompter: Arc<dyn Prompter>,
        browser: Arc<dyn Browser>,
    ) -> Self {
        let github = GitHubProvider::new();
        Self {
            settings,
            orgs: OrgDirectory::for_provider(&github),
            github,
            registry: ProviderRegistry::builtin(),
            store,
            prompter,
            browser,
        }
    }

    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_github(mut self, github: GitHubProvider) -> Self {
        self.orgs = OrgDirectory::for_provider(&github);
        self.github = github;
        self
    }

    pub fn token_cache(&self) -> TokenCache {
        TokenCache::new(
            self.store.clone(),
            self.settings.package_token_namespace.clone(),
        )
    }

    pub fn app_registry(&self) -> OAuthAppRegistry {
        OAuthAppRegistry::new(
            self.store.clone(),
            self.settings.oauth_app_namespace.clone(),
            self.github.registration_url(),
            self.settings.callback.redirect_uri(),
        )
    }

    pub fn flow(&self) -> AuthorizationFlow<GitHubProvider> {
        AuthorizationFlow::new(
            self.github.clone(),
            self.token_cache(),
            self.settings.callback.clone(),
        )
        .with_request_timeout(self.settings.request_timeout)
    }

    pub async fn run(&self, options: RunOptions) -> Result<Outcome, AuthError> {
        let provider = self.resolve_provider(options.provider.as_deref())?;

        let Some(token) = self.resolve_token(options.force_refresh).await? else {
            return Ok(Outcome::Declined);
        };

        let inputs = self.resolve_inputs(provider, &options, &token).await?;

        info!(provider = %provider.name, "setting up authentication");
        provider.apply(&token, &inputs).await?;
        info!(provider = %provider.name, "done");

        Ok(Outcome::Configured {
            provider: provider.name.clone(),
        })
    }

    fn resolve_provider(&self, requested: Option<&str>) -> Result<&Provider, AuthError> {
        if let Some(name) = requested {
            return self.registry.resolve(name);
        }

        let choice = self
            .prompter
            .select(
                "What package manager would you like to authenticate?",
                &self.registry.names(),
            )?
            .filter(|choice| !choice.is_empty())
            .ok_or(AuthError::SelectionRequired("provider"))?;
        self.registry.resolve(&choice)
    }

    /// `None` means the user declined to register an OAuth app.
    async fn resolve_token(&self, force_refresh: bool) -> Result<Option<AccessToken>, AuthError> {
        let cache = self.token_cache();
        if let Some(token) = cache.lookup(force_refresh)? {
            return Ok(Some(token));
        }

        let app = match self
            .app_registry()
            .resolve(self.prompter.as_ref(), self.browser.as_ref())?
        {
            AppResolution::Registered(app) => app,
            AppResolution::Declined => return Ok(None),
        };

        let scope = self
            .settings
            .scope
            .as_deref()
            .unwrap_or(self.github.default_scope());
        let token = self.flow().run(&app, scope, self.browser.as_ref()).await?;
        Ok(Some(token))
    }

    async fn resolve_inputs(
        &self,
        provider: &Provider,
        options: &RunOptions,
        token: &str,
    ) -> Result<SetterInputs, AuthError> {
        let mut user = options.user.clone().filter(|user| !user.is_empty());
        if user.is_none() && provider.requires_username {
            let answer = self.prompter.input("What's your username?")?;
            if answer.is_empty() {
                return Err(AuthError::SelectionRequired("username"));
            }
            user = Some(answer);
        }

        let mut org = options.org.clone().filter(|org| !org.is_empty());
        if org.is_none() && provider.requires_org {
            let orgs = self.orgs.list_orgs(token).await?;
            let choice = self
                .prompter
                .select("What organization are you getting packages from?", &orgs)?
                .filter(|choice| !choice.is_empty())
                .ok_or(AuthError::SelectionRequired("organization"))?;
            org = Some(choice);
        }

        Ok(SetterInputs {
            user,
            org,
            local: options.local,
        })
    }
}
