//! Package managers that can consume a GitHub Packages token.

mod command;
mod docker;
mod npm;
mod nuget;

pub use command::{CommandError, Invocation};
pub use docker::DockerSetter;
pub use npm::NpmSetter;
pub use nuget::NuGetSetter;

use async_trait::async_trait;

use crate::{AuthError, BoxError};

/// Inputs a setter may need besides the token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetterInputs {
    pub user: Option<String>,
    pub org: Option<String>,
    pub local: bool,
}

/// Configures one package manager with a token. Implementations print their
/// own progress and output.
#[async_trait]
pub trait Setter: Send + Sync {
    async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), BoxError>;
}

pub struct Provider {
    pub name: String,
    pub requires_username: bool,
    pub requires_org: bool,
    setter: Box<dyn Setter>,
}

impl Provider {
    pub fn new(name: impl Into<String>, setter: impl Setter + 'static) -> Self {
        Self {
            name: name.into(),
            requires_username: false,
            requires_org: false,
            setter: Box::new(setter),
        }
    }

    pub fn requiring_username(mut self) -> Self {
        self.requires_username = true;
        self
    }

    pub fn requiring_org(mut self) -> Self {
        self.requires_org = true;
        self
    }

    pub async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), AuthError> {
        self.setter
            .apply(token, inputs)
            .await
            .map_err(|source| AuthError::ProviderSetter {
                provider: self.name.clone(),
                source,
            })
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("requires_username", &self.requires_username)
            .field("requires_org", &self.requires_org)
            .finish_non_exhaustive()
    }
}

/// The fixed set of providers, built once at startup.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Provider::new("npm", NpmSetter),
            Provider::new("docker", DockerSetter).requiring_username(),
            Provider::new("nuget", NuGetSetter)
                .requiring_username()
                .requiring_org(),
        ])
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    pub fn resolve(&self, name: &str) -> Result<&Provider, AuthError> {
        self.providers
            .iter()
            .find(|provider| provider.name == name)
            .ok_or_else(|| AuthError::UnknownProvider {
                name: name.to_string(),
                known: self.names(),
            })
    }
}
