//! Authenticate package managers against GitHub Packages.
//!
//! Runs the OAuth 2.0 authorization-code flow from the command line with a
//! short-lived local callback listener, caches the resulting token in a
//! credential store, and hands it to a package-manager setter (npm, docker,
//! NuGet).

mod app_registry;
mod browser;
mod cache;
mod client;
mod error;
mod flow;
mod local_server;
mod nonce;
mod orchestrator;
mod orgs;
mod package_managers;
mod prompt;
mod providers;
mod settings;
mod store;
mod types;

pub use app_registry::{AppResolution, OAuthAppRegistry};
#[cfg(feature = "cli")]
pub use browser::SystemBrowser;
pub use browser::Browser;
pub use cache::TokenCache;
pub use client::{OAuthClient, OAuthClientConfig};
pub use error::{AuthError, BoxError, ErrorKind};
pub use flow::AuthorizationFlow;
pub use local_server::{
    CallbackConfig, CallbackListener, DEFAULT_CALLBACK_HOST, DEFAULT_CALLBACK_PATH,
    DEFAULT_CALLBACK_PORT, ListenerState, ListenerStatus, PendingCallback,
};
pub use orchestrator::{Orchestrator, Outcome, RunOptions};
pub use orgs::OrgDirectory;
pub use package_managers::{
    CommandError, DockerSetter, Invocation, NpmSetter, NuGetSetter, Provider, ProviderRegistry,
    Setter, SetterInputs,
};
pub use prompt::Prompter;
#[cfg(feature = "cli")]
pub use prompt::TerminalPrompter;
pub use providers::{DEFAULT_SCOPE, GitHubProvider, OAuthProvider};
pub use settings::{
    DEFAULT_AUTHORIZATION_TIMEOUT, OAUTH_APP_NAMESPACE, PACKAGE_TOKEN_NAMESPACE, Settings,
};
#[cfg(feature = "keyring")]
pub use store::KeyringCredentialStore;
pub use store::{CredentialStore, MemoryCredentialStore};
pub use types::{
    AccessToken, AuthorizationRequest, AuthorizationResponse, Credential, OAuthApplication,
    TokenResponse,
};
