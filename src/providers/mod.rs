mod github;
mod provider;

pub use github::{DEFAULT_SCOPE, GitHubProvider};
pub use provider::OAuthProvider;
