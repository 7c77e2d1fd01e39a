use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse classification used when reporting a failure to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ListenerBindFailure,
    CallbackFailure,
    TokenExchangeFailure,
    UnknownProvider,
    ProviderSetterFailure,
    SelectionRequired,
    Internal,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("could not start callback listener on {addr}: {source}")]
    ListenerBind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("authorization denied by provider: {error}{}", .description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },

    #[error("no authorization callback received within {timeout:?}")]
    CallbackTimeout { timeout: std::time::Duration },

    #[error("token exchange failed{}: {message}", .status.map(|s| format!(" (http {s})")).unwrap_or_default())]
    TokenExchange {
        status: Option<u16>,
        message: String,
        body: String,
    },

    #[error("state mismatch (expected={expected}, received={received})")]
    StateMismatch { expected: String, received: String },

    #[error("unknown provider `{name}` (known: {})", .known.join(", "))]
    UnknownProvider { name: String, known: Vec<String> },

    #[error("{provider} setup failed: {source}")]
    ProviderSetter {
        provider: String,
        #[source]
        source: BoxError,
    },

    #[error("a {0} is required to continue")]
    SelectionRequired(&'static str),

    #[error("credential store error: {0}")]
    Credential(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("os rng error: {message}")]
    OsRng { message: String },

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid redirect uri: {0}")]
    InvalidRedirectUri(String),

    #[error("invalid header: {name}={value}")]
    InvalidHeader { name: String, value: String },

    #[error("invalid response: {message}")]
    InvalidResponse { message: String, body: String },
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::ListenerBind { .. } => ErrorKind::ListenerBindFailure,
            AuthError::AuthorizationDenied { .. } | AuthError::CallbackTimeout { .. } => {
                ErrorKind::CallbackFailure
            }
            AuthError::TokenExchange { .. } | AuthError::StateMismatch { .. } => {
                ErrorKind::TokenExchangeFailure
            }
            AuthError::UnknownProvider { .. } => ErrorKind::UnknownProvider,
            AuthError::ProviderSetter { .. } => ErrorKind::ProviderSetterFailure,
            AuthError::SelectionRequired(_) => ErrorKind::SelectionRequired,
            _ => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, ErrorKind};

    #[test]
    fn token_exchange_message_includes_status() {
        let error = AuthError::TokenExchange {
            status: Some(400),
            message: "bad_verification_code".to_string(),
            body: String::new(),
        };
        assert_eq!(
            error.to_string(),
            "token exchange failed (http 400): bad_verification_code"
        );
        assert_eq!(error.kind(), ErrorKind::TokenExchangeFailure);
    }

    #[test]
    fn bind_failure_is_distinct_from_exchange_failure() {
        let error = AuthError::ListenerBind {
            addr: "127.0.0.1:51321".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert_eq!(error.kind(), ErrorKind::ListenerBindFailure);
        assert!(error.to_string().starts_with("could not start callback listener"));
    }

    #[test]
    fn unknown_provider_lists_known_names() {
        let error = AuthError::UnknownProvider {
            name: "pip".to_string(),
            known: vec!["npm".to_string(), "docker".to_string()],
        };
        assert_eq!(error.to_string(), "unknown provider `pip` (known: npm, docker)");
    }
}
