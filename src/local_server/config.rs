use std::time::Duration;

pub(crate) const DEFAULT_CALLBACK_HTML: &str = include_str!("html/callback.html");
pub(crate) const DEFAULT_NOT_FOUND_HTML: &str = include_str!("html/not_found.html");

pub const DEFAULT_CALLBACK_HOST: &str = "127.0.0.1";
pub const DEFAULT_CALLBACK_PORT: u16 = 51321;
pub const DEFAULT_CALLBACK_PATH: &str = "/auth-code/callback";

/// Where the callback listener binds and how long it waits for the redirect.
///
/// A port of `0` binds an ephemeral port; the redirect uri handed to the
/// provider always carries the port that was actually bound.
#[derive(Debug, Clone)]
pub struct CallbackConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub timeout: Option<Duration>,
    pub callback_html: String,
    pub not_found_html: String,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CALLBACK_HOST, DEFAULT_CALLBACK_PORT, DEFAULT_CALLBACK_PATH)
    }
}

impl CallbackConfig {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: normalize_path(path.into()),
            timeout: None,
            callback_html: DEFAULT_CALLBACK_HTML.to_string(),
            not_found_html: DEFAULT_NOT_FOUND_HTML.to_string(),
        }
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

fn normalize_path(path: String) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}
