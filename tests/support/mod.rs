#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gh_pkg_helper::{
    AuthError, Browser, BoxError, CallbackConfig, GitHubProvider, Prompter, Setter, SetterInputs,
    Settings,
};
use url::Url;
use wiremock::MockServer;

pub const CLIENT_ID: &str = "Iv1.app";
pub const CLIENT_SECRET: &str = "app-secret";

pub fn github(server: &MockServer) -> GitHubProvider {
    GitHubProvider::new()
        .with_authorize_url(format!("{}/login/oauth/authorize", server.uri()))
        .with_token_url(format!("{}/login/oauth/access_token", server.uri()))
        .with_api_url(server.uri())
}

pub fn callback_config() -> CallbackConfig {
    CallbackConfig::new("127.0.0.1", 0, "/auth-code/callback").with_timeout(Duration::from_secs(5))
}

pub fn settings() -> Settings {
    Settings::new().with_callback_config(callback_config())
}

/// Answers prompts from queues filled by the test.
#[derive(Default)]
pub struct ScriptedPrompter {
    confirm: bool,
    inputs: Mutex<VecDeque<String>>,
    selections: Mutex<VecDeque<Option<String>>>,
    offered: Mutex<Vec<Vec<String>>>,
    prompts: Mutex<usize>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn input(self, answer: &str) -> Self {
        self.inputs.lock().unwrap().push_back(answer.to_string());
        self
    }

    pub fn selection(self, answer: Option<&str>) -> Self {
        self.selections
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
        self
    }

    /// Choice lists shown by `select`, in order.
    pub fn offered(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> usize {
        *self.prompts.lock().unwrap()
    }

    fn count(&self) {
        *self.prompts.lock().unwrap() += 1;
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str) -> Result<bool, AuthError> {
        self.count();
        Ok(self.confirm)
    }

    fn input(&self, _message: &str) -> Result<String, AuthError> {
        self.count();
        Ok(self.inputs.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn secret(&self, message: &str) -> Result<String, AuthError> {
        self.input(message)
    }

    fn select(&self, _message: &str, choices: &[String]) -> Result<Option<String>, AuthError> {
        self.count();
        self.offered.lock().unwrap().push(choices.to_vec());
        Ok(self.selections.lock().unwrap().pop_front().flatten())
    }

    fn notice(&self, _message: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub authorize_url: String,
    pub listener_was_bound: bool,
}

/// Plays the part of the user's browser: when handed an authorize URL it
/// checks that the callback listener is already accepting connections, then
/// follows the redirect with the configured query.
pub struct CallbackBrowser {
    query: Option<String>,
    opened: Mutex<Vec<String>>,
    redirects: Mutex<Vec<Redirect>>,
}

impl CallbackBrowser {
    /// Redirects back with `code` and the state from the authorize URL.
    pub fn with_code(code: &str) -> Self {
        Self::with_query(&format!("code={code}"))
    }

    /// Redirects back with the given query (state is appended).
    pub fn with_query(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            opened: Mutex::new(Vec::new()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// Records URLs without ever calling back.
    pub fn passive() -> Self {
        Self {
            query: None,
            opened: Mutex::new(Vec::new()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<Redirect> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Browser for CallbackBrowser {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        self.opened.lock().unwrap().push(url.to_string());

        let parsed = Url::parse(url)?;
        let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();
        let (Some(query), Some(redirect_uri)) = (&self.query, params.get("redirect_uri")) else {
            return Ok(());
        };

        let redirect = Url::parse(redirect_uri)?;
        let addr = format!(
            "{}:{}",
            redirect.host_str().unwrap_or_default(),
            redirect.port().unwrap_or(80)
        );
        let listener_was_bound = std::net::TcpStream::connect(&addr).is_ok();
        self.redirects.lock().unwrap().push(Redirect {
            authorize_url: url.to_string(),
            listener_was_bound,
        });

        let state = params.get("state").cloned().unwrap_or_default();
        let target = format!("{redirect_uri}?{query}&state={state}");
        tokio::spawn(async move {
            let _ = reqwest::get(target).await;
        });
        Ok(())
    }
}

/// Setter that records every invocation instead of running a package manager.
#[derive(Clone, Default)]
pub struct RecordingSetter {
    calls: Arc<Mutex<Vec<(String, SetterInputs)>>>,
    fail_with: Option<&'static str>,
}

impl RecordingSetter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &'static str) -> Self {
        Self {
            calls: Arc::default(),
            fail_with: Some(message),
        }
    }

    pub fn calls(&self) -> Vec<(String, SetterInputs)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Setter for RecordingSetter {
    async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), inputs.clone()));
        match self.fail_with {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }
}
