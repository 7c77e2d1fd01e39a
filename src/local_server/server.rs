use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{AuthError, AuthorizationResponse};

use super::ListenerState;
use super::config::CallbackConfig;
use super::http::{
    CallbackState, ResponseReceiver, SharedListenerState, callback_handler, deliver,
    fallback_handler, set_status, wait_for_response,
};

/// Short-lived HTTP endpoint that catches exactly one OAuth redirect.
#[derive(Debug, Clone, Default)]
pub struct CallbackListener {
    config: CallbackConfig,
}

impl CallbackListener {
    pub fn new(config: CallbackConfig) -> Self {
        Self { config }
    }

    /// Binds the socket and starts serving. The socket is accepting
    /// connections by the time this returns.
    pub async fn start(&self) -> Result<PendingCallback, AuthError> {
        let status: SharedListenerState = Arc::new(Mutex::new(ListenerState::Unbound));
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AuthError::ListenerBind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;
        set_status(&status, ListenerState::Bound);
        debug!(%local_addr, path = %self.config.path, "callback listener bound");

        let (response_tx, response_rx) = oneshot::channel();
        let shutdown = Arc::new(Notify::new());
        let state = CallbackState {
            callback_html: self.config.callback_html.clone(),
            not_found_html: self.config.not_found_html.clone(),
            response_tx: Arc::new(Mutex::new(Some(response_tx))),
            status: status.clone(),
            shutdown: shutdown.clone(),
        };

        let app = Router::new()
            .route(&self.config.path, get(callback_handler))
            .fallback(fallback_handler)
            .with_state(state.clone());

        let signal = shutdown.clone();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            signal.notified().await;
        });

        let server_handle = tokio::spawn(async move {
            if let Err(err) = server.await {
                warn!(error = %err, "callback listener failed");
                deliver(
                    &state,
                    Err(AuthError::InvalidResponse {
                        message: err.to_string(),
                        body: String::new(),
                    }),
                );
            }
        });

        Ok(PendingCallback {
            redirect_uri: format!(
                "http://{}:{}{}",
                self.config.host,
                local_addr.port(),
                self.config.path
            ),
            local_addr,
            status,
            response_rx: Some(response_rx),
            shutdown,
            server: Some(server_handle),
            timeout: self.config.timeout,
        })
    }
}

/// A bound listener waiting for its one callback.
///
/// The socket is released when [`PendingCallback::wait`] returns or, if the
/// wait never happens, when this value is dropped.
#[derive(Debug)]
pub struct PendingCallback {
    redirect_uri: String,
    local_addr: SocketAddr,
    status: SharedListenerState,
    response_rx: Option<ResponseReceiver>,
    shutdown: Arc<Notify>,
    server: Option<JoinHandle<()>>,
    timeout: Option<Duration>,
}

impl PendingCallback {
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ListenerState {
        self.status_handle().get()
    }

    /// A view of the listener state that outlives [`PendingCallback::wait`].
    pub fn status_handle(&self) -> ListenerStatus {
        ListenerStatus(self.status.clone())
    }

    pub async fn wait(mut self) -> Result<AuthorizationResponse, AuthError> {
        let response = match self.response_rx.take() {
            Some(response_rx) => wait_for_response(response_rx, self.timeout).await,
            None => Err(AuthError::InvalidResponse {
                message: "callback already consumed".to_string(),
                body: String::new(),
            }),
        };

        if response.is_err() && self.state() == ListenerState::Bound {
            set_status(&self.status, ListenerState::Errored);
        }

        self.shutdown.notify_one();
        if let Some(server) = self.server.take() {
            let _ = server.await;
        }
        debug!(local_addr = %self.local_addr, "callback listener closed");

        response
    }
}

#[derive(Debug, Clone)]
pub struct ListenerStatus(SharedListenerState);

impl ListenerStatus {
    pub fn get(&self) -> ListenerState {
        self.0
            .lock()
            .map(|guard| *guard)
            .unwrap_or(ListenerState::Errored)
    }
}

impl Drop for PendingCallback {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            self.shutdown.notify_one();
            server.abort();
        }
    }
}
