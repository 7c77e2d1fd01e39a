use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tokio::sync::{Notify, oneshot};
use tracing::{debug, warn};

use crate::{AuthError, AuthorizationResponse};

use super::ListenerState;

type ResponseResult = Result<AuthorizationResponse, AuthError>;
pub(super) type ResponseSender = oneshot::Sender<ResponseResult>;
pub(super) type ResponseReceiver = oneshot::Receiver<ResponseResult>;
pub(super) type SharedResponseSender = Arc<Mutex<Option<ResponseSender>>>;
pub(super) type SharedListenerState = Arc<Mutex<ListenerState>>;

#[derive(Clone)]
pub(super) struct CallbackState {
    pub(super) callback_html: String,
    pub(super) not_found_html: String,
    pub(super) response_tx: SharedResponseSender,
    pub(super) status: SharedListenerState,
    pub(super) shutdown: Arc<Notify>,
}

pub(super) fn set_status(status: &SharedListenerState, next: ListenerState) {
    if let Ok(mut guard) = status.lock() {
        *guard = next;
    }
}

/// Hands the callback result to the waiting flow. Only the first call has a
/// sender to take; later calls are dropped and return `false`.
pub(super) fn deliver(state: &CallbackState, response: ResponseResult) -> bool {
    let Ok(mut guard) = state.response_tx.lock() else {
        return false;
    };
    let Some(sender) = guard.take() else {
        return false;
    };

    let next = if response.is_ok() {
        ListenerState::Fulfilled
    } else {
        ListenerState::Errored
    };
    set_status(&state.status, next);
    let _ = sender.send(response);
    true
}

pub(super) async fn callback_handler(
    State(state): State<CallbackState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> impl IntoResponse {
    let response = AuthorizationResponse::from_params(&params);
    if response.is_err() {
        warn!(?params, "authorization callback arrived without a code");
    }

    if deliver(&state, response) {
        debug!("authorization callback received, closing listener");
    } else {
        debug!("ignoring repeated authorization callback");
    }
    state.shutdown.notify_one();

    (StatusCode::OK, Html(state.callback_html))
}

pub(super) async fn fallback_handler(State(state): State<CallbackState>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(state.not_found_html))
}

pub(super) async fn wait_for_response(
    response_rx: ResponseReceiver,
    timeout: Option<Duration>,
) -> ResponseResult {
    let closed = |_| AuthError::InvalidResponse {
        message: "callback listener stopped before a response arrived".to_string(),
        body: String::new(),
    };

    if let Some(timeout) = timeout {
        let result = tokio::time::timeout(timeout, response_rx)
            .await
            .map_err(|_| AuthError::CallbackTimeout { timeout })?;
        result.map_err(closed)?
    } else {
        response_rx.await.map_err(closed)?
    }
}
