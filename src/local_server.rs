//! Local redirect endpoint for the authorization-code flow.

mod config;
mod http;
mod server;

pub use config::{
    CallbackConfig, DEFAULT_CALLBACK_HOST, DEFAULT_CALLBACK_PATH, DEFAULT_CALLBACK_PORT,
};
pub use server::{CallbackListener, ListenerStatus, PendingCallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerState {
    #[default]
    Unbound,
    Bound,
    Fulfilled,
    Errored,
}
