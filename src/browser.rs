use crate::AuthError;

pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> Result<(), AuthError>;
}

/// Opens URLs in the user's default browser.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

#[cfg(feature = "cli")]
impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        webbrowser::open(url).map_err(AuthError::from)
    }
}
