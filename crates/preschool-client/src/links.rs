//! Turning an activated link token into a navigation.

use tracing::{info, warn};

use crate::error::ClientError;
use crate::render::LinkToken;

/// Where an activated link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Played in the in-app video screen.
    Video(String),
    /// Handed to the platform URL opener.
    External(String),
}

impl LinkTarget {
    /// Tokens already starting with `http` are kept as-is, anything else
    /// gets an `https://` prefix. Tokens ending in `.mp4` (any case) are
    /// videos.
    pub fn from_token(token: &str) -> Self {
        let url = if token.starts_with("http") {
            token.to_string()
        } else {
            format!("https://{token}")
        };

        if token.to_lowercase().ends_with(".mp4") {
            Self::Video(url)
        } else {
            Self::External(url)
        }
    }
}

/// Front-end hooks invoked when a link is activated.
pub trait LinkHandler {
    /// Navigate to the video screen with this URL.
    fn open_video(&mut self, url: &str);

    /// Open the URL with the platform's external handler.
    fn open_external(&mut self, url: &str) -> Result<(), ClientError>;
}

/// Dispatch an activated token to the matching handler hook.
pub fn activate(token: &LinkToken<'_>, handler: &mut impl LinkHandler) -> Result<(), ClientError> {
    match token.target() {
        LinkTarget::Video(url) => {
            info!(url = %url, "Opening video link");
            handler.open_video(&url);
            Ok(())
        }
        LinkTarget::External(url) => {
            info!(url = %url, "Opening external link");
            handler.open_external(&url).map_err(|e| {
                warn!(url = %url, error = %e, "External link handler failed");
                e
            })
        }
    }
}
