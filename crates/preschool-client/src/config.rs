//! Client configuration loaded from environment variables.

use std::str::FromStr;

use preschool_shared::constants::DEFAULT_SERVER_URL;

use crate::error::ClientError;

/// Host platform the client runs on. Only matters for the emulator
/// loopback rewrite applied before video playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Desktop,
}

impl FromStr for Platform {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "desktop" => Ok(Self::Desktop),
            other => Err(ClientError::UnknownPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the reply server.
    /// Env: `SERVER_URL`
    /// Default: `http://10.0.2.2:5000`
    pub server_url: String,

    /// Env: `CLIENT_PLATFORM` (`android`, `ios`, `desktop`)
    /// Default: `android`
    pub platform: Platform,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            platform: Platform::Android,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SERVER_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                tracing::warn!("Empty SERVER_URL, using default");
            } else {
                config.server_url = url.to_string();
            }
        }

        if let Some(value) = lookup("CLIENT_PLATFORM") {
            match value.parse() {
                Ok(platform) => config.platform = platform,
                Err(e) => tracing::warn!(error = %e, "Invalid CLIENT_PLATFORM, using default"),
            }
        }

        config
    }
}
