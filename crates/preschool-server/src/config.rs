//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development against an Android emulator.

use std::net::SocketAddr;
use std::path::PathBuf;

use preschool_shared::constants::{APP_NAME, DEFAULT_HTTP_PORT, DEFAULT_SERVER_URL};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:5000`
    pub http_addr: SocketAddr,

    /// Base URL clients use to reach this server. Canned replies that point
    /// at videos or documents are built from it.
    /// Env: `PUBLIC_BASE_URL`
    /// Default: `http://10.0.2.2:5000` (host loopback seen from an emulator)
    pub public_base_url: String,

    /// Directory served under `/videos`.
    /// Env: `VIDEOS_DIR`
    /// Default: `./videos`
    pub videos_dir: PathBuf,

    /// Directory served under `/files` (PDF, Word).
    /// Env: `FILES_DIR`
    /// Default: `./files`
    pub files_dir: PathBuf,

    /// Human-readable name reported by `/info`.
    /// Env: `INSTANCE_NAME`
    /// Default: `"PreSchool Chat"`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            public_base_url: DEFAULT_SERVER_URL.to_string(),
            videos_dir: PathBuf::from("./videos"),
            files_dir: PathBuf::from("./files"),
            instance_name: APP_NAME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(url) = lookup("PUBLIC_BASE_URL") {
            match normalize_base_url(&url) {
                Some(url) => config.public_base_url = url,
                None => {
                    tracing::warn!(value = %url, "Invalid PUBLIC_BASE_URL, using default");
                }
            }
        }

        if let Some(path) = lookup("VIDEOS_DIR") {
            config.videos_dir = PathBuf::from(path);
        }

        if let Some(path) = lookup("FILES_DIR") {
            config.files_dir = PathBuf::from(path);
        }

        if let Some(name) = lookup("INSTANCE_NAME") {
            if !name.trim().is_empty() {
                config.instance_name = name;
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter.

        config
    }
}

/// Trim whitespace and trailing slashes; reject anything that is not an
/// absolute http(s) URL.
fn normalize_base_url(raw: &str) -> Option<String> {
    let url = raw.trim().trim_end_matches('/');
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))?;
    if rest.is_empty() {
        return None;
    }
    Some(url.to_string())
}
