use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Body of `POST /chat`.
///
/// `message` is optional on the wire: a request without it is still
/// answered, with the fallback reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body returned by `POST /chat`. Always carries exactly one reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Parse a raw request body.
    pub fn from_json(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The message text, empty when absent.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl ChatResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}
