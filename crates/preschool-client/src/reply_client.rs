//! Fetching bot replies from the server.

use std::future::Future;

use preschool_shared::constants::CHAT_PATH;
use preschool_shared::protocol::{ChatRequest, ChatResponse};
use tracing::debug;

use crate::error::ClientError;

/// Anything that can answer a user message with one reply.
pub trait ReplySource {
    fn fetch_reply(&self, message: &str)
        -> impl Future<Output = Result<String, ClientError>> + Send;
}

/// `POST /chat` over HTTP. No timeout and no retry: a failed round trip is
/// reported once to the caller.
#[derive(Debug, Clone)]
pub struct HttpReplyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpReplyClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), CHAT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReplySource for HttpReplyClient {
    async fn fetch_reply(&self, message: &str) -> Result<String, ClientError> {
        debug!(endpoint = %self.endpoint, "Requesting reply");

        let response: ChatResponse = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest::new(message))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.reply)
    }
}
