//! The conversation held by one chat session.
//!
//! A [`ChatSession`] is created when the chat opens and dropped (or ended
//! with [`ChatSession::end`]) when it closes. Its message list only grows:
//! insertion order is display order is chronological order.

use chrono::Utc;
use preschool_shared::constants::CONNECT_ERROR_TEXT;
use preschool_shared::types::{Message, MessageId, Sender};
use tracing::{debug, info, warn};

use crate::reply_client::ReplySource;

/// Hands out millisecond-timestamp ids that never repeat within a session,
/// even when the clock has not moved between two calls.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last: Option<i64>,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_at(&mut self, now_millis: i64) -> MessageId {
        let id = match self.last {
            Some(last) if now_millis <= last => last + 1,
            _ => now_millis,
        };
        self.last = Some(id);
        MessageId(id)
    }
}

pub struct ChatSession<R> {
    replies: R,
    messages: Vec<Message>,
    ids: MessageIdGenerator,
}

impl<R: ReplySource> ChatSession<R> {
    pub fn new(replies: R) -> Self {
        info!("Chat session started");
        Self {
            replies,
            messages: Vec::new(),
            ids: MessageIdGenerator::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent bot message, if any.
    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == Sender::Bot)
    }

    /// Send `input` and append the outcome.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the user's text
    /// is appended verbatim, then either the server's reply or the fixed
    /// connection error message; the appended bot message is returned.
    pub async fn send(&mut self, input: &str) -> Option<&Message> {
        if input.trim().is_empty() {
            return None;
        }

        self.push(input.to_string(), Sender::User);

        let text = match self.replies.fetch_reply(input).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Reply request failed");
                CONNECT_ERROR_TEXT.to_string()
            }
        };

        Some(self.push(text, Sender::Bot))
    }

    /// Close the session, returning the transcript.
    pub fn end(self) -> Vec<Message> {
        info!(messages = self.messages.len(), "Chat session ended");
        self.messages
    }

    fn push(&mut self, text: String, sender: Sender) -> &Message {
        let sent_at = Utc::now();
        let id = self.ids.next_at(sent_at.timestamp_millis());
        debug!(id = %id, sender = %sender, "Appending message");

        self.messages.push(Message {
            id,
            text,
            sender,
            sent_at,
        });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ClientError;
    use crate::reply_client::HttpReplyClient;

    struct Canned(&'static str);

    impl ReplySource for Canned {
        async fn fetch_reply(&self, _message: &str) -> Result<String, ClientError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl ReplySource for Counting {
        async fn fetch_reply(&self, message: &str) -> Result<String, ClientError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("got {message}"))
        }
    }

    #[test]
    fn test_ids_distinct_on_frozen_clock() {
        let mut ids = MessageIdGenerator::new();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(999);
        let d = ids.next_at(5_000);
        assert_eq!(a, MessageId(1_000));
        assert_eq!(b, MessageId(1_001));
        assert_eq!(c, MessageId(1_002));
        assert_eq!(d, MessageId(5_000));
    }

    #[tokio::test]
    async fn test_send_appends_user_then_bot() {
        let mut session = ChatSession::new(Canned("Hello! How can I help you today?"));
        let reply = session.send("  hello  ").await.unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.text, "Hello! How can I help you today?");

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "  hello  ");
        assert!(messages[0].id < messages[1].id);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut session = ChatSession::new(Counting::default());
        assert!(session.send("").await.is_none());
        assert!(session.send(" \n\t").await.is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.replies.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_appends_error_message() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut session = ChatSession::new(HttpReplyClient::new(&format!("http://{addr}")));
        let reply = session.send("pdf please").await.unwrap();
        assert_eq!(reply.text, CONNECT_ERROR_TEXT);
        assert_eq!(reply.sender, Sender::Bot);

        // the session keeps working afterwards
        session.send("again").await.unwrap();
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_rapid_messages_keep_order_and_unique_ids() {
        let mut session = ChatSession::new(Counting::default());
        for i in 0..20 {
            session.send(&format!("msg {i}")).await;
        }
        let transcript = session.end();
        assert_eq!(transcript.len(), 40);

        let ids: HashSet<_> = transcript.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 40);
        assert!(transcript.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(transcript[38].text, "msg 19");
        assert_eq!(transcript[39].text, "got msg 19");
    }

    #[tokio::test]
    async fn test_last_bot_message() {
        let mut session = ChatSession::new(Canned("Goodbye! Have a nice day!"));
        assert!(session.last_bot_message().is_none());
        session.send("bye").await;
        assert_eq!(
            session.last_bot_message().map(|m| m.text.as_str()),
            Some("Goodbye! Have a nice day!")
        );
    }
}
