//! Terminal front-end for PreSchool Chat.
//!
//! Type a message and press enter to chat. `/open <n>` activates the n-th
//! link of the latest bot reply, `/quit` ends the session.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use preschool_client::links::{self, LinkHandler};
use preschool_client::render::{RenderedMessage, Segment};
use preschool_client::reply_client::HttpReplyClient;
use preschool_client::video::VideoRoute;
use preschool_client::{ChatSession, ClientConfig, ClientError, Platform};
use preschool_shared::constants::APP_NAME;
use preschool_shared::types::Message;

/// Used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "preschool_client=debug,warn";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Say(&'a str),
    Open(usize),
    Quit,
    Invalid(&'static str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed == "/quit" {
            return Self::Quit;
        }
        if let Some(arg) = trimmed.strip_prefix("/open") {
            return match arg.trim().parse::<usize>() {
                Ok(n) if n > 0 => Self::Open(n),
                _ => Self::Invalid("usage: /open <link number>"),
            };
        }
        Self::Say(line)
    }
}

struct TerminalLinkHandler {
    platform: Platform,
}

impl LinkHandler for TerminalLinkHandler {
    fn open_video(&mut self, url: &str) {
        let route = VideoRoute::new(url, self.platform);
        println!("▶ {} ({})", route.file_name(), route.playback_url());
    }

    fn open_external(&mut self, url: &str) -> Result<(), ClientError> {
        println!("↗ open in browser: {url}");
        Ok(())
    }
}

fn print_message(message: &Message) {
    let rendered = RenderedMessage::new(message);
    let mut line = String::new();
    let mut n = 0;
    for segment in &rendered.segments {
        match segment {
            Segment::Text(text) => line.push_str(text),
            Segment::Link(token) => {
                n += 1;
                line.push_str(&format!("[{n}]{}", token.as_str()));
            }
        }
    }
    println!("{} {}: {line}", message.display_time(), message.sender);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let mut session = ChatSession::new(HttpReplyClient::new(&config.server_url));
    let mut handler = TerminalLinkHandler {
        platform: config.platform,
    };

    println!("{APP_NAME} • {}", config.server_url);
    println!("Ask about math, videos, PDFs or Word files. /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Invalid(usage) => println!("{usage}"),
            Command::Open(n) => {
                let Some(message) = session.last_bot_message() else {
                    println!("no reply yet");
                    continue;
                };
                let rendered = RenderedMessage::new(message);
                let link = rendered.links().nth(n - 1);
                match link {
                    Some(token) => {
                        if let Err(e) = links::activate(token, &mut handler) {
                            println!("{e}");
                        }
                    }
                    None => println!("no link [{n}] in the last reply"),
                }
            }
            Command::Say(text) => {
                if let Some(reply) = session.send(text).await {
                    print_message(reply);
                }
            }
        }
    }

    session.end();
    Ok(())
}
