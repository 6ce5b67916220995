//! Client-side logic of PreSchool Chat.
//!
//! Everything a front-end needs besides drawing pixels: the conversation
//! session, the reply client, link detection and dispatch inside message
//! text, the video route handed to the player, and the home screen's
//! carousel and drawer state.

pub mod config;
pub mod error;
pub mod home;
pub mod links;
pub mod render;
pub mod reply_client;
pub mod session;
pub mod video;

pub use config::{ClientConfig, Platform};
pub use error::ClientError;
pub use session::ChatSession;
