use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Carousel needs at least one slide")]
    EmptyCarousel,

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Failed to open link {url}: {reason}")]
    OpenLink { url: String, reason: String },
}
