use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote base URL is not configured")]
    NotConfigured,

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RemoteError>;
