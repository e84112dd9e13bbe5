use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplyError {
    /// Transport or body-decode failure from the HTTP layer.
    #[error("reply request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("reply service returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The body decoded but carries no usable `reply` field.
    #[error("reply response has no usable reply field")]
    MissingReply,
}

pub type Result<T> = std::result::Result<T, ReplyError>;
