use thiserror::Error;

/// Everything that can go wrong between a view and the server. None of
/// these are fatal; callers decide what surfaces to the user.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Login or registration returned no usable token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Any non-200 response on an authorized request. The drained body
    /// is kept for caller inspection.
    #[error("request failed: {status} {status_text}")]
    Request {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Network-level failure, propagated unchanged. Never retried here.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Token present but undecodable. Gating treats this as "not
    /// authenticated"; it only surfaces when claims are inspected.
    #[error("malformed token: {0}")]
    MalformedToken(#[source] jsonwebtoken::errors::Error),

    #[error("no active session")]
    NoSession,

    /// The push channel is gone. Terminal; there is no auto-reconnect.
    #[error("portfolio channel closed")]
    ChannelClosed,

    /// A channel message failed to encode or decode.
    #[error("malformed channel message: {0}")]
    MalformedMessage(#[source] serde_json::Error),

    #[error("session storage failure: {0}")]
    Storage(#[from] sled::Error),
}
