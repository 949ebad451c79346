/// Error type returned by this crate.
///
/// Rate limiting (HTTP 429) never surfaces on its own: it is retried until the
/// attempt budget runs out and then reported as [`FetchError::RetriesExhausted`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network, timeout or body-read error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status other than 429.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    /// No attempt produced a success response.
    #[error("max retries exceeded after {attempts} attempt(s)")]
    RetriesExhausted { attempts: usize },
    /// Response body could not be decoded as text or JSON.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request body could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
