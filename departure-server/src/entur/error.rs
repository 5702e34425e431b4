//! Upstream error types.

/// How much of a failed response body is kept for the error message.
pub(crate) const EXCERPT_CHARS: usize = 160;

/// Errors from the Entur client.
///
/// None of these are retried by the client; the caller decides.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Request never completed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Entur HTTP {status}: {excerpt}")]
    Http { status: u16, excerpt: String },

    /// 2xx response carrying GraphQL errors
    #[error("Entur GraphQL error: {messages}")]
    Graph { messages: String },

    /// Body wasn't the JSON shape we asked for
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client name can't be sent as a header value
    #[error("invalid client name: {0:?}")]
    InvalidClientName(String),
}

/// First [`EXCERPT_CHARS`] characters of a response body.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}
