use thiserror::Error;

/// Fallback message when the controller reports a failure without one.
pub const GENERIC_FAILURE: &str = "controller reported failure";

/// Longest slice of a raw response body carried in an error message.
const MAX_BODY_IN_MESSAGE: usize = 200;

/// Top-level error type for the `sdnboard-api` crate.
///
/// Two classes: network errors (transport, HTTP status, malformed JSON,
/// client setup) and domain errors (the controller answered 2xx but the
/// payload says the operation failed). `sdnboard-core` turns both into
/// a single human-readable message.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Domain ──────────────────────────────────────────────────────
    /// Transport succeeded but the payload's `status` is not `"success"`.
    #[error("{message}")]
    Rejected { message: String },
}

impl Error {
    /// Build an [`Error::Http`] from a non-2xx status and its raw body.
    ///
    /// The controller answers bad requests with `{status, message}`; that
    /// message is preferred over the raw body when it parses.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct Body {
            message: Option<String>,
        }

        let message = serde_json::from_str::<Body>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| truncate(body));

        Self::Http { status, message }
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".into();
    }
    match trimmed.char_indices().nth(MAX_BODY_IN_MESSAGE) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_owned(),
    }
}
