//! Transport-level failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl failed (DNS, connect, TLS, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Server answered with a non-success status.
    #[error(
        "HTTP {status} from {url}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Http {
        status: u32,
        url: String,
        message: Option<String>,
    },

    /// Request URL could not be built.
    #[error("cannot build request URL from '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Success status but the body was not what we expected.
    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}

impl TransportError {
    pub fn status(&self) -> Option<u32> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
