//! Classification failures.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// Not an absolute http(s) URL.
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Parses as a URL but the host is not a dot-separated domain.
    #[error("'{url}' does not look like a SharePoint URL (host '{host}' is not a domain)")]
    NotASharePointUrl { url: String, host: String },
}

impl ClassificationError {
    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
