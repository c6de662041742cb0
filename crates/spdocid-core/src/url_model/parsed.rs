//! Absolute http(s) URL split into the parts the classifier looks at.

use crate::classifier::ClassificationError;

/// A parsed input link. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// Lowercased host name (no port).
    pub host: String,
    /// Explicit non-default port, if any.
    pub port: Option<u16>,
    /// Percent-encoded path, always starting with `/`.
    pub path: String,
    pub query: Option<String>,
}

impl ParsedUrl {
    /// Parses `raw` as an absolute `http`/`https` URL.
    pub fn parse(raw: &str) -> Result<Self, ClassificationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ClassificationError::malformed(raw, "empty input"));
        }
        let parsed =
            url::Url::parse(raw).map_err(|e| ClassificationError::malformed(raw, e.to_string()))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ClassificationError::malformed(
                raw,
                format!("unsupported scheme '{scheme}' (expected http or https)"),
            ));
        }
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ClassificationError::malformed(raw, "missing host"))?;

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_ascii_lowercase(),
            port: parsed.port(),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
        })
    }

    /// `scheme://host[:port]` with no trailing slash.
    pub fn tenant_root(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// True if the host is a dot-separated domain (or dotted IPv4 address).
    pub fn has_domain_host(&self) -> bool {
        let host = self.host.as_str();
        host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
    }
}
