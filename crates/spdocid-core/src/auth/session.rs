//! Authenticated session handle bound to one site.

use crate::classifier::SiteReference;
use std::fmt;

/// Secret presented with each SharePoint request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// OAuth access token for the SharePoint resource.
    Bearer(String),
    /// Browser session cookies (`FedAuth`, `rtFa`).
    Cookie(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::Cookie(_) => f.write_str("Cookie(<redacted>)"),
        }
    }
}

/// A signed-in session. The resolver only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    site_url: String,
    credential: Credential,
}

impl AuthenticatedSession {
    pub fn new(site_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            credential,
        }
    }

    /// Site the session was established for.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn is_bound_to(&self, site: &SiteReference) -> bool {
        site.matches(&self.site_url)
    }

    /// Header carrying the credential, as `(name, value)`.
    pub fn auth_header(&self) -> (&'static str, String) {
        match &self.credential {
            Credential::Bearer(token) => ("Authorization", format!("Bearer {token}")),
            Credential::Cookie(cookie) => ("Cookie", cookie.clone()),
        }
    }
}
