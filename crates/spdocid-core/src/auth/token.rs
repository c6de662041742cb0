//! Microsoft identity platform endpoints and token responses.

use serde::Deserialize;

use super::AuthError;
use crate::classifier::SiteReference;
use crate::transport::{self, HttpRequest, TransportError, TransportSettings};

pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// Where to sign in: authority host plus directory (tenant id, domain, or
/// `organizations`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    pub base_url: String,
    pub tenant: String,
}

impl Authority {
    pub fn new(base_url: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tenant: tenant.into(),
        }
    }

    /// `{base}/{tenant}/oauth2/v2.0/{name}`
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/oauth2/v2.0/{}", self.base_url, self.tenant, name)
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY_URL, "organizations")
    }
}

/// `.default` scope of the SharePoint host that owns `site`.
pub fn resource_scope(site: &SiteReference) -> String {
    let origin = url::Url::parse(&site.base_url)
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|_| site.base_url.clone());
    format!("{origin}/.default")
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// OAuth 2.0 error body (`error`, `error_description`).
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl OAuthErrorBody {
    pub fn into_auth_error(self) -> AuthError {
        match self.error.as_str() {
            "access_denied" | "authorization_declined" => AuthError::Declined {
                description: self.error_description,
            },
            "expired_token" | "code_expired" => AuthError::Expired,
            _ => AuthError::Provider {
                error: self.error,
                description: self.error_description,
            },
        }
    }
}

/// POSTs a grant to the token endpoint. `Ok(Err(body))` is an OAuth error the
/// caller may want to inspect (e.g. `authorization_pending`).
pub(crate) fn post_token(
    authority: &Authority,
    fields: &[(&str, &str)],
    settings: &TransportSettings,
) -> Result<Result<TokenResponse, OAuthErrorBody>, AuthError> {
    let url = authority.endpoint("token");
    let request = HttpRequest::post_form(url.as_str(), fields.iter().copied())
        .header("Accept", "application/json");
    let response = transport::send(&request, settings)?;

    if response.is_success() {
        let token: TokenResponse =
            serde_json::from_slice(&response.body).map_err(|e| TransportError::InvalidResponse {
                url: url.clone(),
                reason: format!("token response: {e}"),
            })?;
        return Ok(Ok(token));
    }
    match serde_json::from_slice::<OAuthErrorBody>(&response.body) {
        Ok(body) => Ok(Err(body)),
        Err(_) => Err(TransportError::Http {
            status: response.status,
            url,
            message: None,
        }
        .into()),
    }
}
