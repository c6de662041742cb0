//! Session provider backed by the Microsoft identity platform (and browser
//! cookies for web login).

use std::io;

use super::session::{AuthenticatedSession, Credential};
use super::token::{resource_scope, Authority};
use super::{device_code, interactive, web_login, AuthError, AuthMode, SessionProvider};
use crate::classifier::SiteReference;
use crate::transport::TransportSettings;

/// Pre-issued bearer token for the SharePoint host.
pub const ENV_ACCESS_TOKEN: &str = "SPDOCID_ACCESS_TOKEN";
/// Site the pre-issued token session is bound to.
pub const ENV_SESSION_SITE: &str = "SPDOCID_SESSION_SITE";

#[derive(Debug, Clone)]
pub struct IdentityAuthenticator {
    authority: Authority,
    settings: TransportSettings,
    current: Option<AuthenticatedSession>,
}

impl IdentityAuthenticator {
    pub fn new(authority: Authority, settings: TransportSettings) -> Self {
        Self {
            authority,
            settings,
            current: None,
        }
    }

    /// Like `new`, seeding the current session from `SPDOCID_ACCESS_TOKEN`
    /// and `SPDOCID_SESSION_SITE` when both are set.
    pub fn from_env(authority: Authority, settings: TransportSettings) -> Self {
        let token = std::env::var(ENV_ACCESS_TOKEN).ok().filter(|t| !t.trim().is_empty());
        let site = std::env::var(ENV_SESSION_SITE).ok().filter(|s| !s.trim().is_empty());
        let current = match (token, site) {
            (Some(token), Some(site)) => {
                tracing::debug!(%site, "using pre-issued token session from environment");
                Some(AuthenticatedSession::new(
                    site.trim(),
                    Credential::Bearer(token.trim().to_string()),
                ))
            }
            (Some(_), None) => {
                tracing::warn!("{ENV_ACCESS_TOKEN} is set but {ENV_SESSION_SITE} is not; ignoring it");
                None
            }
            _ => None,
        };
        Self {
            authority,
            settings,
            current,
        }
    }

    pub fn with_session(mut self, session: AuthenticatedSession) -> Self {
        self.current = Some(session);
        self
    }
}

impl SessionProvider for IdentityAuthenticator {
    fn current_session(&self) -> Option<AuthenticatedSession> {
        self.current.clone()
    }

    fn connect(
        &mut self,
        site: &SiteReference,
        mode: AuthMode,
        client_id: Option<&str>,
    ) -> Result<AuthenticatedSession, AuthError> {
        tracing::info!(%site, %mode, "connecting");
        let require_client = || {
            client_id
                .filter(|c| !c.trim().is_empty())
                .ok_or(AuthError::MissingClientId { mode })
        };
        let scope = resource_scope(site);

        let credential = match mode {
            AuthMode::DeviceCode => Credential::Bearer(device_code::sign_in(
                &self.authority,
                require_client()?,
                &scope,
                &self.settings,
                &mut io::stderr(),
            )?),
            AuthMode::Interactive => Credential::Bearer(interactive::sign_in(
                &self.authority,
                require_client()?,
                &scope,
                &self.settings,
                &mut io::stderr(),
            )?),
            AuthMode::WebLogin => Credential::Cookie(web_login::sign_in(
                site,
                &mut io::stdin().lock(),
                &mut io::stderr(),
            )?),
        };

        let session = AuthenticatedSession::new(site.base_url.clone(), credential);
        tracing::info!(site = %session.site_url(), "session established");
        self.current = Some(session.clone());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_modes_need_client_id() {
        let mut auth = IdentityAuthenticator::new(Authority::default(), TransportSettings::default());
        let site = SiteReference {
            base_url: "https://contoso.sharepoint.com/sites/Finance".to_string(),
        };
        for mode in [AuthMode::DeviceCode, AuthMode::Interactive] {
            assert!(matches!(
                auth.connect(&site, mode, None),
                Err(AuthError::MissingClientId { .. })
            ));
            assert!(matches!(
                auth.connect(&site, mode, Some("  ")),
                Err(AuthError::MissingClientId { .. })
            ));
        }
        assert!(auth.current_session().is_none());
    }

    #[test]
    fn with_session_becomes_current() {
        let s = AuthenticatedSession::new("https://t.example.com", Credential::Bearer("x".into()));
        let auth = IdentityAuthenticator::new(Authority::default(), TransportSettings::default())
            .with_session(s.clone());
        assert_eq!(auth.current_session(), Some(s));
    }
}
