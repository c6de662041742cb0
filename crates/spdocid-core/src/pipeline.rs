//! One invocation end to end: classify, get a session for the site, resolve.

use thiserror::Error;

use crate::auth::{AuthError, AuthMode, SessionProvider};
use crate::classifier::{classify_with_tenant, Classification, ClassificationError};
use crate::metadata::MetadataApi;
use crate::resolver::{DocumentResolver, PermanentUrl, ResolutionError};

/// Inputs for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub url: &'a str,
    /// Tenant base URL overriding the input URL's host.
    pub tenant: Option<&'a str>,
    pub auth_mode: AuthMode,
    pub client_id: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum DocIdError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error("sign-in failed")]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub classification: Classification,
    pub permanent_url: PermanentUrl,
}

/// Classifies `request.url`, reuses the current session when it is bound to
/// the classified site (connecting otherwise), and resolves the permanent URL.
/// Classification errors return before any session or network activity.
pub fn resolve_permanent_url(
    request: &ResolveRequest<'_>,
    auth: &mut dyn SessionProvider,
    api: &dyn MetadataApi,
) -> Result<Resolution, DocIdError> {
    let classification = classify_with_tenant(request.url, request.tenant)?;
    let site = &classification.site;

    let session = match auth.current_session() {
        Some(current) if current.is_bound_to(site) => {
            tracing::debug!(%site, "reusing current session");
            current
        }
        current => {
            if let Some(other) = current {
                tracing::info!(
                    bound = %other.site_url(),
                    %site,
                    "current session is for another site; reconnecting"
                );
            }
            auth.connect(site, request.auth_mode, request.client_id)?
        }
    };

    let permanent_url = DocumentResolver::new(api).resolve(&session, &classification)?;
    Ok(Resolution {
        classification,
        permanent_url,
    })
}
