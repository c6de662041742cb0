//! Document resolver: one metadata fetch, then normalize the permanent URL.
//!
//! The resolver only depends on the [`MetadataApi`] trait; it never talks to
//! the network itself and never retries.

mod error;

pub use error::ResolutionError;

use crate::auth::AuthenticatedSession;
use crate::classifier::Classification;
use crate::metadata::MetadataApi;
use std::fmt;

/// The Document ID redirect URL. Never contains a comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermanentUrl(String);

impl PermanentUrl {
    /// Takes the first comma-separated element of a `_dlc_DocIdUrl` value,
    /// trimmed. `None` if that element is empty.
    pub fn from_field(field: &str) -> Option<Self> {
        let first = field.split(',').next()?.trim();
        (!first.is_empty()).then(|| Self(first.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PermanentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct DocumentResolver<'a> {
    api: &'a dyn MetadataApi,
}

impl<'a> DocumentResolver<'a> {
    pub fn new(api: &'a dyn MetadataApi) -> Self {
        Self { api }
    }

    /// Resolves the permanent URL of the classified document using `session`,
    /// which must be bound to the classified site.
    pub fn resolve(
        &self,
        session: &AuthenticatedSession,
        classification: &Classification,
    ) -> Result<PermanentUrl, ResolutionError> {
        let site = &classification.site;
        let candidate = &classification.candidate;

        if !session.is_bound_to(site) {
            return Err(ResolutionError::SessionSiteMismatch {
                expected: site.base_url.clone(),
                actual: session.site_url().to_string(),
            });
        }

        let metadata = self
            .api
            .fetch_list_item(session, site, &candidate.path)
            .map_err(|cause| ResolutionError::TransportFailure {
                site: site.base_url.clone(),
                path: candidate.path.clone(),
                reliable: candidate.reliable,
                cause,
            })?;
        tracing::debug!(
            file_ref = %metadata.file_ref,
            document_id = ?metadata.document_id,
            "list item fields received"
        );

        let document_id = metadata
            .document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ResolutionError::DocumentIdNotConfigured {
                site: site.base_url.clone(),
                path: candidate.path.clone(),
                reliable: candidate.reliable,
            })?;

        let permanent = metadata
            .document_id_url_field
            .as_deref()
            .and_then(PermanentUrl::from_field)
            .ok_or_else(|| ResolutionError::PermanentUrlMissing {
                site: site.base_url.clone(),
                path: candidate.path.clone(),
                document_id: document_id.to_string(),
                reliable: candidate.reliable,
            })?;

        tracing::info!(document_id, permanent_url = %permanent, "resolved permanent URL");
        Ok(permanent)
    }
}
