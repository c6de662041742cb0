//! Document metadata lookup through the SharePoint REST API.
//!
//! One request per resolution: the list item behind a server-relative file
//! path, projected down to `FileRef`, `_dlc_DocId` and `_dlc_DocIdUrl`.

mod parse;
mod request;

pub use request::{list_item_url, SELECT_FIELDS};

use crate::auth::AuthenticatedSession;
use crate::classifier::SiteReference;
use crate::transport::{self, HttpRequest, TransportError, TransportSettings};

/// Projection of the list item fields we ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub file_ref: String,
    /// `_dlc_DocId`; absent when the Document ID feature is off.
    pub document_id: Option<String>,
    /// `_dlc_DocIdUrl` as `"<redirect url>, <doc id>"`.
    pub document_id_url_field: Option<String>,
}

/// Fetches the list item fields of one file.
pub trait MetadataApi {
    fn fetch_list_item(
        &self,
        session: &AuthenticatedSession,
        site: &SiteReference,
        server_relative_path: &str,
    ) -> Result<DocumentMetadata, TransportError>;
}

/// `MetadataApi` over the blocking curl transport.
#[derive(Debug, Clone, Default)]
pub struct SharePointRestApi {
    settings: TransportSettings,
}

impl SharePointRestApi {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }
}

impl MetadataApi for SharePointRestApi {
    fn fetch_list_item(
        &self,
        session: &AuthenticatedSession,
        site: &SiteReference,
        server_relative_path: &str,
    ) -> Result<DocumentMetadata, TransportError> {
        let url = list_item_url(site, server_relative_path)?;
        let (header, value) = session.auth_header();
        let request = HttpRequest::get(url.as_str())
            .header("Accept", "application/json;odata=nometadata")
            .header(header, value);
        tracing::debug!(%url, "fetching list item fields");

        let response = transport::send(&request, &self.settings)?;
        if response.is_success() {
            return parse::parse_list_item(&response.body, server_relative_path).map_err(|reason| {
                TransportError::InvalidResponse {
                    url: url.to_string(),
                    reason,
                }
            });
        }

        let message = parse::error_message(&response.body);
        // Selecting a column the site does not have is a 400, which is how a
        // site without the Document ID feature answers.
        if response.status == 400
            && message
                .as_deref()
                .is_some_and(parse::is_missing_document_id_field)
        {
            tracing::debug!("site has no Document ID columns");
            return Ok(DocumentMetadata {
                file_ref: server_relative_path.to_string(),
                ..DocumentMetadata::default()
            });
        }
        Err(TransportError::Http {
            status: response.status,
            url: url.to_string(),
            message,
        })
    }
}
