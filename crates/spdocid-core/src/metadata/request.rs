//! REST URL for the list item of a file.

use crate::classifier::SiteReference;
use crate::transport::TransportError;

/// `$select` projection: never the full item.
pub const SELECT_FIELDS: &str = "FileRef,_dlc_DocId,_dlc_DocIdUrl";

/// `{site}/_api/web/GetFileByServerRelativePath(decodedurl='<path>')/ListItemAllFields?$select=...`
///
/// Single quotes in the path are doubled (OData string literal) and literal
/// `%` is escaped so the server decodes back to the exact path.
pub fn list_item_url(
    site: &SiteReference,
    server_relative_path: &str,
) -> Result<url::Url, TransportError> {
    let mut url = url::Url::parse(&site.base_url).map_err(|e| TransportError::InvalidUrl {
        url: site.base_url.clone(),
        reason: e.to_string(),
    })?;
    let literal = server_relative_path.replace('%', "%25").replace('\'', "''");
    let site_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!(
        "{site_path}/_api/web/GetFileByServerRelativePath(decodedurl='{literal}')/ListItemAllFields"
    ));
    url.set_query(Some(&format!("$select={SELECT_FIELDS}")));
    url.set_fragment(None);
    Ok(url)
}
