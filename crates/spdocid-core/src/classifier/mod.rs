//! URL classification: which site to sign in to, and which path to ask about.
//!
//! Every syntactically valid SharePoint URL yields exactly one site, even when
//! the extracted path is only a guess. The guess is tagged as unreliable so
//! the failure message can say so if the metadata call later comes back empty.

mod error;
mod shape;

pub use error::ClassificationError;
pub use shape::{ManagedPath, SharingScope, UrlShape};

use crate::url_model::{decode_server_relative_path, ParsedUrl};
use std::fmt;

/// The site collection to authenticate against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReference {
    /// Absolute URL without trailing slash.
    pub base_url: String,
}

impl SiteReference {
    /// Case-insensitive comparison ignoring a trailing `/`.
    pub fn matches(&self, other: &str) -> bool {
        normalize_site(&self.base_url).eq_ignore_ascii_case(normalize_site(other))
    }
}

impl fmt::Display for SiteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

fn normalize_site(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Best-effort server-relative path for the metadata call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateServerRelativePath {
    /// Decoded path, e.g. `/sites/Finance/Shared Documents/Budget.xlsx`.
    pub path: String,
    /// False when the path came from a sharing link and may not address the file.
    pub reliable: bool,
}

/// Output of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub shape: UrlShape,
    /// `scheme://host[:port]` of the tenant.
    pub tenant_root: String,
    pub site: SiteReference,
    pub candidate: CandidateServerRelativePath,
    /// Still-encoded path the candidate was decoded from.
    encoded_path: String,
}

impl Classification {
    /// Tenant root joined with the encoded candidate path. Classifying this
    /// again yields the same site and candidate.
    pub fn canonical_url(&self) -> String {
        format!("{}{}", self.tenant_root, self.encoded_path)
    }
}

/// Encoded path up to an escaped `?` (`%3F`), where the decoded candidate ends.
fn encoded_path_before_query(path: &str) -> &str {
    match path.to_ascii_lowercase().find("%3f") {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Classifies `raw` using its own host as the tenant.
pub fn classify(raw: &str) -> Result<Classification, ClassificationError> {
    classify_with_tenant(raw, None)
}

/// Classifies `raw`; when `tenant` is given, its scheme/host/port build the
/// tenant root instead of the input URL's.
pub fn classify_with_tenant(
    raw: &str,
    tenant: Option<&str>,
) -> Result<Classification, ClassificationError> {
    let parsed = ParsedUrl::parse(raw)?;
    let origin = match tenant {
        Some(t) => ParsedUrl::parse(t)?,
        None => parsed.clone(),
    };
    let tenant_root = origin.tenant_root();

    let matched = shape::detect(&origin, &parsed.path);
    let (base_url, reliable) = match &matched.shape {
        UrlShape::ModernSharingLink {
            scope,
            site_segment,
            ..
        } => (
            format!("{tenant_root}/{}/{site_segment}", scope.as_str()),
            false,
        ),
        UrlShape::SiteCollectionPath {
            managed_path,
            site_segment,
        } => (
            format!("{tenant_root}/{}/{site_segment}", managed_path.as_str()),
            true,
        ),
        UrlShape::LibraryRootPath => (
            tenant_root.clone(),
            !shape::starts_with_sharing_marker(matched.path),
        ),
        UrlShape::Unclassified => {
            return Err(ClassificationError::NotASharePointUrl {
                url: raw.trim().to_string(),
                host: origin.host,
            });
        }
    };

    let candidate = CandidateServerRelativePath {
        path: decode_server_relative_path(matched.path),
        reliable,
    };
    tracing::debug!(
        shape = ?matched.shape,
        site = %base_url,
        path = %candidate.path,
        reliable,
        "classified input URL"
    );
    if !reliable {
        tracing::warn!(
            path = %candidate.path,
            "input looks like a sharing link; the extracted path may not address the file"
        );
    }

    Ok(Classification {
        shape: matched.shape,
        tenant_root,
        site: SiteReference { base_url },
        candidate,
        encoded_path: encoded_path_before_query(matched.path).to_string(),
    })
}

#[cfg(test)]
mod tests;
