//! Known SharePoint URL shapes and the ordered matching over path segments.

use crate::url_model::{percent_decode, ParsedUrl};

/// Managed path that prefixes a site collection (`/sites/<X>`, `/teams/<X>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedPath {
    Sites,
    Teams,
}

impl ManagedPath {
    fn from_segment(segment: &str) -> Option<Self> {
        if segment.eq_ignore_ascii_case("sites") {
            Some(Self::Sites)
        } else if segment.eq_ignore_ascii_case("teams") {
            Some(Self::Teams)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sites => "sites",
            Self::Teams => "teams",
        }
    }
}

/// Scope letter of a modern sharing link (`/:x:/s/...`, `/:x:/t/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingScope {
    Site,
    Team,
}

impl SharingScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Site => "s",
            Self::Team => "t",
        }
    }
}

/// Which known link pattern a path matched. Exactly one per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlShape {
    /// `/:<doctype>:/<s|t>/<site>/...`
    ModernSharingLink {
        doctype: String,
        scope: SharingScope,
        site_segment: String,
    },
    /// `/<sites|teams>/<site>/...`
    SiteCollectionPath {
        managed_path: ManagedPath,
        site_segment: String,
    },
    /// No recognizable site segment; the tenant root site owns the path.
    LibraryRootPath,
    /// Host is not a SharePoint-looking domain.
    Unclassified,
}

/// Matched shape plus the (still encoded) path it addresses. For `/:x:/r/`
/// links that path is the canonical remainder, not the full input path.
#[derive(Debug)]
pub(crate) struct ShapeMatch<'a> {
    pub shape: UrlShape,
    pub path: &'a str,
}

/// Ordered detection, first match wins. Sharing links go first because
/// `/:x:/s/<site>/...` would otherwise fall through to the root fallback.
pub(crate) fn detect<'a>(origin: &ParsedUrl, path: &'a str) -> ShapeMatch<'a> {
    if !origin.has_domain_host() {
        return ShapeMatch {
            shape: UrlShape::Unclassified,
            path,
        };
    }
    match_sharing_link(path).unwrap_or_else(|| match_site_or_root(path))
}

/// True if the first path segment is a sharing-link doctype marker like `:x:`.
pub(crate) fn starts_with_sharing_marker(path: &str) -> bool {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .and_then(doctype_marker)
        .is_some()
}

fn match_sharing_link(path: &str) -> Option<ShapeMatch<'_>> {
    let mut segments = path.strip_prefix('/')?.splitn(4, '/');
    let marker = segments.next()?;
    let doctype = doctype_marker(marker)?;
    let scope = segments.next()?;

    match scope.to_ascii_lowercase().as_str() {
        "r" => {
            // "/" + marker + "/" + "r"
            let offset = 1 + marker.len() + 1 + scope.len();
            let rest = path.get(offset..).filter(|r| !r.is_empty()).unwrap_or("/");
            Some(match_site_or_root(rest))
        }
        letter @ ("s" | "t") => {
            let site_segment = segments.next().filter(|s| !s.is_empty())?;
            let scope = if letter == "s" {
                SharingScope::Site
            } else {
                SharingScope::Team
            };
            Some(ShapeMatch {
                shape: UrlShape::ModernSharingLink {
                    doctype,
                    scope,
                    site_segment: site_segment.to_string(),
                },
                path,
            })
        }
        _ => None,
    }
}

fn match_site_or_root(path: &str) -> ShapeMatch<'_> {
    let mut segments = path.trim_start_matches('/').splitn(3, '/');
    if let (Some(first), Some(site)) = (segments.next(), segments.next()) {
        if let Some(managed_path) = ManagedPath::from_segment(first) {
            if !site.is_empty() {
                return ShapeMatch {
                    shape: UrlShape::SiteCollectionPath {
                        managed_path,
                        site_segment: site.to_string(),
                    },
                    path,
                };
            }
        }
    }
    ShapeMatch {
        shape: UrlShape::LibraryRootPath,
        path,
    }
}

/// `:x:` → `x`. Doctype codes are one or two ASCII letters.
fn doctype_marker(segment: &str) -> Option<String> {
    let decoded = percent_decode(segment);
    let inner = decoded.strip_prefix(':')?.strip_suffix(':')?;
    let valid = !inner.is_empty()
        && inner.len() <= 2
        && inner.bytes().all(|b| b.is_ascii_alphabetic());
    valid.then(|| inner.to_ascii_lowercase())
}
