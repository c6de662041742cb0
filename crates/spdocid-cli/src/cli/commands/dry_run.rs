//! `spdocid --dry-run <URL>`: show what would be asked, touch nothing.

use anyhow::Result;
use spdocid_core::classifier::UrlShape;
use spdocid_core::{classify_with_tenant, Classification};

pub fn run_dry_run(url: &str, tenant: Option<&str>) -> Result<()> {
    let c = classify_with_tenant(url, tenant)?;
    print!("{}", render(&c));
    Ok(())
}

pub(crate) fn render(c: &Classification) -> String {
    let reliability = if c.candidate.reliable {
        "reliable"
    } else {
        "best effort (sharing link)"
    };
    format!(
        "{:<8} {}\n{:<8} {}\n{:<8} {}\n{:<8} {}\n",
        "SHAPE",
        describe(&c.shape),
        "SITE",
        c.site,
        "PATH",
        c.candidate.path,
        "PATH IS",
        reliability
    )
}

fn describe(shape: &UrlShape) -> String {
    match shape {
        UrlShape::ModernSharingLink { doctype, scope, .. } => {
            format!("sharing link (:{}:/{})", doctype, scope.as_str())
        }
        UrlShape::SiteCollectionPath { managed_path, .. } => {
            format!("site collection (/{})", managed_path.as_str())
        }
        UrlShape::LibraryRootPath => "tenant root library".to_string(),
        UrlShape::Unclassified => "unclassified".to_string(),
    }
}
