//! `spdocid <URL>`: sign in if needed and print the permanent URL.

use anyhow::Result;
use spdocid_core::auth::IdentityAuthenticator;
use spdocid_core::config::DocIdConfig;
use spdocid_core::metadata::SharePointRestApi;
use spdocid_core::{resolve_permanent_url, ResolveRequest};

use crate::cli::Effective;

pub fn run_resolve(url: &str, effective: &Effective, cfg: &DocIdConfig) -> Result<()> {
    let settings = cfg.transport_settings();
    let mut auth = IdentityAuthenticator::from_env(cfg.authority(), settings);
    let api = SharePointRestApi::new(settings);

    let request = ResolveRequest {
        url,
        tenant: effective.tenant.as_deref(),
        auth_mode: effective.auth_mode,
        client_id: effective.client_id.as_deref(),
    };
    let resolution = resolve_permanent_url(&request, &mut auth, &api)?;
    tracing::info!(
        site = %resolution.classification.site,
        url = %resolution.permanent_url,
        "resolved permanent url"
    );
    println!("{}", resolution.permanent_url);
    Ok(())
}
