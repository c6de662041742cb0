//! CLI for resolving SharePoint Document ID permanent URLs.

mod commands;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use spdocid_core::auth::AuthMode;
use spdocid_core::config::{self, DocIdConfig};

use commands::{run_dry_run, run_resolve};

/// Top-level CLI: one document URL in, its permanent Document ID URL out.
#[derive(Debug, Parser)]
#[command(name = "spdocid")]
#[command(about = "Resolve a SharePoint document URL to its permanent Document ID URL", long_about = None)]
pub struct Cli {
    /// SharePoint document URL (direct link, sharing link, or browser address bar).
    pub url: String,

    /// Tenant base URL to use instead of the URL's own host (e.g. https://contoso.sharepoint.com).
    #[arg(long, value_name = "BASE_URL")]
    pub tenant: Option<String>,

    /// How to sign in when no session for the site exists. Defaults to the config value.
    #[arg(long, value_enum)]
    pub auth_mode: Option<AuthModeArg>,

    /// Entra ID application (client) id for interactive and device-code sign-in.
    #[arg(long, value_name = "ID")]
    pub client_id: Option<String>,

    /// Print the classification (site, path, reliability) and stop before signing in.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthModeArg {
    Interactive,
    DeviceCode,
    WebLogin,
}

impl From<AuthModeArg> for AuthMode {
    fn from(arg: AuthModeArg) -> Self {
        match arg {
            AuthModeArg::Interactive => AuthMode::Interactive,
            AuthModeArg::DeviceCode => AuthMode::DeviceCode,
            AuthModeArg::WebLogin => AuthMode::WebLogin,
        }
    }
}

/// Settings after applying CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Effective {
    pub tenant: Option<String>,
    pub auth_mode: AuthMode,
    pub client_id: Option<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.run(&cfg)
    }

    fn run(&self, cfg: &DocIdConfig) -> Result<()> {
        let effective = self.effective(cfg);
        if self.dry_run {
            run_dry_run(&self.url, effective.tenant.as_deref())
        } else {
            run_resolve(&self.url, &effective, cfg)
        }
    }

    pub(crate) fn effective(&self, cfg: &DocIdConfig) -> Effective {
        Effective {
            tenant: self.tenant.clone().or_else(|| cfg.tenant_url.clone()),
            auth_mode: self.auth_mode.map(AuthMode::from).unwrap_or(cfg.auth_mode),
            client_id: self.client_id.clone().or_else(|| cfg.client_id.clone()),
        }
    }
}
