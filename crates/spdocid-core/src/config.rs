use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::{AuthMode, Authority, DEFAULT_AUTHORITY_URL};
use crate::transport::TransportSettings;

/// Transport timeouts (optional `[transport]` section). 0 = no timeout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/spdocid/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocIdConfig {
    /// Sign-in mode when no usable session exists.
    #[serde(default)]
    pub auth_mode: AuthMode,
    /// Entra ID application (client) id for interactive / device-code sign-in.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Identity platform host.
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    /// Directory to sign in to: tenant id, domain, or "organizations".
    #[serde(default = "default_authority_tenant")]
    pub authority_tenant: String,
    /// Default tenant base URL override (same as `--tenant`).
    #[serde(default)]
    pub tenant_url: Option<String>,
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_authority_url() -> String {
    DEFAULT_AUTHORITY_URL.to_string()
}

fn default_authority_tenant() -> String {
    "organizations".to_string()
}

impl Default for DocIdConfig {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::default(),
            client_id: None,
            authority_url: default_authority_url(),
            authority_tenant: default_authority_tenant(),
            tenant_url: None,
            transport: TransportConfig::default(),
        }
    }
}

impl DocIdConfig {
    pub fn authority(&self) -> Authority {
        Authority::new(self.authority_url.as_str(), self.authority_tenant.as_str())
    }

    pub fn transport_settings(&self) -> TransportSettings {
        let secs = |s: u64| (s > 0).then(|| Duration::from_secs(s));
        TransportSettings {
            connect_timeout: secs(self.transport.connect_timeout_secs),
            timeout: secs(self.transport.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("spdocid")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DocIdConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<DocIdConfig> {
    if !path.exists() {
        let default_cfg = DocIdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DocIdConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
