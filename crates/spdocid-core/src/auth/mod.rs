//! Authentication collaborator.
//!
//! The pipeline only needs two things from here: the session that is already
//! established (if any) and a way to establish a new one for a given site.
//! Which sign-in mode to use is caller policy, passed straight through.

mod device_code;
mod error;
mod identity;
mod interactive;
mod session;
mod token;
mod web_login;

pub use error::AuthError;
pub use identity::{IdentityAuthenticator, ENV_ACCESS_TOKEN, ENV_SESSION_SITE};
pub use session::{AuthenticatedSession, Credential};
pub use token::{resource_scope, Authority, DEFAULT_AUTHORITY_URL};

use crate::classifier::SiteReference;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How to sign in when no usable session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// Browser authorization-code sign-in with a loopback redirect.
    #[default]
    Interactive,
    /// Code shown in the terminal, entered on another device.
    DeviceCode,
    /// Cookies copied from a signed-in browser session.
    WebLogin,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interactive => "interactive",
            Self::DeviceCode => "device-code",
            Self::WebLogin => "web-login",
        })
    }
}

/// Source of authenticated sessions.
pub trait SessionProvider {
    /// Session already established, if any.
    fn current_session(&self) -> Option<AuthenticatedSession>;

    /// Establishes a session bound to `site`.
    fn connect(
        &mut self,
        site: &SiteReference,
        mode: AuthMode,
        client_id: Option<&str>,
    ) -> Result<AuthenticatedSession, AuthError>;
}
