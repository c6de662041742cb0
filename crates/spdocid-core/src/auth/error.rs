//! Sign-in failures.

use super::AuthMode;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{mode} sign-in needs an application (client) id; pass --client-id or set client_id in config")]
    MissingClientId { mode: AuthMode },

    #[error("sign-in was declined{}", .description.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Declined { description: Option<String> },

    #[error("sign-in code expired before it was used; run again")]
    Expired,

    #[error("sign-in redirect carried an unexpected state value")]
    StateMismatch,

    #[error("identity provider returned '{error}'{}", .description.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Provider {
        error: String,
        description: Option<String>,
    },

    #[error("no cookie was entered")]
    EmptyCredential,

    #[error("local I/O during sign-in failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
