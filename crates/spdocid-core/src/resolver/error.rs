//! Resolution failures. Each carries the site, path, and reliability of the
//! input so the caller can pick the next manual step.

use crate::transport::TransportError;
use std::fmt;

const SHARING_LINK_HINT: &str = "the input looks like a sharing link, whose path does not \
     reliably address the file; open it in a browser and supply the canonical library URL \
     (https://<tenant>/sites/<site>/<library>/<file>) instead";

#[derive(Debug)]
pub enum ResolutionError {
    /// The session belongs to a different site than the classified one.
    SessionSiteMismatch { expected: String, actual: String },
    /// The metadata request failed (network, 403, 404, ...).
    TransportFailure {
        site: String,
        path: String,
        reliable: bool,
        cause: TransportError,
    },
    /// The file has no Document ID.
    DocumentIdNotConfigured {
        site: String,
        path: String,
        reliable: bool,
    },
    /// A Document ID exists but the redirect URL field is empty.
    PermanentUrlMissing {
        site: String,
        path: String,
        document_id: String,
        reliable: bool,
    },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::SessionSiteMismatch { expected, actual } => write!(
                f,
                "session is bound to {actual} but the document lives on {expected}; \
                 sign in to {expected} again"
            ),
            ResolutionError::TransportFailure {
                site,
                path,
                reliable,
                ..
            } => {
                write!(f, "could not fetch metadata for '{path}' on {site}")?;
                if !reliable {
                    write!(f, " ({SHARING_LINK_HINT})")?;
                }
                Ok(())
            }
            ResolutionError::DocumentIdNotConfigured {
                site,
                path,
                reliable,
            } => {
                write!(
                    f,
                    "no Document ID for '{path}' on {site}: the Document ID feature is \
                     probably not enabled on this site collection"
                )?;
                if !reliable {
                    write!(
                        f,
                        "; or the guessed path does not point at the real file, since {SHARING_LINK_HINT}"
                    )?;
                }
                Ok(())
            }
            ResolutionError::PermanentUrlMissing {
                site,
                path,
                document_id,
                reliable,
            } => {
                write!(
                    f,
                    "'{path}' on {site} has Document ID {document_id} but no permanent URL"
                )?;
                if !reliable {
                    write!(f, " ({SHARING_LINK_HINT})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::TransportFailure { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
