pub mod config;
pub mod logging;

pub mod auth;
pub mod classifier;
pub mod metadata;
pub mod pipeline;
pub mod resolver;
pub mod transport;
pub mod url_model;

pub use classifier::{classify, classify_with_tenant, Classification};
pub use pipeline::{resolve_permanent_url, DocIdError, ResolveRequest, Resolution};
pub use resolver::PermanentUrl;
