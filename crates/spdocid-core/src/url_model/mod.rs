//! URL modeling for SharePoint links.
//!
//! Splits a raw link into scheme/host/port/path/query and provides the
//! percent-decoding used to turn an encoded path into the server-relative
//! form the REST API expects.

mod decode;
mod parsed;

pub use decode::{decode_server_relative_path, percent_decode};
pub use parsed::ParsedUrl;
