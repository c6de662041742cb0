//! Blocking HTTP transport.
//!
//! Uses the curl crate (libcurl) for one request at a time: custom header
//! list, optional form body, response body collected in memory. Non-2xx
//! responses are returned, not turned into errors; callers decide what a
//! status means for them.

mod error;

pub use error::TransportError;

use std::time::Duration;

/// Timeout policy of the transport. `None` leaves libcurl's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with an `application/x-www-form-urlencoded` body.
    pub fn post_form<'a>(
        url: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: Some(body.into_bytes()),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs `request` in the current thread and returns status + body.
pub fn send(
    request: &HttpRequest,
    settings: &TransportSettings,
) -> Result<HttpResponse, TransportError> {
    let url = request.url.as_str();
    let curl_err = |e: curl::Error| TransportError::Curl {
        url: url.to_string(),
        source: e,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    if let Some(t) = settings.connect_timeout {
        easy.connect_timeout(t).map_err(curl_err)?;
    }
    if let Some(t) = settings.timeout {
        easy.timeout(t).map_err(curl_err)?;
    }
    if request.method == Method::Post {
        easy.post(true).map_err(curl_err)?;
        easy.post_fields_copy(request.body.as_deref().unwrap_or_default())
            .map_err(curl_err)?;
    }

    // Header lines are "Name: value".
    let mut list = curl::easy::List::new();
    for (k, v) in &request.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(curl_err)?;
    }
    if !request.headers.is_empty() {
        easy.http_headers(list).map_err(curl_err)?;
    }

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let status = easy.response_code().map_err(curl_err)?;
    tracing::debug!(method = ?request.method, %url, status, bytes = body.len(), "http exchange");
    Ok(HttpResponse { status, body })
}
