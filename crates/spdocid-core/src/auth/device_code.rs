//! Device authorization grant: show a code, poll until the user finishes.

use serde::Deserialize;
use std::io::Write;
use std::time::{Duration, Instant};

use super::token::{post_token, Authority};
use super::AuthError;
use crate::transport::{self, HttpRequest, TransportError, TransportSettings};

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
/// Added to the poll interval on `slow_down`.
const SLOW_DOWN_STEP_SECS: u64 = 5;
/// Upper bound on the server's `expires_in`; identity platform codes last 15 minutes.
const MAX_WAIT_SECS: u64 = 3600;

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: u64,
    #[serde(default = "default_interval")]
    interval: u64,
    #[serde(default)]
    message: Option<String>,
}

fn default_interval() -> u64 {
    5
}

/// Runs the flow and returns an access token for `scope`.
pub(crate) fn sign_in(
    authority: &Authority,
    client_id: &str,
    scope: &str,
    settings: &TransportSettings,
    prompt: &mut dyn Write,
) -> Result<String, AuthError> {
    let url = authority.endpoint("devicecode");
    let request = HttpRequest::post_form(url.as_str(), [("client_id", client_id), ("scope", scope)])
        .header("Accept", "application/json");
    let response = transport::send(&request, settings)?;
    if !response.is_success() {
        return Err(match serde_json::from_slice::<super::token::OAuthErrorBody>(&response.body) {
            Ok(body) => body.into_auth_error(),
            Err(_) => TransportError::Http {
                status: response.status,
                url,
                message: None,
            }
            .into(),
        });
    }
    let code: DeviceCodeResponse =
        serde_json::from_slice(&response.body).map_err(|e| TransportError::InvalidResponse {
            url: url.clone(),
            reason: format!("device code response: {e}"),
        })?;

    match &code.message {
        Some(message) => writeln!(prompt, "{message}")?,
        None => writeln!(
            prompt,
            "To sign in, open {} and enter the code {}",
            code.verification_uri, code.user_code
        )?,
    }
    prompt.flush()?;
    tracing::info!(verification_uri = %code.verification_uri, "waiting for device code sign-in");

    let deadline = Instant::now() + Duration::from_secs(code.expires_in.min(MAX_WAIT_SECS));
    let mut interval = code.interval;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(AuthError::Expired);
        }
        std::thread::sleep(Duration::from_secs(interval).min(remaining));

        let fields = [
            ("grant_type", DEVICE_CODE_GRANT),
            ("client_id", client_id),
            ("device_code", code.device_code.as_str()),
        ];
        match post_token(authority, &fields, settings)? {
            Ok(token) => return Ok(token.access_token),
            Err(body) => match body.error.as_str() {
                "authorization_pending" => {}
                "slow_down" => interval = interval.saturating_add(SLOW_DOWN_STEP_SECS),
                _ => return Err(body.into_auth_error()),
            },
        }
    }
}
