//! Authorization-code sign-in with PKCE and a loopback redirect listener.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;

use super::token::{post_token, Authority};
use super::AuthError;
use crate::transport::{TransportError, TransportSettings};

const VERIFIER_LEN: usize = 64;
const STATE_LEN: usize = 32;

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub(crate) struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        Self::from_verifier(random_token(VERIFIER_LEN))
    }

    pub fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        Self {
            challenge: URL_SAFE_NO_PAD.encode(digest),
            verifier,
        }
    }
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Prints the authorize URL, waits for the browser redirect, and redeems the code.
pub(crate) fn sign_in(
    authority: &Authority,
    client_id: &str,
    scope: &str,
    settings: &TransportSettings,
    prompt: &mut dyn Write,
) -> Result<String, AuthError> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let redirect_uri = format!("http://localhost:{}/", listener.local_addr()?.port());
    let pkce = Pkce::generate();
    let state = random_token(STATE_LEN);

    let authorize = authorize_url(authority, client_id, scope, &redirect_uri, &pkce, &state)?;
    writeln!(prompt, "Open this URL in a browser to sign in:\n  {authorize}")?;
    prompt.flush()?;
    tracing::info!(%redirect_uri, "waiting for interactive sign-in redirect");

    let code = wait_for_code(&listener, &state)?;
    let fields = [
        ("grant_type", "authorization_code"),
        ("client_id", client_id),
        ("code", code.as_str()),
        ("redirect_uri", redirect_uri.as_str()),
        ("code_verifier", pkce.verifier.as_str()),
        ("scope", scope),
    ];
    match post_token(authority, &fields, settings)? {
        Ok(token) => Ok(token.access_token),
        Err(body) => Err(body.into_auth_error()),
    }
}

pub(crate) fn authorize_url(
    authority: &Authority,
    client_id: &str,
    scope: &str,
    redirect_uri: &str,
    pkce: &Pkce,
    state: &str,
) -> Result<url::Url, AuthError> {
    let endpoint = authority.endpoint("authorize");
    url::Url::parse_with_params(
        &endpoint,
        [
            ("client_id", client_id),
            ("response_type", "code"),
            ("response_mode", "query"),
            ("redirect_uri", redirect_uri),
            ("scope", scope),
            ("state", state),
            ("code_challenge", pkce.challenge.as_str()),
            ("code_challenge_method", "S256"),
        ],
    )
    .map_err(|e| {
        TransportError::InvalidUrl {
            url: endpoint.clone(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Accepts connections until one carries `code` or `error`; other requests
/// (e.g. `/favicon.ico`) get a 404.
fn wait_for_code(listener: &TcpListener, expected_state: &str) -> Result<String, AuthError> {
    for stream in listener.incoming() {
        let mut stream = stream?;
        let mut request_line = String::new();
        BufReader::new(&stream).read_line(&mut request_line)?;
        let target = request_line.split_whitespace().nth(1).unwrap_or("/");

        match parse_redirect(target, expected_state) {
            Ok(Some(code)) => {
                respond(&mut stream, "200 OK", "Signed in. You can close this window.");
                return Ok(code);
            }
            Ok(None) => respond(&mut stream, "404 Not Found", ""),
            Err(e) => {
                respond(&mut stream, "400 Bad Request", "Sign-in failed. Check the terminal.");
                return Err(e);
            }
        }
    }
    Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "redirect listener closed").into())
}

fn respond(stream: &mut std::net::TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    // Browser tab feedback only; sign-in outcome does not depend on it.
    let _ = stream.write_all(response.as_bytes());
}

/// Extracts the authorization code from a redirect request target.
/// `Ok(None)` when the request is not a sign-in redirect at all.
pub(crate) fn parse_redirect(target: &str, expected_state: &str) -> Result<Option<String>, AuthError> {
    let Ok(url) = url::Url::parse(&format!("http://localhost{target}")) else {
        return Ok(None);
    };
    let mut code = None;
    let mut state = None;
    let mut error = None;
    let mut description = None;
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "code" => code = Some(v.into_owned()),
            "state" => state = Some(v.into_owned()),
            "error" => error = Some(v.into_owned()),
            "error_description" => description = Some(v.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(super::token::OAuthErrorBody {
            error,
            error_description: description,
        }
        .into_auth_error());
    }
    let Some(code) = code else {
        return Ok(None);
    };
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    Ok(Some(code))
}
