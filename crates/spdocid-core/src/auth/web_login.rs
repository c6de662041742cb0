//! Browser-cookie sign-in: the user pastes the `Cookie` header of a signed-in
//! browser session.

use std::io::{BufRead, Write};

use super::AuthError;
use crate::classifier::SiteReference;

pub(crate) fn sign_in(
    site: &SiteReference,
    input: &mut dyn BufRead,
    prompt: &mut dyn Write,
) -> Result<String, AuthError> {
    writeln!(
        prompt,
        "Sign in to {site} in a browser, then paste the request's Cookie header (FedAuth/rtFa):"
    )?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let cookie = normalize_cookie(&line).ok_or(AuthError::EmptyCredential)?;
    if !cookie.contains("FedAuth=") && !cookie.contains("rtFa=") {
        tracing::warn!("pasted cookie has neither FedAuth nor rtFa; SharePoint will likely reject it");
    }
    Ok(cookie)
}

/// Trims the pasted text and drops a leading `Cookie:` label.
fn normalize_cookie(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let value = match trimmed.split_once(':') {
        Some((name, rest)) if name.trim().eq_ignore_ascii_case("cookie") => rest.trim(),
        _ => trimmed,
    };
    (!value.is_empty()).then(|| value.to_string())
}
