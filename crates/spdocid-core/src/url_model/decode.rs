//! Percent-decoding for URL path segments.

/// Percent-decodes `input`, leaving malformed escapes as literal text.
///
/// Invalid UTF-8 in the decoded bytes is replaced lossily; `+` is not treated
/// as a space (that is a form-encoding rule, not a path rule).
pub fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.as_bytes().iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        let h = bytes.next();
        let l = bytes.next();
        match (h.and_then(hex_digit), l.and_then(hex_digit)) {
            (Some(high), Some(low)) => out.push(high << 4 | low),
            _ => {
                out.push(b'%');
                out.extend(h);
                out.extend(l);
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Decodes every segment of an encoded URL path, e.g.
/// `/sites/Finance/Shared%20Documents/Budget.xlsx` →
/// `/sites/Finance/Shared Documents/Budget.xlsx`.
///
/// Anything after a decoded `?` is dropped: only the path addresses the file.
pub fn decode_server_relative_path(encoded: &str) -> String {
    let decoded = encoded
        .split('/')
        .map(percent_decode)
        .collect::<Vec<_>>()
        .join("/");
    match decoded.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => decoded,
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
