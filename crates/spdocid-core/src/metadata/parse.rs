//! Parse list item JSON (and REST error bodies) into our projection.

use serde::Deserialize;
use serde_json::Value;

use super::DocumentMetadata;

#[derive(Debug, Deserialize)]
struct ListItemFields {
    #[serde(rename = "FileRef", default)]
    file_ref: Option<String>,
    #[serde(rename = "_dlc_DocId", default)]
    document_id: Option<String>,
    #[serde(rename = "_dlc_DocIdUrl", default)]
    document_id_url: Option<UrlFieldValue>,
}

/// `_dlc_DocIdUrl` is a URL field: either already flattened to text or the
/// REST `{ "Url": ..., "Description": ... }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UrlFieldValue {
    Text(String),
    Link {
        #[serde(rename = "Url", default)]
        url: Option<String>,
        #[serde(rename = "Description", default)]
        description: Option<String>,
    },
}

impl UrlFieldValue {
    /// Flattens to the multi-valued text form `"<url>, <description>"`.
    fn into_field_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Link { url, description } => {
                let url = url.filter(|u| !u.trim().is_empty())?;
                Some(match description {
                    Some(d) if !d.trim().is_empty() => format!("{url}, {d}"),
                    _ => url,
                })
            }
        }
    }
}

/// Parses a success body. `requested_path` fills `file_ref` when the server
/// omits it. Accepts both `nometadata` and verbose (`{"d": {...}}`) shapes.
pub(crate) fn parse_list_item(
    body: &[u8],
    requested_path: &str,
) -> Result<DocumentMetadata, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("not JSON: {e}"))?;
    let item = match value {
        Value::Object(mut map) => match map.remove("d") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert("d".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        _ => return Err("expected a JSON object".to_string()),
    };
    let fields: ListItemFields =
        serde_json::from_value(item).map_err(|e| format!("unexpected list item shape: {e}"))?;

    Ok(DocumentMetadata {
        file_ref: fields
            .file_ref
            .unwrap_or_else(|| requested_path.to_string()),
        document_id: fields.document_id,
        document_id_url_field: fields.document_id_url.and_then(UrlFieldValue::into_field_text),
    })
}

/// `odata.error.message.value` (nometadata/minimal) or `error.message.value` (verbose).
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let error = value.get("odata.error").or_else(|| value.get("error"))?;
    let message = error.get("message")?;
    let text = match message {
        Value::String(s) => s.as_str(),
        other => other.get("value")?.as_str()?,
    };
    Some(text.trim().to_string()).filter(|t| !t.is_empty())
}

/// True for "column does not exist" messages naming the Document ID fields.
pub(crate) fn is_missing_document_id_field(message: &str) -> bool {
    message.contains("_dlc_DocId") && message.contains("does not exist")
}
