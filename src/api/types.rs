use serde::{Deserialize, Serialize};

/// One persisted navbar configuration row.
///
/// The backend stores documents with a `_id` key; `id` is accepted too so
/// the type also reads back what it serializes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavbarRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Already-encoded image (usually a `data:` URI), rendered as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub logo_text: String,
    #[serde(default)]
    pub button_text: String,
}

/// Raw logo file sent as the `logo` multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload of a create or update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarForm {
    pub logo: Option<LogoUpload>,
    pub logo_text: String,
    pub button_text: String,
}

/// Some backends wrap the saved document: `{ "message": "...", "data": {...} }`.
#[derive(Deserialize)]
struct Wrapped {
    data: NavbarRecord,
}

/// Parses a 2xx create/update body. Unknown shapes are not an error,
/// the status code already decided success.
pub fn parse_saved_record(body: &str) -> Option<NavbarRecord> {
    if let Ok(record) = serde_json::from_str::<NavbarRecord>(body) {
        return Some(record);
    }
    serde_json::from_str::<Wrapped>(body).ok().map(|w| w.data)
}

/// Pulls a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}`, `{"error": "..."}` or a bare JSON string.
/// Anything else (HTML error pages, empty bodies) yields `None` so callers
/// can fall back to their own text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = match &value {
        serde_json::Value::String(s) => Some(s.as_str()),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|v| v.as_str())
            .or_else(|| map.get("error").and_then(|v| v.as_str())),
        _ => None,
    }?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_reads_mongo_id() {
        let json = r#"{"_id":"65f0","logo":"data:image/png;base64,AAAA","logoText":"Acme","buttonText":"Sign up","__v":0}"#;
        let record: NavbarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "65f0");
        assert_eq!(record.logo.as_deref(), Some("data:image/png;base64,AAAA"));
        assert_eq!(record.logo_text, "Acme");
        assert_eq!(record.button_text, "Sign up");
    }

    #[test]
    fn test_record_accepts_plain_id_and_missing_fields() {
        let record: NavbarRecord = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.logo, None);
        assert!(record.logo_text.is_empty());
        assert!(record.button_text.is_empty());
    }

    #[test]
    fn test_parse_saved_record_shapes() {
        let direct = r#"{"_id":"1","logoText":"A","buttonText":"B"}"#;
        assert_eq!(parse_saved_record(direct).unwrap().id, "1");

        let wrapped = r#"{"message":"ok","data":{"_id":"2","logoText":"A","buttonText":"B"}}"#;
        assert_eq!(parse_saved_record(wrapped).unwrap().id, "2");

        assert_eq!(parse_saved_record(r#"{"message":"Navbar created"}"#), None);
        assert_eq!(parse_saved_record(""), None);
    }

    macro_rules! test_error_messages {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(extract_error_message($input).as_deref(), $expected);
                }
            )+
        };
    }

    test_error_messages! {
        test_error_message_field: r#"{"message":"Logo too large"}"# => Some("Logo too large"),
        test_error_error_field: r#"{"error":"Not found"}"# => Some("Not found"),
        test_error_message_wins_over_error: r#"{"message":"a","error":"b"}"# => Some("a"),
        test_error_bare_string: r#""Bad request""# => Some("Bad request"),
        test_error_blank_message: r#"{"message":"   "}"# => None,
        test_error_non_string_message: r#"{"message":42}"# => None,
        test_error_html_page: "<html>502 Bad Gateway</html>" => None,
        test_error_empty_body: "" => None,
    }
}
