//! How the API wraps payloads and reports failures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Successful resource responses arrive as `{ "data": ... }`.
///
/// Resource clients decode into this and hand back the inner value, so
/// callers never see the wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Body of a non-2xx response.
///
/// Shape: `{ "message": "...", "errors": { "email": ["..."] } }`. Both
/// parts are optional, and a 500 from a proxy may have neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Per-field validation messages, present on 422 responses.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    /// Parses a raw response body. Anything that isn't the expected JSON
    /// shape yields an empty `ErrorBody` rather than an error: a failed
    /// request must still be reportable even if its body is HTML.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope_unwraps_list() {
        let env: DataEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"data":[1,2,3]}"#).unwrap();
        assert_eq!(env.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_error_body_parse_validation_errors() {
        let body = br#"{"message":"Email already taken","errors":{"email":["The email has already been taken."]}}"#;
        let parsed = ErrorBody::parse(body);
        assert_eq!(parsed.message.as_deref(), Some("Email already taken"));
        assert_eq!(parsed.errors["email"].len(), 1);
    }

    #[test]
    fn test_error_body_parse_non_json_is_empty() {
        let parsed = ErrorBody::parse(b"<html>Bad Gateway</html>");
        assert_eq!(parsed, ErrorBody::default());
    }
}
