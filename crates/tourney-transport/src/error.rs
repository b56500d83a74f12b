use std::collections::BTreeMap;

/// Errors that can occur while talking to the API.
///
/// Every variant means "the request did not produce the value you asked
/// for". Callers that need to show something to a person usually want
/// [`server_message`](Self::server_message) first and fall back to their
/// own wording.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The server answered with a non-2xx status.
    ///
    /// `message` and `field_errors` come from the response body when it
    /// has the usual `{ "message", "errors" }` shape.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// The request never got a response: DNS, refused connection, reset,
    /// timeout, or a failure reading the body.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body that doesn't match the expected shape.
    #[error("decode: {0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status code, when the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Per-field validation messages from a 422 response. Empty otherwise.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Status { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }

    /// `true` for 401, the server's "this token is no good".
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
