//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::UserId;

/// Body for `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /register`.
///
/// `password_confirmation` is checked by the server, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Successful response from `/login` or `/register`.
///
/// Only `access_token` is required. Servers commonly also send the token
/// type and the freshly created user; those land in `extra` untouched and
/// are never relied on. The profile is always re-fetched from `/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The logged-in account, as returned by `GET /user`.
///
/// The server owns this record and may send more than we model. Extra
/// fields land in `extra` so nothing is silently dropped when a view
/// wants, say, `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
