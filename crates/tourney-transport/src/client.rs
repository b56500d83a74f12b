//! The shared HTTP client.
//!
//! One [`ApiClient`] serves the whole process: the session controller
//! uses it for `/login`, `/user` and friends, and every resource client
//! wraps the same instance. It knows one base URL and one credential
//! store, and nothing else. It is not a cache.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tourney_protocol::ErrorBody;

use crate::{CredentialStore, RequestError};

/// Attaches `Authorization: Bearer <token>` when `credentials` holds a
/// token, and leaves the request untouched otherwise.
///
/// This is the only place the header is set. The store is read when the
/// request is built, not when the client is created, so a token stored a
/// moment ago is picked up by the very next call.
pub fn decorate(
    builder: RequestBuilder,
    credentials: &dyn CredentialStore,
) -> RequestBuilder {
    match credentials.get() {
        Some(credential) => builder.bearer_auth(credential.expose()),
        None => builder,
    }
}

/// A JSON-over-HTTP client bound to one API base URL.
///
/// `reqwest::Client` is already a cheap handle around a connection pool,
/// so cloning an `ApiClient` or sharing it behind an `Arc` costs nothing
/// extra.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client with a default `reqwest::Client`.
    ///
    /// `base_url` includes any version prefix, e.g.
    /// `http://localhost:8000/api/v1`.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, credentials)
    }

    /// Creates a client around a caller-configured `reqwest::Client`
    /// (timeouts, proxies, user agent).
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The store this client reads the bearer token from.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path`, decoding the JSON body as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, RequestError> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        Self::decode(resp).await
    }

    /// `POST path` with a JSON body, decoding the JSON response as `T`.
    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path).json(body);
        let resp = self.send(req).await?;
        Self::decode(resp).await
    }

    /// `POST path` with no body, ignoring whatever comes back.
    ///
    /// For endpoints like `/logout` where success is the whole answer.
    pub async fn post_empty(&self, path: &str) -> Result<(), RequestError> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    /// `PUT path` with a JSON body, decoding the JSON response as `T`.
    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::PUT, path).json(body);
        let resp = self.send(req).await?;
        Self::decode(resp).await
    }

    /// `DELETE path`. Any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), RequestError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Builds a request for `path` and runs it through [`decorate`].
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(
            %method,
            %url,
            authenticated = self.credentials.get().is_some(),
            "sending request"
        );
        decorate(self.http.request(method, url), self.credentials.as_ref())
    }

    /// Sends the request and turns any non-2xx status into
    /// [`RequestError::Status`].
    async fn send(&self, req: RequestBuilder) -> Result<Response, RequestError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        // The body is only used for the error message. If reading it
        // fails too, the status alone still tells the caller what happened.
        let body = resp.bytes().await.unwrap_or_default();
        let ErrorBody { message, errors } = ErrorBody::parse(&body);
        tracing::debug!(status = status.as_u16(), ?message, "request failed");
        Err(RequestError::Status {
            status: status.as_u16(),
            message,
            field_errors: errors,
        })
    }

    async fn decode<T: DeserializeOwned>(
        resp: Response,
    ) -> Result<T, RequestError> {
        let body = resp.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| RequestError::Decode(format!("response body: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use super::*;
    use crate::{Credential, MemoryCredentialStore};

    fn client_with(store: MemoryCredentialStore) -> ApiClient {
        ApiClient::new("http://api.test/api/v1/", Arc::new(store))
    }

    fn cred(raw: &str) -> Credential {
        Credential::new(raw).unwrap()
    }

    #[test]
    fn test_url_joins_with_single_slash() {
        let client = client_with(MemoryCredentialStore::new());
        assert_eq!(client.base_url(), "http://api.test/api/v1");
        assert_eq!(client.url("/tournaments"), "http://api.test/api/v1/tournaments");
        assert_eq!(client.url("matches/3"), "http://api.test/api/v1/matches/3");
    }

    #[test]
    fn test_decorate_with_token_adds_exactly_one_bearer_header() {
        let store = MemoryCredentialStore::with_credential(cred("tok1"));
        let req = decorate(reqwest::Client::new().get("http://api.test/"), &store)
            .build()
            .unwrap();

        let values: Vec<_> = req.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer tok1");
    }

    #[test]
    fn test_decorate_without_token_adds_no_header() {
        let store = MemoryCredentialStore::new();
        let req = decorate(reqwest::Client::new().get("http://api.test/"), &store)
            .build()
            .unwrap();

        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_request_reads_store_at_build_time() {
        // The client is created while anonymous; the token shows up later.
        let store = Arc::new(MemoryCredentialStore::new());
        let client = ApiClient::new("http://api.test", store.clone());

        let before = client.request(Method::GET, "user").build().unwrap();
        assert!(before.headers().get(AUTHORIZATION).is_none());

        store.set(&cred("late"));
        let after = client.request(Method::GET, "user").build().unwrap();
        assert_eq!(after.headers()[AUTHORIZATION], "Bearer late");

        store.clear();
        let cleared = client.request(Method::GET, "user").build().unwrap();
        assert!(cleared.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let client = client_with(MemoryCredentialStore::with_credential(cred("secret")));
        let debug = format!("{client:?}");
        assert!(debug.contains("api.test"));
        assert!(!debug.contains("secret"));
    }
}
