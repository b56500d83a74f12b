//! Resource clients for the tournament API.
//!
//! Each client is a thin, stateless wrapper over a shared [`ApiClient`]:
//! it knows its resource paths, unwraps the `{ "data": ... }` envelope,
//! and logs failures before handing them back. Nothing is cached, so every
//! call reflects the server at the moment it answers.
//!
//! Authentication is not handled here. The `ApiClient` stamps each
//! request with whatever token the session layer last stored.
//!
//! [`ApiClient`]: tourney_transport::ApiClient

mod matches;
mod players;
mod tournaments;

pub use matches::MatchClient;
pub use players::PlayerClient;
pub use tournaments::TournamentClient;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tourney_protocol::DataEnvelope;
use tourney_transport::{ApiClient, RequestError};

/// Logs a failed call at `warn` and passes the result through unchanged.
fn report<T>(result: Result<T, RequestError>, action: &str) -> Result<T, RequestError> {
    if let Err(err) = &result {
        tracing::warn!(action, error = %err, "resource request failed");
    }
    result
}

async fn get_data<T: DeserializeOwned>(
    api: &ApiClient,
    path: &str,
    action: &str,
) -> Result<T, RequestError> {
    let result = api.get::<DataEnvelope<T>>(path).await;
    report(result, action).map(DataEnvelope::into_inner)
}

async fn post_data<B, T>(
    api: &ApiClient,
    path: &str,
    body: &B,
    action: &str,
) -> Result<T, RequestError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let result = api.post::<B, DataEnvelope<T>>(path, body).await;
    report(result, action).map(DataEnvelope::into_inner)
}

async fn put_data<B, T>(
    api: &ApiClient,
    path: &str,
    body: &B,
    action: &str,
) -> Result<T, RequestError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let result = api.put::<B, DataEnvelope<T>>(path, body).await;
    report(result, action).map(DataEnvelope::into_inner)
}

async fn delete(api: &ApiClient, path: &str, action: &str) -> Result<(), RequestError> {
    report(api.delete(path).await, action)
}
