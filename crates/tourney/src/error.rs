//! Unified error type for the tourney client.

use tourney_session::SessionError;
use tourney_transport::RequestError;

use crate::ConfigError;

/// Top-level error wrapping each layer's own error.
///
/// Callers of the facade match on this one type; `?` converts the
/// layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TourneyError {
    /// Bad configuration (URL, timeout, storage key).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP call failed (status, network, decode).
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A session transition failed or needed a logged-in user.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl TourneyError {
    /// HTTP status behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status(),
            Self::Session(e) => e.status(),
            Self::Config(_) => None,
        }
    }
}
