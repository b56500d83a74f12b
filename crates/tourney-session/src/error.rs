//! Error types for the session layer.

use tourney_transport::RequestError;

/// Errors returned by session transitions.
///
/// Only `login`, `register` and [`require_user`] return these. `logout`
/// always succeeds locally and `fetch_user` recovers by dropping back to
/// anonymous, so neither has anything to report.
///
/// [`require_user`]: crate::SessionController::require_user
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The server refused the request or couldn't be reached.
    ///
    /// The message meant for people has already been written to
    /// [`Session::error`](crate::Session::error); this keeps the full
    /// transport detail (status, field errors) for callers that want it.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Another transition started while this one was in flight, and the
    /// newer one wins. Nothing from this call was applied.
    #[error("superseded by a newer session operation")]
    Superseded,

    /// The caller needs a logged-in user and there isn't one.
    #[error("not logged in")]
    Unauthenticated,
}

impl SessionError {
    /// HTTP status of the underlying failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status(),
            _ => None,
        }
    }
}
