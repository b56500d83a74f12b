//! The read-only session snapshot views render from.

use tourney_protocol::UserProfile;
use tourney_transport::Credential;

/// Who is using the client, as of the last state change.
///
/// Views never construct or edit one of these. They get copies from
/// [`SessionController::snapshot`](crate::SessionController::snapshot) or
/// watch for new ones via
/// [`SessionController::subscribe`](crate::SessionController::subscribe).
///
/// ## Invariants
///
/// - `user` is `Some` only while `token` is `Some` and `/user` accepted it.
/// - `loading` is `true` exactly while a transition is in flight.
///
/// ```text
///            login/register ok          /user ok
/// Anonymous ─────────────────→ Validating ─────────→ Authenticated
///     ↑                            │                       │
///     └──── /user failed ──────────┘                       │
///     └──────────────────── logout ────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Profile of the logged-in account.
    pub user: Option<UserProfile>,

    /// The bearer token currently in the credential store.
    pub token: Option<Credential>,

    /// A transition (login, register, logout, profile fetch) is running.
    pub loading: bool,

    /// Message from the last failed transition, for display.
    pub error: Option<String>,
}

impl Session {
    /// State at process start: whatever token was persisted, not yet
    /// checked, with `loading` set until the check finishes.
    pub(crate) fn starting(token: Option<Credential>) -> Self {
        Self {
            user: None,
            token,
            loading: true,
            error: None,
        }
    }

    /// A validated user is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// No token at all. A session can be neither anonymous nor
    /// authenticated while a new token is being validated.
    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}
