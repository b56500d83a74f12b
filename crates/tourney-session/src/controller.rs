//! The session controller: login, register, logout, profile fetch.
//!
//! The controller is the only writer of the credential store. Everything
//! that changes the token goes through [`SessionController::on_token_changed`]
//! (or its in-transition twin), which keeps three things in step:
//! the persisted token, the `Authorization` header (read from the same
//! store by [`ApiClient`]), and the published [`Session`].
//!
//! # Overlapping transitions
//!
//! Each transition takes a number from a monotonic counter when it
//! starts. When its network call comes back it may only write state if
//! no newer transition has started since. Late results are dropped and
//! logged at `debug`. The counter is bumped and checked inside the watch
//! channel's write lock, so "check generation, then write store and
//! state" can't interleave with another transition's start.
//!
//! `logout` is the exception: its local clear always applies, and it
//! becomes the newest transition when it does.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tourney_protocol::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use tourney_transport::{ApiClient, Credential, CredentialStore, RequestError};

use crate::{FETCH_USER_FAILED, LOGIN_FAILED, REGISTRATION_FAILED, Session, SessionError};

/// Owns the session state machine.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct SessionController {
    api: ApiClient,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
    generation: AtomicU64,
}

impl SessionController {
    /// Creates a controller that reads and writes the token through the
    /// store `api` already uses.
    ///
    /// The initial state is `loading` with whatever token was persisted.
    /// Call [`start`](Self::start) to validate it.
    pub fn new(api: ApiClient) -> Self {
        let credentials = Arc::clone(api.credentials());
        let (state, _) = watch::channel(Session::starting(credentials.get()));
        Self {
            api,
            credentials,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Validates the persisted token, if any.
    ///
    /// A token that `/user` accepts yields an authenticated session; one it
    /// rejects is erased. With no token the session simply stops loading.
    pub async fn start(&self) {
        let token = self.state.borrow().token.clone();
        tracing::info!(has_token = token.is_some(), "starting session");
        self.on_token_changed(token).await;
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// A receiver that sees every state change, for views that re-render.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The logged-in user, or [`SessionError::Unauthenticated`].
    pub fn require_user(&self) -> Result<UserProfile, SessionError> {
        self.state
            .borrow()
            .user
            .clone()
            .ok_or(SessionError::Unauthenticated)
    }

    /// Exchanges credentials for a token and loads the matching profile.
    ///
    /// On success the returned response is the server's, and the session
    /// reflects the profile fetch (which may itself fail and drop the
    /// token again). On failure [`Session::error`] carries the server's
    /// message, or `"Login failed"`.
    ///
    /// # Errors
    /// [`SessionError::Request`] when the server rejects the login or
    /// can't be reached; [`SessionError::Superseded`] when a newer
    /// transition started first.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, SessionError> {
        let tx = self.begin("login");
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.post("login", &body).await;
        self.finish_auth(&tx, result, LOGIN_FAILED).await
    }

    /// Creates an account and signs straight into it.
    ///
    /// Same outcomes as [`login`](Self::login), with `"Registration
    /// failed"` as the fallback message.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<AuthResponse, SessionError> {
        let tx = self.begin("register");
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: password_confirmation.to_string(),
        };
        let result = self.api.post("register", &body).await;
        self.finish_auth(&tx, result, REGISTRATION_FAILED).await
    }

    /// Tells the server to revoke the token, then forgets it locally.
    ///
    /// The local half always happens, even if another transition started
    /// while `/logout` was in flight. That transition's result is then
    /// discarded. A failed `/logout` is logged and otherwise ignored.
    pub async fn logout(&self) {
        let mut tx = self.begin("logout");
        if let Err(err) = self.api.post_empty("logout").await {
            tracing::warn!(error = %err, "logout request failed, clearing session anyway");
        }
        tx.take_over(|s| self.forget(s));
        tracing::info!("logged out");
    }

    /// Reloads the profile for the current token.
    ///
    /// On failure the token is erased and [`Session::error`] is set to
    /// `"Failed to fetch user"`.
    pub async fn fetch_user(&self) {
        let tx = self.begin("fetch_user");
        self.resolve_user(&tx).await;
    }

    /// Installs `token` (or erases it, for `None`) and re-validates.
    ///
    /// `Some` persists the token, drops the old profile and fetches a new
    /// one. `None` clears the store and the profile and ends loading.
    pub async fn on_token_changed(&self, token: Option<Credential>) {
        let tx = self.begin("token_changed");
        self.token_changed(&tx, token).await;
    }

    /// Starts a transition: bumps the generation and raises `loading`.
    fn begin(&self, op: &'static str) -> Transition<'_> {
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            s.loading = true;
        });
        tracing::debug!(op, generation, "transition started");
        Transition {
            controller: self,
            generation,
            op,
        }
    }

    async fn finish_auth(
        &self,
        tx: &Transition<'_>,
        result: Result<AuthResponse, RequestError>,
        fallback: &str,
    ) -> Result<AuthResponse, SessionError> {
        let result = result.and_then(|resp| match Credential::new(resp.access_token.as_str()) {
            Some(credential) => Ok((resp, credential)),
            None => Err(RequestError::Decode("empty access_token".into())),
        });

        match result {
            Ok((resp, credential)) => {
                if !self.token_changed(tx, Some(credential)).await {
                    return Err(SessionError::Superseded);
                }
                tracing::info!(op = tx.op, "token issued");
                Ok(resp)
            }
            Err(err) => {
                tracing::warn!(op = tx.op, error = %err, "authentication failed");
                let message = err.server_message().unwrap_or(fallback).to_string();
                tx.apply(|s| s.error = Some(message));
                Err(err.into())
            }
        }
    }

    /// Returns `false` if a newer transition got there first and nothing
    /// was written.
    async fn token_changed(&self, tx: &Transition<'_>, token: Option<Credential>) -> bool {
        match token {
            Some(credential) => {
                let stored = tx.apply(|s| {
                    self.credentials.set(&credential);
                    s.token = Some(credential);
                    s.user = None;
                });
                if stored {
                    self.resolve_user(tx).await;
                }
                stored
            }
            None => tx.apply(|s| self.forget(s)),
        }
    }

    async fn resolve_user(&self, tx: &Transition<'_>) {
        match self.api.get::<UserProfile>("user").await {
            Ok(user) => {
                let id = user.id;
                if tx.apply(|s| {
                    s.user = Some(user);
                    s.error = None;
                }) {
                    tracing::info!(user = %id, "session authenticated");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load profile, dropping token");
                tx.apply(|s| {
                    s.error = Some(FETCH_USER_FAILED.to_string());
                    self.forget(s);
                });
            }
        }
    }

    /// Erases the token from the store and the session. Leaves `error`.
    ///
    /// Runs under the state lock, like every store write, so a stale
    /// transition can never touch the store after a newer one has. The
    /// store does small synchronous writes of one short file.
    fn forget(&self, s: &mut Session) {
        self.credentials.clear();
        s.token = None;
        s.user = None;
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("api", &self.api)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// One in-flight transition.
///
/// Dropping it lowers `loading`, unless a newer transition has taken
/// over. That covers normal return, `?` and a cancelled future alike.
struct Transition<'a> {
    controller: &'a SessionController,
    generation: u64,
    op: &'static str,
}

impl Transition<'_> {
    fn is_current(&self) -> bool {
        self.controller.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Runs `f` against the state if this transition is still the newest.
    fn apply(&self, f: impl FnOnce(&mut Session)) -> bool {
        let mut applied = false;
        self.controller.state.send_if_modified(|s| {
            if !self.is_current() {
                return false;
            }
            f(s);
            applied = true;
            true
        });
        if !applied {
            tracing::debug!(
                op = self.op,
                generation = self.generation,
                "discarding result of superseded transition"
            );
        }
        applied
    }
}

impl Transition<'_> {
    /// Makes this the newest transition and runs `f`, whatever started in
    /// the meantime. Results of those transitions are dropped.
    fn take_over(&mut self, f: impl FnOnce(&mut Session)) {
        let controller = self.controller;
        let mut generation = self.generation;
        controller.state.send_modify(|s| {
            generation = controller.generation.fetch_add(1, Ordering::SeqCst) + 1;
            f(s);
        });
        if generation != self.generation + 1 {
            tracing::debug!(op = self.op, "overriding newer transition");
        }
        self.generation = generation;
    }
}

impl Drop for Transition<'_> {
    fn drop(&mut self) {
        self.controller.state.send_if_modified(|s| {
            if self.is_current() && s.loading {
                s.loading = false;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use tourney_transport::MemoryCredentialStore;

    use super::*;

    fn controller(store: MemoryCredentialStore) -> SessionController {
        // Nothing listens here; these tests never reach the network.
        SessionController::new(ApiClient::new("http://127.0.0.1:9", Arc::new(store)))
    }

    #[test]
    fn test_new_reads_persisted_token_and_starts_loading() {
        let store = MemoryCredentialStore::with_credential(Credential::new("tok1").unwrap());
        let s = controller(store).snapshot();
        assert!(s.loading);
        assert_eq!(s.token.unwrap().expose(), "tok1");
        assert!(s.user.is_none());
    }

    #[test]
    fn test_transition_drop_clears_loading() {
        let c = controller(MemoryCredentialStore::new());
        {
            let _tx = c.begin("test");
            assert!(c.snapshot().loading);
        }
        assert!(!c.snapshot().loading);
    }

    #[test]
    fn test_stale_transition_cannot_write_or_clear_loading() {
        let c = controller(MemoryCredentialStore::new());
        let old = c.begin("old");
        let new = c.begin("new");

        assert!(!old.apply(|s| s.error = Some("late".into())));
        drop(old);
        let s = c.snapshot();
        assert!(s.error.is_none());
        assert!(s.loading, "newer transition still owns loading");

        assert!(new.apply(|s| s.error = Some("fresh".into())));
        drop(new);
        let s = c.snapshot();
        assert_eq!(s.error.as_deref(), Some("fresh"));
        assert!(!s.loading);
    }

    #[test]
    fn test_take_over_wins_against_newer_transition() {
        let c = controller(MemoryCredentialStore::new());
        let mut old = c.begin("old");
        let newer = c.begin("newer");

        old.take_over(|s| s.error = Some("cleared".into()));
        assert!(!newer.apply(|s| s.error = Some("late".into())));
        drop(newer);
        assert!(c.snapshot().loading, "taken-over transition owns loading");

        drop(old);
        let s = c.snapshot();
        assert_eq!(s.error.as_deref(), Some("cleared"));
        assert!(!s.loading);
    }

    #[test]
    fn test_forget_clears_store() {
        let store = Arc::new(MemoryCredentialStore::with_credential(
            Credential::new("tok1").unwrap(),
        ));
        let c = SessionController::new(ApiClient::new("http://127.0.0.1:9", store.clone()));
        let tx = c.begin("test");
        assert!(tx.apply(|s| c.forget(s)));
        assert!(store.get().is_none());
        assert!(c.snapshot().token.is_none());
    }

    #[test]
    fn test_require_user_when_anonymous() {
        let c = controller(MemoryCredentialStore::new());
        assert!(matches!(c.require_user(), Err(SessionError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_token_changed_none_needs_no_network() {
        let store = Arc::new(MemoryCredentialStore::with_credential(
            Credential::new("tok1").unwrap(),
        ));
        let c = SessionController::new(ApiClient::new("http://127.0.0.1:9", store.clone()));
        c.on_token_changed(None).await;

        let s = c.snapshot();
        assert!(s.is_anonymous());
        assert!(!s.loading);
        assert!(store.get().is_none());
    }
}
