//! Session management for the tournament client.
//!
//! This crate owns the answer to "who is using the client right now?":
//!
//! 1. **Transitions**: `login`, `register`, `logout`, `fetch_user`
//!    ([`SessionController`]).
//! 2. **The token rule**: every token change goes through one function,
//!    [`SessionController::on_token_changed`], which persists or clears the
//!    token and then validates it against `/user`.
//! 3. **The read-only view** ([`Session`]): user, token, loading flag, and
//!    last error, published through a `tokio::sync::watch` channel that
//!    screens can await for re-rendering.
//!
//! # How it fits in the stack
//!
//! ```text
//! Views (above)  ← read Session snapshots, call login/logout
//!     ↕
//! Session Layer (this crate)  ← sole writer of the credential store
//!     ↕
//! Transport (below)  ← ApiClient stamps each request with the token
//! ```

mod controller;
mod error;
mod session;

pub use controller::SessionController;
pub use error::SessionError;
pub use session::Session;

/// Shown when `/login` fails without a server-supplied message.
pub const LOGIN_FAILED: &str = "Login failed";
/// Shown when `/register` fails without a server-supplied message.
pub const REGISTRATION_FAILED: &str = "Registration failed";
/// Shown when a stored token can't be turned into a user profile.
pub const FETCH_USER_FAILED: &str = "Failed to fetch user";
