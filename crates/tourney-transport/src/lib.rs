//! Transport layer for the tournament client.
//!
//! Two pieces live here, leaves first:
//!
//! 1. **Credential storage** ([`CredentialStore`] trait) holds the one bearer
//!    token the process is using, and survives restarts when backed by
//!    [`FileCredentialStore`].
//! 2. **HTTP** ([`ApiClient`]) sends every request against a single base
//!    URL and stamps it with `Authorization: Bearer <token>` through
//!    [`decorate`], reading the store at send time.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session / Resource clients (above)  ← call get/post/put/delete
//!     ↕
//! Transport (this crate)  ← base URL, bearer header, status → error
//!     ↕
//! Protocol (below)  ← JSON shapes, ErrorBody
//! ```
//!
//! Nothing in this crate decides *when* the token changes. It only reads
//! it. The session layer is the sole writer.

mod client;
mod credentials;
mod error;

pub use client::{ApiClient, decorate};
pub use credentials::{
    Credential, CredentialStore, DEFAULT_CREDENTIAL_KEY, FileCredentialStore,
    MemoryCredentialStore,
};
pub use error::RequestError;
