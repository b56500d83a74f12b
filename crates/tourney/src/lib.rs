//! # Tourney
//!
//! Client library for a tournament manager API.
//!
//! The crate keeps track of who is logged in and gives typed access to
//! tournaments, rosters and matches. A bearer token is persisted between
//! runs, attached to every request, and validated against `/user` on
//! start and after every login. A token the server no longer accepts is
//! dropped automatically.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tourney::prelude::*;
//!
//! # async fn run() -> Result<(), TourneyError> {
//! tourney::init_tracing();
//! let client = TourneyClient::connect(ClientConfig::from_env()?).await?;
//! if client.session().snapshot().is_anonymous() {
//!     client.session().login("ann@example.com", "secret").await?;
//! }
//! let cups = client.tournaments().get_all().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! | Crate | Role |
//! |---|---|
//! | `tourney-protocol` | Wire types: entities, inputs, auth bodies, envelopes |
//! | `tourney-transport` | Credential store and the bearer-stamping HTTP client |
//! | `tourney-session` | Login state machine and the observable [`Session`] |
//! | `tourney-resources` | CRUD clients for tournaments, players, matches |

mod client;
mod config;
mod error;

pub use client::TourneyClient;
pub use config::{
    ClientConfig, ConfigError, DEFAULT_BASE_URL, ENV_API_URL, ENV_DATA_DIR,
    ENV_REQUEST_TIMEOUT_SECS,
};
pub use error::TourneyError;

pub use tourney_protocol as protocol;
pub use tourney_resources::{MatchClient, PlayerClient, TournamentClient};
pub use tourney_session::{Session, SessionController, SessionError};
pub use tourney_transport::{
    ApiClient, Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    RequestError,
};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Meant for binaries. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Common imports for users of the client.
pub mod prelude {
    pub use crate::{
        ClientConfig, Session, SessionController, SessionError, TourneyClient, TourneyError,
    };
    pub use tourney_protocol::{
        Match, MatchId, MatchInput, MatchStatus, Player, PlayerId, PlayerInput, ScoreInput,
        Tournament, TournamentId, TournamentInput, TournamentStatus, UserProfile,
    };
}
