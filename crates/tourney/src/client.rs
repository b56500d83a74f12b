//! `TourneyClient`: one handle wiring storage, transport, session and
//! resources together.

use std::sync::Arc;

use tourney_resources::{MatchClient, PlayerClient, TournamentClient};
use tourney_session::SessionController;
use tourney_transport::{ApiClient, CredentialStore, FileCredentialStore, RequestError};

use crate::{ClientConfig, TourneyError};

/// Everything a front end needs to talk to the tournament API.
///
/// All parts share one [`ApiClient`] and one credential store, so a login
/// through [`session()`](Self::session) is seen by the next call through
/// [`tournaments()`](Self::tournaments).
///
/// ```rust,no_run
/// # async fn run() -> Result<(), tourney::TourneyError> {
/// use tourney::prelude::*;
///
/// let client = TourneyClient::connect(ClientConfig::from_env()?).await?;
/// client.session().login("ann@example.com", "secret").await?;
/// for t in client.tournaments().get_all().await? {
///     println!("{} ({})", t.name, t.status);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TourneyClient {
    config: ClientConfig,
    session: Arc<SessionController>,
    tournaments: TournamentClient,
    players: PlayerClient,
    matches: MatchClient,
}

impl TourneyClient {
    /// Connects with the token kept under `config.data_dir`, then
    /// validates any persisted token before returning.
    ///
    /// # Errors
    /// [`TourneyError::Config`] for an unusable config. Network trouble
    /// during validation is not an error here: the session just starts
    /// anonymous.
    pub async fn connect(config: ClientConfig) -> Result<Self, TourneyError> {
        config.validate()?;
        let store = FileCredentialStore::new(&config.data_dir, &config.credential_key);
        tracing::debug!(path = %store.path().display(), "using file credential store");
        Self::with_store(config, Arc::new(store)).await
    }

    /// Connects with a caller-supplied credential store.
    pub async fn with_store(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, TourneyError> {
        config.validate()?;

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(RequestError::from)?;
        let api = ApiClient::with_http(http, config.base_url.clone(), store);

        let session = Arc::new(SessionController::new(api.clone()));
        session.start().await;
        tracing::info!(
            base_url = %config.base_url,
            authenticated = session.snapshot().is_authenticated(),
            "client ready"
        );

        Ok(Self {
            tournaments: TournamentClient::new(api.clone()),
            players: PlayerClient::new(api.clone()),
            matches: MatchClient::new(api),
            session,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session controller. Clone the `Arc` to hand it to a UI task.
    pub fn session(&self) -> &Arc<SessionController> {
        &self.session
    }

    pub fn tournaments(&self) -> &TournamentClient {
        &self.tournaments
    }

    pub fn players(&self) -> &PlayerClient {
        &self.players
    }

    pub fn matches(&self) -> &MatchClient {
        &self.matches
    }
}
