//! Tournament rosters.
//!
//! Players only exist inside a tournament, so every call takes the
//! tournament's id and works under `/tournaments/{id}/players`.

use tourney_protocol::{Player, PlayerId, PlayerInput, TournamentId};
use tourney_transport::{ApiClient, RequestError};

#[derive(Debug, Clone)]
pub struct PlayerClient {
    api: ApiClient,
}

impl PlayerClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn roster(tournament: TournamentId) -> String {
        format!("tournaments/{}/players", tournament.0)
    }

    fn entry(tournament: TournamentId, player: PlayerId) -> String {
        format!("tournaments/{}/players/{}", tournament.0, player.0)
    }

    /// The roster of `tournament`.
    pub async fn get_all(&self, tournament: TournamentId) -> Result<Vec<Player>, RequestError> {
        crate::get_data(&self.api, &Self::roster(tournament), "fetch roster").await
    }

    pub async fn get_by_id(
        &self,
        tournament: TournamentId,
        player: PlayerId,
    ) -> Result<Player, RequestError> {
        crate::get_data(&self.api, &Self::entry(tournament, player), "fetch player").await
    }

    /// Adds a player to the roster.
    ///
    /// Fails with a 422 when the roster is full or the name is taken; the
    /// server's message says which.
    pub async fn create(
        &self,
        tournament: TournamentId,
        input: &PlayerInput,
    ) -> Result<Player, RequestError> {
        crate::post_data(&self.api, &Self::roster(tournament), input, "add player").await
    }

    pub async fn update(
        &self,
        tournament: TournamentId,
        player: PlayerId,
        input: &PlayerInput,
    ) -> Result<Player, RequestError> {
        let path = Self::entry(tournament, player);
        crate::put_data(&self.api, &path, input, "update player").await
    }

    /// Removes a player from the roster.
    pub async fn delete(
        &self,
        tournament: TournamentId,
        player: PlayerId,
    ) -> Result<(), RequestError> {
        crate::delete(&self.api, &Self::entry(tournament, player), "remove player").await
    }
}
