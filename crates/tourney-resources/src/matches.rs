use tourney_protocol::{Match, MatchId, MatchInput, ScoreInput, TournamentId};
use tourney_transport::{ApiClient, RequestError};

/// CRUD for `/matches`, plus score submission.
#[derive(Debug, Clone)]
pub struct MatchClient {
    api: ApiClient,
}

impl MatchClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every match on the server, across all tournaments.
    pub async fn get_all(&self) -> Result<Vec<Match>, RequestError> {
        crate::get_data(&self.api, "matches", "fetch matches").await
    }

    /// Matches belonging to one tournament.
    ///
    /// The API has no per-tournament match listing, so this fetches
    /// everything and filters locally.
    pub async fn get_for_tournament(
        &self,
        tournament: TournamentId,
    ) -> Result<Vec<Match>, RequestError> {
        let mut matches = self.get_all().await?;
        matches.retain(|m| m.tournament_id == tournament);
        Ok(matches)
    }

    pub async fn get_by_id(&self, id: MatchId) -> Result<Match, RequestError> {
        crate::get_data(&self.api, &format!("matches/{}", id.0), "fetch match").await
    }

    pub async fn create(&self, input: &MatchInput) -> Result<Match, RequestError> {
        crate::post_data(&self.api, "matches", input, "create match").await
    }

    pub async fn update(&self, id: MatchId, input: &MatchInput) -> Result<Match, RequestError> {
        let path = format!("matches/{}", id.0);
        crate::put_data(&self.api, &path, input, "update match").await
    }

    pub async fn delete(&self, id: MatchId) -> Result<(), RequestError> {
        crate::delete(&self.api, &format!("matches/{}", id.0), "delete match").await
    }

    /// Records the first result for a match. Returns the updated match.
    pub async fn add_score(&self, id: MatchId, score: &ScoreInput) -> Result<Match, RequestError> {
        let path = format!("matches/{}/scores", id.0);
        crate::post_data(&self.api, &path, score, "add score").await
    }

    /// Corrects a previously recorded result.
    pub async fn update_score(
        &self,
        id: MatchId,
        score: &ScoreInput,
    ) -> Result<Match, RequestError> {
        let path = format!("matches/{}/scores", id.0);
        crate::put_data(&self.api, &path, score, "update score").await
    }
}
