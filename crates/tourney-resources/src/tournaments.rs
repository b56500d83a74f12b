use tourney_protocol::{Tournament, TournamentId, TournamentInput};
use tourney_transport::{ApiClient, RequestError};

/// CRUD for `/tournaments`.
#[derive(Debug, Clone)]
pub struct TournamentClient {
    api: ApiClient,
}

impl TournamentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every tournament the server lists.
    pub async fn get_all(&self) -> Result<Vec<Tournament>, RequestError> {
        crate::get_data(&self.api, "tournaments", "fetch tournaments").await
    }

    pub async fn get_by_id(&self, id: TournamentId) -> Result<Tournament, RequestError> {
        let path = format!("tournaments/{}", id.0);
        crate::get_data(&self.api, &path, "fetch tournament").await
    }

    /// Creates a tournament and returns it as stored, with its new id.
    pub async fn create(&self, input: &TournamentInput) -> Result<Tournament, RequestError> {
        crate::post_data(&self.api, "tournaments", input, "create tournament").await
    }

    /// Replaces the tournament's editable fields with `input`.
    pub async fn update(
        &self,
        id: TournamentId,
        input: &TournamentInput,
    ) -> Result<Tournament, RequestError> {
        let path = format!("tournaments/{}", id.0);
        crate::put_data(&self.api, &path, input, "update tournament").await
    }

    pub async fn delete(&self, id: TournamentId) -> Result<(), RequestError> {
        let path = format!("tournaments/{}", id.0);
        crate::delete(&self.api, &path, "delete tournament").await
    }
}
