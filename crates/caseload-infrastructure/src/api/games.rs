use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::game::{
    GameContent, GameContentClient, GameContentFilter, GameResult, GameResultClient,
    GameResultFilter, NewGameResult,
};

use super::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpGameClient {
    api: ApiClient,
}

impl HttpGameClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl GameContentClient for HttpGameClient {
    async fn list_game_content(&self, filter: &GameContentFilter) -> Result<Vec<GameContent>> {
        self.api
            .get(&["game-content"], &filter.query_pairs())
            .await
    }
}

#[async_trait]
impl GameResultClient for HttpGameClient {
    async fn list_game_results(&self, filter: &GameResultFilter) -> Result<Vec<GameResult>> {
        self.api
            .get(&["game-results"], &filter.query_pairs())
            .await
    }

    async fn create_game_result(&self, result: &NewGameResult) -> Result<GameResult> {
        self.api.post(&["game-results"], result).await
    }
}
