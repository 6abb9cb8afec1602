use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::game::{
    GameContent, GameContentClient, GameContentFilter, GameResult, GameResultClient,
    GameResultFilter, NewGameResult,
};
use caseload_core::{Result, Validate};

use super::invalidation;
use crate::query::{Query, QueryClient};

/// Game content and recorded results.
#[derive(Clone)]
pub struct GameQueries {
    client: QueryClient,
    content: Arc<dyn GameContentClient>,
    results: Arc<dyn GameResultClient>,
}

impl GameQueries {
    pub fn new(
        client: QueryClient,
        content: Arc<dyn GameContentClient>,
        results: Arc<dyn GameResultClient>,
    ) -> Self {
        Self {
            client,
            content,
            results,
        }
    }

    pub fn content(&self, filter: GameContentFilter) -> Query<Vec<GameContent>> {
        let key = keys::game_content(filter.key_params());
        let adapter = self.content.clone();
        Query::new(&self.client, key, move || {
            let adapter = adapter.clone();
            let filter = filter.clone();
            async move { adapter.list_game_content(&filter).await }
        })
    }

    pub fn results(&self, filter: GameResultFilter) -> Query<Vec<GameResult>> {
        let key = keys::game_results(filter.key_params());
        let adapter = self.results.clone();
        Query::new(&self.client, key, move || {
            let adapter = adapter.clone();
            let filter = filter.clone();
            async move { adapter.list_game_results(&filter).await }
        })
    }

    pub async fn record_result(&self, result: &NewGameResult) -> Result<GameResult> {
        result.validate()?;
        self.client
            .mutate(
                "record game result",
                self.results.create_game_result(result),
                |_| invalidation::game_result_recorded(),
            )
            .await
    }
}
