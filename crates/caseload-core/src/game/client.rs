//! Game content and game result adapter traits.

use async_trait::async_trait;

use super::model::{GameContent, GameContentFilter, GameResult, GameResultFilter, NewGameResult};
use crate::error::Result;

#[async_trait]
pub trait GameContentClient: Send + Sync {
    async fn list_game_content(&self, filter: &GameContentFilter) -> Result<Vec<GameContent>>;
}

#[async_trait]
pub trait GameResultClient: Send + Sync {
    async fn list_game_results(&self, filter: &GameResultFilter) -> Result<Vec<GameResult>>;

    async fn create_game_result(&self, result: &NewGameResult) -> Result<GameResult>;
}
