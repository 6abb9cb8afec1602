//! Game content and game result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::cache_key::KeyParams;
use crate::error::{CaseloadError, Result};
use crate::validate::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameKind {
    MemoryMatch,
    DragAndDrop,
    Flashcards,
}

/// One picture/word used by a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A content pack for one game, usually tied to a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContent {
    pub id: String,
    pub game: GameKind,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<GameItem>,
}

impl Validate for GameContent {
    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(CaseloadError::validation(format!(
                    "game content {} repeats item {}",
                    self.id, item.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContentFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<GameKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl GameContentFilter {
    pub fn key_params(&self) -> KeyParams {
        KeyParams::new()
            .with("game", self.game)
            .with("theme_id", self.theme_id.as_deref())
            .with("category", self.category.as_deref())
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(game) = self.game {
            pairs.push(("game", game.to_string()));
        }
        if let Some(theme_id) = &self.theme_id {
            pairs.push(("theme_id", theme_id.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }
}

/// A finished game played by a student during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub id: String,
    pub session_id: String,
    pub student_id: String,
    pub game: GameKind,
    pub score: u32,
    pub attempts: u32,
    pub duration_secs: u32,
    pub completed_at: DateTime<Utc>,
}

impl Validate for GameResult {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResult {
    pub session_id: String,
    pub student_id: String,
    pub game: GameKind,
    pub score: u32,
    pub attempts: u32,
    pub duration_secs: u32,
}

impl Validate for NewGameResult {
    fn validate(&self) -> Result<()> {
        if self.session_id.trim().is_empty() || self.student_id.trim().is_empty() {
            return Err(CaseloadError::validation(
                "a game result needs both a session and a student",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl GameResultFilter {
    pub fn key_params(&self) -> KeyParams {
        KeyParams::new()
            .with("session_id", self.session_id.as_deref())
            .with("student_id", self.student_id.as_deref())
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(session_id) = &self.session_id {
            pairs.push(("session_id", session_id.clone()));
        }
        if let Some(student_id) = &self.student_id {
            pairs.push(("student_id", student_id.clone()));
        }
        pairs
    }
}
