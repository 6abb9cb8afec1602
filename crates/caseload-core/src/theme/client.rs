//! Theme resource adapter trait.

use async_trait::async_trait;

use super::model::{NewTheme, Theme, ThemeUpdate};
use crate::error::Result;

#[async_trait]
pub trait ThemeClient: Send + Sync {
    async fn list_themes(&self) -> Result<Vec<Theme>>;

    async fn get_theme(&self, theme_id: &str) -> Result<Option<Theme>>;

    async fn create_theme(&self, theme: &NewTheme) -> Result<Theme>;

    async fn update_theme(&self, theme_id: &str, update: &ThemeUpdate) -> Result<Theme>;

    async fn delete_theme(&self, theme_id: &str) -> Result<()>;
}
