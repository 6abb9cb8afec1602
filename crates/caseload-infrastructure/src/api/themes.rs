use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::theme::{NewTheme, Theme, ThemeClient, ThemeUpdate};

use super::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpThemeClient {
    api: ApiClient,
}

impl HttpThemeClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ThemeClient for HttpThemeClient {
    async fn list_themes(&self) -> Result<Vec<Theme>> {
        self.api.get(&["themes"], &[]).await
    }

    async fn get_theme(&self, theme_id: &str) -> Result<Option<Theme>> {
        self.api.get_optional(&["themes", theme_id]).await
    }

    async fn create_theme(&self, theme: &NewTheme) -> Result<Theme> {
        self.api.post(&["themes"], theme).await
    }

    async fn update_theme(&self, theme_id: &str, update: &ThemeUpdate) -> Result<Theme> {
        self.api.patch(&["themes", theme_id], update).await
    }

    async fn delete_theme(&self, theme_id: &str) -> Result<()> {
        self.api.delete(&["themes", theme_id]).await
    }
}
