use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::theme::{NewTheme, Theme, ThemeClient, ThemeUpdate};
use caseload_core::{Result, Validate};

use super::{invalidation, non_blank};
use crate::query::{Query, QueryClient};

/// Curriculum themes. Not therapist scoped.
#[derive(Clone)]
pub struct ThemeQueries {
    client: QueryClient,
    adapter: Arc<dyn ThemeClient>,
}

impl ThemeQueries {
    pub fn new(client: QueryClient, adapter: Arc<dyn ThemeClient>) -> Self {
        Self { client, adapter }
    }

    pub fn list(&self) -> Query<Vec<Theme>> {
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::themes(), move || {
            let adapter = adapter.clone();
            async move { adapter.list_themes().await }
        })
    }

    pub fn detail(&self, theme_id: &str) -> Query<Option<Theme>> {
        let Some(theme_id) = non_blank(theme_id) else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::theme(&theme_id), move || {
            let adapter = adapter.clone();
            let theme_id = theme_id.clone();
            async move { adapter.get_theme(&theme_id).await }
        })
    }

    pub async fn create(&self, theme: &NewTheme) -> Result<Theme> {
        theme.validate()?;
        self.client
            .mutate("create theme", self.adapter.create_theme(theme), |_| {
                invalidation::theme_changed()
            })
            .await
    }

    pub async fn update(&self, theme_id: &str, update: &ThemeUpdate) -> Result<Theme> {
        update.validate()?;
        self.client
            .mutate(
                "update theme",
                self.adapter.update_theme(theme_id, update),
                |_| invalidation::theme_changed(),
            )
            .await
    }

    pub async fn delete(&self, theme_id: &str) -> Result<()> {
        self.client
            .mutate("delete theme", self.adapter.delete_theme(theme_id), |_| {
                invalidation::theme_deleted()
            })
            .await
    }
}
