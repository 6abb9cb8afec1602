//! Signup answers carried to the first dashboard visit.

use std::sync::Arc;

use caseload_core::Result;
use caseload_core::state::{LocalStore, ONBOARDING_KEY, OnboardingData};

#[derive(Clone)]
pub struct OnboardingService {
    store: Arc<dyn LocalStore>,
}

impl OnboardingService {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, data: &OnboardingData) -> Result<()> {
        self.store
            .set(ONBOARDING_KEY, serde_json::to_string(data)?)
            .await
    }

    /// Stored answers. Unreadable data is logged and treated as absent.
    pub async fn load(&self) -> Result<Option<OnboardingData>> {
        let Some(raw) = self.store.get(ONBOARDING_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable onboarding data: {}", e);
                Ok(None)
            }
        }
    }

    /// Hands back the answers once and removes them.
    pub async fn on_dashboard_visit(&self) -> Result<Option<OnboardingData>> {
        let data = self.load().await?;
        self.store.remove(ONBOARDING_KEY).await?;
        if data.is_some() {
            tracing::debug!("Onboarding data consumed");
        }
        Ok(data)
    }
}
