//! Newsletter signup and backend health.

use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::health::{HealthClient, HealthStatus};
use caseload_core::newsletter::{NewsletterClient, NewsletterSubscription};
use caseload_core::{Result, Validate};

use crate::query::{Query, QueryClient};

#[derive(Clone)]
pub struct NewsletterService {
    client: QueryClient,
    adapter: Arc<dyn NewsletterClient>,
}

impl NewsletterService {
    pub fn new(client: QueryClient, adapter: Arc<dyn NewsletterClient>) -> Self {
        Self { client, adapter }
    }

    /// Subscribes an address. No cached read depends on it.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        let subscription = NewsletterSubscription {
            email: email.trim().to_string(),
        };
        subscription.validate()?;
        self.client
            .mutate(
                "newsletter subscribe",
                self.adapter.subscribe(&subscription),
                |_| Vec::new(),
            )
            .await
    }
}

#[derive(Clone)]
pub struct HealthQueries {
    client: QueryClient,
    adapter: Arc<dyn HealthClient>,
}

impl HealthQueries {
    pub fn new(client: QueryClient, adapter: Arc<dyn HealthClient>) -> Self {
        Self { client, adapter }
    }

    /// Backend status. Never gated on identity.
    pub fn status(&self) -> Query<HealthStatus> {
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::health(), move || {
            let adapter = adapter.clone();
            async move { adapter.check().await }
        })
    }
}
