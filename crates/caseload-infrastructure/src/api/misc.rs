//! Newsletter and health endpoints.

use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::health::{HealthClient, HealthStatus};
use caseload_core::newsletter::{NewsletterClient, NewsletterSubscription};

use super::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpNewsletterClient {
    api: ApiClient,
}

impl HttpNewsletterClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NewsletterClient for HttpNewsletterClient {
    async fn subscribe(&self, subscription: &NewsletterSubscription) -> Result<()> {
        self.api
            .post_unit(&["newsletter", "subscribe"], subscription)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct HttpHealthClient {
    api: ApiClient,
}

impl HttpHealthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HealthClient for HttpHealthClient {
    async fn check(&self) -> Result<HealthStatus> {
        self.api.get(&["health"], &[]).await
    }
}
