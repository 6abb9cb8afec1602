//! Backend health check.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validate::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.to_ascii_lowercase().as_str(), "ok" | "healthy")
    }
}

impl Validate for HealthStatus {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
pub trait HealthClient: Send + Sync {
    async fn check(&self) -> Result<HealthStatus>;
}
