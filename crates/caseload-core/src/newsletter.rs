//! Newsletter signup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CaseloadError, Result};
use crate::validate::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: String,
}

impl Validate for NewsletterSubscription {
    fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(CaseloadError::validation(format!(
                "'{}' is not a valid email address",
                email
            ))),
        }
    }
}

#[async_trait]
pub trait NewsletterClient: Send + Sync {
    async fn subscribe(&self, subscription: &NewsletterSubscription) -> Result<()>;
}
