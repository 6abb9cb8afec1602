//! Therapist resource adapter trait.

use async_trait::async_trait;

use super::model::{Therapist, TherapistUpdate};
use crate::error::Result;

#[async_trait]
pub trait TherapistClient: Send + Sync {
    async fn get_therapist(&self, therapist_id: &str) -> Result<Option<Therapist>>;

    async fn update_therapist(
        &self,
        therapist_id: &str,
        update: &TherapistUpdate,
    ) -> Result<Therapist>;
}
