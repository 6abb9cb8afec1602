use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::therapist::{Therapist, TherapistClient, TherapistUpdate};

use super::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpTherapistClient {
    api: ApiClient,
}

impl HttpTherapistClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TherapistClient for HttpTherapistClient {
    async fn get_therapist(&self, therapist_id: &str) -> Result<Option<Therapist>> {
        self.api.get_optional(&["therapists", therapist_id]).await
    }

    async fn update_therapist(
        &self,
        therapist_id: &str,
        update: &TherapistUpdate,
    ) -> Result<Therapist> {
        self.api.patch(&["therapists", therapist_id], update).await
    }
}
