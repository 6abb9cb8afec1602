use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::therapist::{Therapist, TherapistClient, TherapistUpdate};
use caseload_core::{Result, Validate};

use super::invalidation;
use crate::auth::AuthContext;
use crate::query::{Query, QueryClient};

#[derive(Clone)]
pub struct TherapistQueries {
    client: QueryClient,
    auth: AuthContext,
    adapter: Arc<dyn TherapistClient>,
}

impl TherapistQueries {
    pub fn new(
        client: QueryClient,
        auth: AuthContext,
        adapter: Arc<dyn TherapistClient>,
    ) -> Self {
        Self {
            client,
            auth,
            adapter,
        }
    }

    /// Profile of the signed-in therapist.
    pub fn profile(&self) -> Query<Option<Therapist>> {
        let Some(therapist_id) = self.auth.therapist_id() else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::therapist(&therapist_id), move || {
            let adapter = adapter.clone();
            let therapist_id = therapist_id.clone();
            async move { adapter.get_therapist(&therapist_id).await }
        })
    }

    pub async fn update_profile(&self, update: &TherapistUpdate) -> Result<Therapist> {
        let identity = self.auth.require()?;
        update.validate()?;
        let therapist_id = identity.therapist_id();
        self.client
            .mutate(
                "update therapist",
                self.adapter.update_therapist(therapist_id, update),
                |_| invalidation::therapist_updated(therapist_id),
            )
            .await
    }
}
