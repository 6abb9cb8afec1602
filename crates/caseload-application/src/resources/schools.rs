use std::sync::Arc;

use caseload_core::KeyParams;
use caseload_core::cache_key::keys;
use caseload_core::school::{District, DistrictClient, School, SchoolClient};

use crate::query::{Query, QueryClient};

/// School and district directories used during signup and profile edits.
#[derive(Clone)]
pub struct SchoolQueries {
    client: QueryClient,
    schools: Arc<dyn SchoolClient>,
    districts: Arc<dyn DistrictClient>,
}

impl SchoolQueries {
    pub fn new(
        client: QueryClient,
        schools: Arc<dyn SchoolClient>,
        districts: Arc<dyn DistrictClient>,
    ) -> Self {
        Self {
            client,
            schools,
            districts,
        }
    }

    /// Schools, optionally restricted to one district.
    pub fn schools(&self, district_id: Option<&str>) -> Query<Vec<School>> {
        let district_id = district_id
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string);
        let key = keys::schools(KeyParams::new().with("district_id", district_id.as_deref()));
        let adapter = self.schools.clone();
        Query::new(&self.client, key, move || {
            let adapter = adapter.clone();
            let district_id = district_id.clone();
            async move { adapter.list_schools(district_id.as_deref()).await }
        })
    }

    pub fn districts(&self) -> Query<Vec<District>> {
        let adapter = self.districts.clone();
        Query::new(&self.client, keys::districts(), move || {
            let adapter = adapter.clone();
            async move { adapter.list_districts().await }
        })
    }
}
