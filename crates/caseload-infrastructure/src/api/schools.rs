use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::school::{District, DistrictClient, School, SchoolClient};

use super::client::ApiClient;

#[derive(Debug, Clone)]
pub struct HttpSchoolClient {
    api: ApiClient,
}

impl HttpSchoolClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SchoolClient for HttpSchoolClient {
    async fn list_schools(&self, district_id: Option<&str>) -> Result<Vec<School>> {
        let query: Vec<(&str, String)> = district_id
            .filter(|id| !id.is_empty())
            .map(|id| ("district_id", id.to_string()))
            .into_iter()
            .collect();
        self.api.get(&["schools"], &query).await
    }
}

#[async_trait]
impl DistrictClient for HttpSchoolClient {
    async fn list_districts(&self) -> Result<Vec<District>> {
        self.api.get(&["districts"], &[]).await
    }
}
