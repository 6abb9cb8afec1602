//! School and district adapter traits.

use async_trait::async_trait;

use super::model::{District, School};
use crate::error::Result;

#[async_trait]
pub trait SchoolClient: Send + Sync {
    /// Lists schools, restricted to one district when `district_id` is set.
    async fn list_schools(&self, district_id: Option<&str>) -> Result<Vec<School>>;
}

#[async_trait]
pub trait DistrictClient: Send + Sync {
    async fn list_districts(&self) -> Result<Vec<District>>;
}
