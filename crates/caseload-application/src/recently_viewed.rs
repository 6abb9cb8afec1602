//! Recently viewed students, kept in the local store.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use caseload_core::Result;
use caseload_core::state::{
    LocalStore, MAX_RECENTLY_VIEWED, RECENTLY_VIEWED_KEY, RecentlyViewedStudent,
};
use caseload_core::student::StudentSummary;

/// Most-recent-first list of at most [`MAX_RECENTLY_VIEWED`] students.
#[derive(Clone)]
pub struct RecentlyViewedService {
    store: Arc<dyn LocalStore>,
}

impl RecentlyViewedService {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// The stored list. Unreadable data is logged and treated as empty.
    pub async fn list(&self) -> Result<Vec<RecentlyViewedStudent>> {
        let Some(raw) = self.store.get(RECENTLY_VIEWED_KEY).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<RecentlyViewedStudent>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(MAX_RECENTLY_VIEWED);
                Ok(entries)
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable recently viewed list: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Records a visit to a student page.
    pub async fn record(&self, student: StudentSummary) -> Result<Vec<RecentlyViewedStudent>> {
        self.record_at(student, Utc::now()).await
    }

    pub async fn record_at(
        &self,
        student: StudentSummary,
        viewed_at: DateTime<Utc>,
    ) -> Result<Vec<RecentlyViewedStudent>> {
        let mut entries = self.list().await?;
        entries.retain(|entry| entry.student.id != student.id);
        entries.insert(0, RecentlyViewedStudent { student, viewed_at });
        entries.truncate(MAX_RECENTLY_VIEWED);

        self.store
            .set(RECENTLY_VIEWED_KEY, serde_json::to_string(&entries)?)
            .await?;
        Ok(entries)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(RECENTLY_VIEWED_KEY).await
    }
}
