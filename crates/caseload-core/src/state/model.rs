//! Client-local state models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::student::StudentSummary;

/// Storage key of the recently viewed list.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewedStudents";

/// Storage key of the onboarding answers.
pub const ONBOARDING_KEY: &str = "onboardingData";

/// Bound of the recently viewed list.
pub const MAX_RECENTLY_VIEWED: usize = 3;

/// One entry of the recently viewed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyViewedStudent {
    #[serde(flatten)]
    pub student: StudentSummary,
    pub viewed_at: DateTime<Utc>,
}

/// Answers collected during signup, kept until the first dashboard visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caseload_size: Option<u32>,
    #[serde(default)]
    pub grades_served: Vec<u8>,
}
