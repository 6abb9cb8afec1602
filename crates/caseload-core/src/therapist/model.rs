//! Therapist domain models.

use serde::{Deserialize, Serialize};

use crate::error::{CaseloadError, Result};
use crate::validate::Validate;

/// Profile of a therapist account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Therapist {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub school_id: Option<String>,
    #[serde(default)]
    pub district_id: Option<String>,
}

impl Therapist {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Validate for Therapist {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CaseloadError::validation("therapist is missing an id"));
        }
        Ok(())
    }
}

/// Partial update of the therapist profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<String>,
}

impl Validate for TherapistUpdate {
    fn validate(&self) -> Result<()> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.first_name) || blank(&self.last_name) {
            return Err(CaseloadError::validation("name fields cannot be blank"));
        }
        Ok(())
    }
}
