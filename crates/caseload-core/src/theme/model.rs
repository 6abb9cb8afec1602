//! Theme domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CaseloadError, Result};
use crate::validate::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Theme {
    /// True when `date` falls inside the theme's active range.
    ///
    /// Open-ended ranges are active on their open side.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= date)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

impl Validate for Theme {
    fn validate(&self) -> Result<()> {
        validate_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTheme {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Validate for NewTheme {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CaseloadError::validation("theme name is required"));
        }
        validate_range(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Validate for ThemeUpdate {
    fn validate(&self) -> Result<()> {
        validate_range(self.start_date, self.end_date)
    }
}

fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(CaseloadError::validation("theme ends before it starts"));
    }
    Ok(())
}
