//! Student domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::cache_key::KeyParams;
use crate::error::{CaseloadError, Result};
use crate::util::grade::MAX_GRADE;
use crate::validate::Validate;

/// A student on a therapist's caseload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub therapist_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Storage grade, 0 (kindergarten) to 12.
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub school_id: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lightweight projection used by rosters and the recently viewed list.
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            grade: self.grade,
        }
    }
}

impl Validate for Student {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CaseloadError::validation("student is missing an id"));
        }
        validate_grade(self.grade)
    }
}

/// The part of a student embedded in other payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grade: Option<u8>,
}

impl StudentSummary {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Validate for StudentSummary {
    fn validate(&self) -> Result<()> {
        validate_grade(self.grade)
    }
}

/// Payload for creating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CaseloadError::validation("first and last name are required"));
        }
        validate_grade(self.grade)
    }
}

/// Partial update for a student. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for StudentUpdate {
    fn validate(&self) -> Result<()> {
        validate_grade(self.grade)
    }
}

/// Attendance outcome of one student in one session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
    #[default]
    Unmarked,
}

/// One attendance row for a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub session_id: String,
    pub student_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: AttendanceStatus,
}

impl Validate for AttendanceRecord {
    fn validate(&self) -> Result<()> {
        if self.session_id.trim().is_empty() || self.student_id.trim().is_empty() {
            return Err(CaseloadError::validation(
                "attendance record is missing a session or student id",
            ));
        }
        Ok(())
    }
}

/// Inclusive date filter used by attendance reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Self {
        Self { date_from, date_to }
    }

    pub fn key_params(&self) -> KeyParams {
        KeyParams::new()
            .with("date_from", self.date_from)
            .with("date_to", self.date_to)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.date_from {
            pairs.push(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

fn validate_grade(grade: Option<u8>) -> Result<()> {
    match grade {
        Some(g) if g > MAX_GRADE => Err(CaseloadError::validation(format!(
            "grade {} is outside K-{}",
            g, MAX_GRADE
        ))),
        _ => Ok(()),
    }
}
