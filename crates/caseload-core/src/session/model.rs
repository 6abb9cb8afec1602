//! Session domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::cache_key::KeyParams;
use crate::error::{CaseloadError, Result};
use crate::student::{AttendanceStatus, StudentSummary};
use crate::util::dates::API_DATETIME_FORMAT;
use crate::validate::Validate;

/// Highest rating a therapist can give a student for one session.
pub const MAX_RATING: u8 = 5;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// A scheduled therapy session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: String,
    pub therapist_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Id of the session this one was generated from (recurring series).
    #[serde(default)]
    pub parent_session_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    /// Roster summaries embedded by the backend in list payloads.
    #[serde(default)]
    pub students: Vec<StudentSummary>,
}

impl TherapySession {
    /// Title shown on calendars: the session name, or the roster names.
    pub fn title(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ if !self.students.is_empty() => self
                .students
                .iter()
                .map(|s| s.first_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => "Session".to_string(),
        }
    }
}

impl Validate for TherapySession {
    fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(CaseloadError::validation(format!(
                "session {} ends before it starts",
                self.id
            )));
        }
        self.students.validate()
    }
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdate: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enddate: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SessionListParams {
    pub fn window(startdate: NaiveDateTime, enddate: NaiveDateTime) -> Self {
        Self {
            startdate: Some(startdate),
            enddate: Some(enddate),
            limit: None,
        }
    }

    pub fn key_params(&self) -> KeyParams {
        KeyParams::new()
            .with(
                "startdate",
                self.startdate
                    .map(|d| d.format(API_DATETIME_FORMAT).to_string()),
            )
            .with(
                "enddate",
                self.enddate.map(|d| d.format(API_DATETIME_FORMAT).to_string()),
            )
            .with("limit", self.limit)
    }

    /// Query string pairs in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.startdate {
            pairs.push(("startdate", start.format(API_DATETIME_FORMAT).to_string()));
        }
        if let Some(end) = self.enddate {
            pairs.push(("enddate", end.format(API_DATETIME_FORMAT).to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Payload for scheduling a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_session_id: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<String>,
}

impl Validate for NewSession {
    fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(CaseloadError::validation(
                "session end must be after its start",
            ));
        }
        Ok(())
    }
}

/// Partial update for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
}

impl Validate for SessionUpdate {
    fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && end <= start
        {
            return Err(CaseloadError::validation(
                "session end must be after its start",
            ));
        }
        Ok(())
    }
}

/// A student's membership in one session, with the per-session annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStudent {
    pub session_id: String,
    pub student: StudentSummary,
    #[serde(default)]
    pub attendance: AttendanceStatus,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for SessionStudent {
    fn validate(&self) -> Result<()> {
        validate_rating(self.rating)?;
        self.student.validate()
    }
}

/// Enrols one student in several sessions at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStudentToSessions {
    pub student_id: String,
    pub session_ids: Vec<String>,
}

impl Validate for AddStudentToSessions {
    fn validate(&self) -> Result<()> {
        if self.student_id.trim().is_empty() {
            return Err(CaseloadError::validation("student id is required"));
        }
        if self.session_ids.is_empty() {
            return Err(CaseloadError::validation("at least one session is required"));
        }
        Ok(())
    }
}

/// Attendance, rating and notes recorded while rating a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStudentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for SessionStudentUpdate {
    fn validate(&self) -> Result<()> {
        validate_rating(self.rating)
    }
}

fn validate_rating(rating: Option<u8>) -> Result<()> {
    match rating {
        Some(r) if r == 0 || r > MAX_RATING => Err(CaseloadError::validation(format!(
            "rating must be between 1 and {}",
            MAX_RATING
        ))),
        _ => Ok(()),
    }
}
