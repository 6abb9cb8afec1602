//! Student resource adapter trait.

use async_trait::async_trait;

use super::model::{AttendanceRecord, DateRange, NewStudent, Student, StudentUpdate};
use crate::error::Result;
use crate::session::TherapySession;

/// Adapter for the students resource of the backend.
///
/// Implementations return closed, validated shapes and report failures with
/// a human-readable message.
#[async_trait]
pub trait StudentClient: Send + Sync {
    /// Lists every student on a therapist's caseload.
    async fn list_students(&self, therapist_id: &str) -> Result<Vec<Student>>;

    /// Fetches one student.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Student))`: Student found
    /// - `Ok(None)`: No student with this id
    /// - `Err(_)`: Transport or validation failure
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    async fn create_student(&self, therapist_id: &str, student: &NewStudent) -> Result<Student>;

    async fn update_student(&self, student_id: &str, update: &StudentUpdate) -> Result<Student>;

    /// Deletes a student. Deleting an unknown id is not an error.
    async fn delete_student(&self, student_id: &str) -> Result<()>;

    /// Lists the sessions a student is enrolled in.
    async fn list_student_sessions(&self, student_id: &str) -> Result<Vec<TherapySession>>;

    /// Lists attendance rows inside an inclusive date range.
    async fn list_attendance(
        &self,
        student_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AttendanceRecord>>;
}
