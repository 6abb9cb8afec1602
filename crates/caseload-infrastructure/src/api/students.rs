use async_trait::async_trait;
use serde::Serialize;

use caseload_core::Result;
use caseload_core::session::TherapySession;
use caseload_core::student::{
    AttendanceRecord, DateRange, NewStudent, Student, StudentClient, StudentUpdate,
};

use super::client::ApiClient;

/// Create payloads carry the owning therapist next to the record fields.
#[derive(Serialize)]
pub(crate) struct OwnedBy<'a, T: Serialize> {
    pub therapist_id: &'a str,
    #[serde(flatten)]
    pub body: &'a T,
}

#[derive(Debug, Clone)]
pub struct HttpStudentClient {
    api: ApiClient,
}

impl HttpStudentClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StudentClient for HttpStudentClient {
    async fn list_students(&self, therapist_id: &str) -> Result<Vec<Student>> {
        self.api
            .get(&["students"], &[("therapist_id", therapist_id.to_string())])
            .await
    }

    async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        self.api.get_optional(&["students", student_id]).await
    }

    async fn create_student(&self, therapist_id: &str, student: &NewStudent) -> Result<Student> {
        let body = OwnedBy {
            therapist_id,
            body: student,
        };
        self.api.post(&["students"], &body).await
    }

    async fn update_student(&self, student_id: &str, update: &StudentUpdate) -> Result<Student> {
        self.api.patch(&["students", student_id], update).await
    }

    async fn delete_student(&self, student_id: &str) -> Result<()> {
        self.api.delete(&["students", student_id]).await
    }

    async fn list_student_sessions(&self, student_id: &str) -> Result<Vec<TherapySession>> {
        self.api
            .get(&["students", student_id, "sessions"], &[])
            .await
    }

    async fn list_attendance(
        &self,
        student_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AttendanceRecord>> {
        let query: Vec<(&str, String)> = range.query_pairs();
        self.api
            .get(&["students", student_id, "attendance"], &query)
            .await
    }
}
