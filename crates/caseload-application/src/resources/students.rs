use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::session::TherapySession;
use caseload_core::student::{
    AttendanceRecord, DateRange, NewStudent, Student, StudentClient, StudentUpdate,
};
use caseload_core::{Result, Validate};

use super::{invalidation, non_blank};
use crate::auth::AuthContext;
use crate::query::{Query, QueryClient};

/// Reads and writes for students.
#[derive(Clone)]
pub struct StudentQueries {
    client: QueryClient,
    auth: AuthContext,
    adapter: Arc<dyn StudentClient>,
}

impl StudentQueries {
    pub fn new(client: QueryClient, auth: AuthContext, adapter: Arc<dyn StudentClient>) -> Self {
        Self {
            client,
            auth,
            adapter,
        }
    }

    /// The signed-in therapist's caseload. Disabled while signed out.
    pub fn list(&self) -> Query<Vec<Student>> {
        let Some(therapist_id) = self.auth.therapist_id() else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::students(&therapist_id), move || {
            let adapter = adapter.clone();
            let therapist_id = therapist_id.clone();
            async move { adapter.list_students(&therapist_id).await }
        })
    }

    pub fn detail(&self, student_id: &str) -> Query<Option<Student>> {
        let Some(student_id) = non_blank(student_id) else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::student(&student_id), move || {
            let adapter = adapter.clone();
            let student_id = student_id.clone();
            async move { adapter.get_student(&student_id).await }
        })
    }

    /// Sessions the student is enrolled in.
    pub fn sessions(&self, student_id: &str) -> Query<Vec<TherapySession>> {
        let Some(student_id) = non_blank(student_id) else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::student_sessions(&student_id), move || {
            let adapter = adapter.clone();
            let student_id = student_id.clone();
            async move { adapter.list_student_sessions(&student_id).await }
        })
    }

    pub fn attendance(&self, student_id: &str, range: DateRange) -> Query<Vec<AttendanceRecord>> {
        let Some(student_id) = non_blank(student_id) else {
            return Query::disabled(&self.client);
        };
        let key = keys::student_attendance(&student_id, range.key_params());
        let adapter = self.adapter.clone();
        Query::new(&self.client, key, move || {
            let adapter = adapter.clone();
            let student_id = student_id.clone();
            async move { adapter.list_attendance(&student_id, &range).await }
        })
    }

    pub async fn create(&self, student: &NewStudent) -> Result<Student> {
        let identity = self.auth.require()?;
        student.validate()?;
        self.client
            .mutate(
                "create student",
                self.adapter
                    .create_student(identity.therapist_id(), student),
                |_| invalidation::student_created(),
            )
            .await
    }

    pub async fn update(&self, student_id: &str, update: &StudentUpdate) -> Result<Student> {
        update.validate()?;
        self.client
            .mutate(
                "update student",
                self.adapter.update_student(student_id, update),
                |_| invalidation::student_updated(student_id),
            )
            .await
    }

    pub async fn delete(&self, student_id: &str) -> Result<()> {
        self.client
            .mutate(
                "delete student",
                self.adapter.delete_student(student_id),
                |_| invalidation::student_deleted(student_id),
            )
            .await
    }
}
