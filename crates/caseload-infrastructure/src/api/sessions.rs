use async_trait::async_trait;

use caseload_core::Result;
use caseload_core::session::{
    AddStudentToSessions, NewSession, SessionClient, SessionListParams, SessionStudent,
    SessionStudentUpdate, SessionUpdate, TherapySession,
};

use super::client::ApiClient;
use super::students::OwnedBy;

#[derive(Debug, Clone)]
pub struct HttpSessionClient {
    api: ApiClient,
}

impl HttpSessionClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SessionClient for HttpSessionClient {
    async fn list_sessions(
        &self,
        therapist_id: &str,
        params: &SessionListParams,
    ) -> Result<Vec<TherapySession>> {
        let mut query = vec![("therapist_id", therapist_id.to_string())];
        query.extend(params.query_pairs());
        self.api.get(&["sessions"], &query).await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<TherapySession>> {
        self.api.get_optional(&["sessions", session_id]).await
    }

    async fn create_session(
        &self,
        therapist_id: &str,
        session: &NewSession,
    ) -> Result<TherapySession> {
        let body = OwnedBy {
            therapist_id,
            body: session,
        };
        self.api.post(&["sessions"], &body).await
    }

    async fn update_session(
        &self,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<TherapySession> {
        self.api.patch(&["sessions", session_id], update).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.api.delete(&["sessions", session_id]).await
    }

    async fn list_session_students(&self, session_id: &str) -> Result<Vec<SessionStudent>> {
        self.api
            .get(&["sessions", session_id, "students"], &[])
            .await
    }

    async fn add_student_to_sessions(&self, request: &AddStudentToSessions) -> Result<()> {
        self.api.post_unit(&["sessions", "students"], request).await
    }

    async fn remove_student_from_session(
        &self,
        session_id: &str,
        student_id: &str,
    ) -> Result<()> {
        self.api
            .delete(&["sessions", session_id, "students", student_id])
            .await
    }

    async fn update_session_student(
        &self,
        session_id: &str,
        student_id: &str,
        update: &SessionStudentUpdate,
    ) -> Result<SessionStudent> {
        self.api
            .patch(&["sessions", session_id, "students", student_id], update)
            .await
    }
}
