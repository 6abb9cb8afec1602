use std::sync::Arc;

use caseload_core::cache_key::keys;
use caseload_core::session::{
    AddStudentToSessions, NewSession, SessionClient, SessionListParams, SessionStudent,
    SessionStudentUpdate, SessionUpdate, TherapySession,
};
use caseload_core::{Result, Validate};

use super::{invalidation, non_blank};
use crate::auth::AuthContext;
use crate::query::{Query, QueryClient};

/// Reads and writes for therapy sessions and their rosters.
#[derive(Clone)]
pub struct SessionQueries {
    client: QueryClient,
    auth: AuthContext,
    adapter: Arc<dyn SessionClient>,
}

impl SessionQueries {
    pub fn new(client: QueryClient, auth: AuthContext, adapter: Arc<dyn SessionClient>) -> Self {
        Self {
            client,
            auth,
            adapter,
        }
    }

    /// Sessions of the signed-in therapist matching `params`.
    pub fn list(&self, params: SessionListParams) -> Query<Vec<TherapySession>> {
        let Some(therapist_id) = self.auth.therapist_id() else {
            return Query::disabled(&self.client);
        };
        let key = keys::sessions(&therapist_id, params.key_params());
        let adapter = self.adapter.clone();
        Query::new(&self.client, key, move || {
            let adapter = adapter.clone();
            let therapist_id = therapist_id.clone();
            async move { adapter.list_sessions(&therapist_id, &params).await }
        })
    }

    pub fn detail(&self, session_id: &str) -> Query<Option<TherapySession>> {
        let Some(session_id) = non_blank(session_id) else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::session(&session_id), move || {
            let adapter = adapter.clone();
            let session_id = session_id.clone();
            async move { adapter.get_session(&session_id).await }
        })
    }

    /// Students enrolled in a session.
    pub fn roster(&self, session_id: &str) -> Query<Vec<SessionStudent>> {
        let Some(session_id) = non_blank(session_id) else {
            return Query::disabled(&self.client);
        };
        let adapter = self.adapter.clone();
        Query::new(&self.client, keys::session_students(&session_id), move || {
            let adapter = adapter.clone();
            let session_id = session_id.clone();
            async move { adapter.list_session_students(&session_id).await }
        })
    }

    pub async fn create(&self, session: &NewSession) -> Result<TherapySession> {
        let identity = self.auth.require()?;
        session.validate()?;
        self.client
            .mutate(
                "create session",
                self.adapter
                    .create_session(identity.therapist_id(), session),
                |_| invalidation::session_created(),
            )
            .await
    }

    pub async fn update(&self, session_id: &str, update: &SessionUpdate) -> Result<TherapySession> {
        update.validate()?;
        self.client
            .mutate(
                "update session",
                self.adapter.update_session(session_id, update),
                |_| invalidation::session_updated(session_id),
            )
            .await
    }

    pub async fn delete(&self, session_id: &str) -> Result<()> {
        self.client
            .mutate(
                "delete session",
                self.adapter.delete_session(session_id),
                |_| invalidation::session_deleted(session_id),
            )
            .await
    }

    /// Enrols one student in every listed session.
    pub async fn add_student_to_sessions(&self, request: &AddStudentToSessions) -> Result<()> {
        request.validate()?;
        self.client
            .mutate(
                "add student to sessions",
                self.adapter.add_student_to_sessions(request),
                |_| invalidation::students_enrolled(&request.student_id, &request.session_ids),
            )
            .await
    }

    pub async fn remove_student(&self, session_id: &str, student_id: &str) -> Result<()> {
        self.client
            .mutate(
                "remove student from session",
                self.adapter
                    .remove_student_from_session(session_id, student_id),
                |_| invalidation::session_student_changed(session_id, student_id),
            )
            .await
    }

    /// Records attendance, rating or notes for one student in one session.
    pub async fn update_session_student(
        &self,
        session_id: &str,
        student_id: &str,
        update: &SessionStudentUpdate,
    ) -> Result<SessionStudent> {
        update.validate()?;
        self.client
            .mutate(
                "update session student",
                self.adapter
                    .update_session_student(session_id, student_id, update),
                |_| invalidation::session_student_changed(session_id, student_id),
            )
            .await
    }
}
