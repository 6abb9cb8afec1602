//! Session resource adapter trait.

use async_trait::async_trait;

use super::model::{
    AddStudentToSessions, NewSession, SessionListParams, SessionStudent, SessionStudentUpdate,
    SessionUpdate, TherapySession,
};
use crate::error::Result;

/// Adapter for the sessions resource, including session rosters.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Lists a therapist's sessions, optionally restricted to a time window.
    async fn list_sessions(
        &self,
        therapist_id: &str,
        params: &SessionListParams,
    ) -> Result<Vec<TherapySession>>;

    async fn get_session(&self, session_id: &str) -> Result<Option<TherapySession>>;

    async fn create_session(
        &self,
        therapist_id: &str,
        session: &NewSession,
    ) -> Result<TherapySession>;

    async fn update_session(
        &self,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<TherapySession>;

    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Lists the roster of a session with per-student annotations.
    async fn list_session_students(&self, session_id: &str) -> Result<Vec<SessionStudent>>;

    /// Enrols one student in every listed session.
    async fn add_student_to_sessions(&self, request: &AddStudentToSessions) -> Result<()>;

    async fn remove_student_from_session(&self, session_id: &str, student_id: &str)
    -> Result<()>;

    /// Records attendance, rating or notes for one student in one session.
    async fn update_session_student(
        &self,
        session_id: &str,
        student_id: &str,
        update: &SessionStudentUpdate,
    ) -> Result<SessionStudent>;
}
