//! In-memory backend shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use caseload_application::{AppContext, ResourceAdapters};
use caseload_core::auth::{AuthSession, Credentials, IdentityProvider, SignupRequest};
use caseload_core::config::ClientConfig;
use caseload_core::game::{
    GameContent, GameContentClient, GameContentFilter, GameResult, GameResultClient,
    GameResultFilter, NewGameResult,
};
use caseload_core::health::{HealthClient, HealthStatus};
use caseload_core::newsletter::{NewsletterClient, NewsletterSubscription};
use caseload_core::school::{District, DistrictClient, School, SchoolClient};
use caseload_core::session::{
    AddStudentToSessions, NewSession, SessionClient, SessionListParams, SessionStatus,
    SessionStudent, SessionStudentUpdate, SessionUpdate, TherapySession,
};
use caseload_core::student::{
    AttendanceRecord, AttendanceStatus, DateRange, NewStudent, Student, StudentClient,
    StudentUpdate,
};
use caseload_core::theme::{NewTheme, Theme, ThemeClient, ThemeUpdate};
use caseload_core::therapist::{Therapist, TherapistClient, TherapistUpdate};
use caseload_core::{CaseloadError, Result};
use caseload_infrastructure::InMemoryLocalStore;

pub const THERAPIST: &str = "t-1";

#[derive(Default)]
struct State {
    students: Vec<Student>,
    sessions: Vec<TherapySession>,
    /// session id -> enrolled student ids
    rosters: HashMap<String, Vec<String>>,
    themes: Vec<Theme>,
    calls: HashMap<&'static str, usize>,
    failing: Vec<&'static str>,
    last_session_params: Option<SessionListParams>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Counts the call and fails it when `op` was marked failing.
    fn call(&self, op: &'static str) -> Result<()> {
        let mut state = self.state();
        *state.calls.entry(op).or_default() += 1;
        if state.failing.contains(&op) {
            return Err(CaseloadError::api(500, format!("{} is broken", op)));
        }
        Ok(())
    }

    pub fn calls(&self, op: &'static str) -> usize {
        self.state().calls.get(op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state().calls.values().sum()
    }

    pub fn fail(&self, op: &'static str) {
        self.state().failing.push(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.state().failing.retain(|o| *o != op);
    }

    pub fn last_session_params(&self) -> Option<SessionListParams> {
        self.state().last_session_params
    }

    pub fn add_student(&self, id: &str, first_name: &str) {
        self.state().students.push(Student {
            id: id.to_string(),
            therapist_id: THERAPIST.to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            grade: Some(1),
            school_id: None,
            date_of_birth: None,
            notes: None,
            created_at: None,
        });
    }

    pub fn add_session(&self, id: &str, start: NaiveDateTime) {
        let mut state = self.state();
        state.sessions.push(TherapySession {
            id: id.to_string(),
            therapist_id: THERAPIST.to_string(),
            name: Some(format!("Session {}", id)),
            start,
            end: start + chrono::TimeDelta::minutes(30),
            parent_session_id: None,
            location: None,
            notes: None,
            status: SessionStatus::Scheduled,
            students: Vec::new(),
        });
        state.rosters.entry(id.to_string()).or_default();
    }

    fn roster(state: &State, session_id: &str) -> Vec<SessionStudent> {
        state
            .rosters
            .get(session_id)
            .into_iter()
            .flatten()
            .filter_map(|student_id| state.students.iter().find(|s| &s.id == student_id))
            .map(|student| SessionStudent {
                session_id: session_id.to_string(),
                student: student.summary(),
                attendance: AttendanceStatus::Unmarked,
                rating: None,
                notes: None,
            })
            .collect()
    }

    fn session_with_roster(state: &State, session: &TherapySession) -> TherapySession {
        let mut session = session.clone();
        session.students = Self::roster(state, &session.id)
            .into_iter()
            .map(|s| s.student)
            .collect();
        session
    }
}

#[async_trait]
impl StudentClient for FakeBackend {
    async fn list_students(&self, therapist_id: &str) -> Result<Vec<Student>> {
        self.call("list_students")?;
        let state = self.state();
        Ok(state
            .students
            .iter()
            .filter(|s| s.therapist_id == therapist_id)
            .cloned()
            .collect())
    }

    async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        self.call("get_student")?;
        Ok(self.state().students.iter().find(|s| s.id == student_id).cloned())
    }

    async fn create_student(&self, therapist_id: &str, student: &NewStudent) -> Result<Student> {
        self.call("create_student")?;
        let mut state = self.state();
        let created = Student {
            id: format!("stu-{}", state.students.len() + 1),
            therapist_id: therapist_id.to_string(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            grade: student.grade,
            school_id: student.school_id.clone(),
            date_of_birth: student.date_of_birth,
            notes: student.notes.clone(),
            created_at: Some(Utc::now()),
        };
        state.students.push(created.clone());
        Ok(created)
    }

    async fn update_student(&self, student_id: &str, update: &StudentUpdate) -> Result<Student> {
        self.call("update_student")?;
        let mut state = self.state();
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == student_id)
            .ok_or_else(|| CaseloadError::not_found("student", student_id))?;
        if let Some(first_name) = &update.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(grade) = update.grade {
            student.grade = Some(grade);
        }
        Ok(student.clone())
    }

    async fn delete_student(&self, student_id: &str) -> Result<()> {
        self.call("delete_student")?;
        let mut state = self.state();
        state.students.retain(|s| s.id != student_id);
        for roster in state.rosters.values_mut() {
            roster.retain(|id| id != student_id);
        }
        Ok(())
    }

    async fn list_student_sessions(&self, student_id: &str) -> Result<Vec<TherapySession>> {
        self.call("list_student_sessions")?;
        let state = self.state();
        Ok(state
            .sessions
            .iter()
            .filter(|s| {
                state
                    .rosters
                    .get(&s.id)
                    .is_some_and(|r| r.iter().any(|id| id == student_id))
            })
            .map(|s| Self::session_with_roster(&state, s))
            .collect())
    }

    async fn list_attendance(
        &self,
        student_id: &str,
        _range: &DateRange,
    ) -> Result<Vec<AttendanceRecord>> {
        self.call("list_attendance")?;
        let state = self.state();
        Ok(state
            .sessions
            .iter()
            .filter(|s| {
                state
                    .rosters
                    .get(&s.id)
                    .is_some_and(|r| r.iter().any(|id| id == student_id))
            })
            .map(|s| AttendanceRecord {
                session_id: s.id.clone(),
                student_id: student_id.to_string(),
                date: s.start.date(),
                status: AttendanceStatus::Unmarked,
            })
            .collect())
    }
}

#[async_trait]
impl SessionClient for FakeBackend {
    async fn list_sessions(
        &self,
        therapist_id: &str,
        params: &SessionListParams,
    ) -> Result<Vec<TherapySession>> {
        self.call("list_sessions")?;
        let mut state = self.state();
        state.last_session_params = Some(*params);
        let state = &*state;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.therapist_id == therapist_id)
            .filter(|s| params.startdate.is_none_or(|start| s.start >= start))
            .filter(|s| params.enddate.is_none_or(|end| s.start <= end))
            .map(|s| Self::session_with_roster(state, s))
            .collect())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<TherapySession>> {
        self.call("get_session")?;
        let state = self.state();
        Ok(state
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| Self::session_with_roster(&state, s)))
    }

    async fn create_session(
        &self,
        therapist_id: &str,
        session: &NewSession,
    ) -> Result<TherapySession> {
        self.call("create_session")?;
        let mut state = self.state();
        let created = TherapySession {
            id: format!("s-{}", state.sessions.len() + 1),
            therapist_id: therapist_id.to_string(),
            name: session.name.clone(),
            start: session.start,
            end: session.end,
            parent_session_id: session.parent_session_id.clone(),
            location: session.location.clone(),
            notes: None,
            status: SessionStatus::Scheduled,
            students: Vec::new(),
        };
        state.sessions.push(created.clone());
        state
            .rosters
            .insert(created.id.clone(), session.student_ids.clone());
        Ok(created)
    }

    async fn update_session(
        &self,
        session_id: &str,
        update: &SessionUpdate,
    ) -> Result<TherapySession> {
        self.call("update_session")?;
        let mut state = self.state();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| CaseloadError::not_found("session", session_id))?;
        if let Some(name) = &update.name {
            session.name = Some(name.clone());
        }
        if let Some(start) = update.start {
            session.start = start;
        }
        if let Some(end) = update.end {
            session.end = end;
        }
        Ok(session.clone())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.call("delete_session")?;
        let mut state = self.state();
        state.sessions.retain(|s| s.id != session_id);
        state.rosters.remove(session_id);
        Ok(())
    }

    async fn list_session_students(&self, session_id: &str) -> Result<Vec<SessionStudent>> {
        self.call("list_session_students")?;
        Ok(Self::roster(&self.state(), session_id))
    }

    async fn add_student_to_sessions(&self, request: &AddStudentToSessions) -> Result<()> {
        self.call("add_student_to_sessions")?;
        let mut state = self.state();
        for session_id in &request.session_ids {
            let roster = state.rosters.entry(session_id.clone()).or_default();
            if !roster.contains(&request.student_id) {
                roster.push(request.student_id.clone());
            }
        }
        Ok(())
    }

    async fn remove_student_from_session(
        &self,
        session_id: &str,
        student_id: &str,
    ) -> Result<()> {
        self.call("remove_student_from_session")?;
        if let Some(roster) = self.state().rosters.get_mut(session_id) {
            roster.retain(|id| id != student_id);
        }
        Ok(())
    }

    async fn update_session_student(
        &self,
        session_id: &str,
        student_id: &str,
        update: &SessionStudentUpdate,
    ) -> Result<SessionStudent> {
        self.call("update_session_student")?;
        let state = self.state();
        let mut entry = Self::roster(&state, session_id)
            .into_iter()
            .find(|s| s.student.id == student_id)
            .ok_or_else(|| CaseloadError::not_found("session student", student_id))?;
        entry.attendance = update.attendance.unwrap_or(entry.attendance);
        entry.rating = update.rating.or(entry.rating);
        entry.notes = update.notes.clone().or(entry.notes);
        Ok(entry)
    }
}

#[async_trait]
impl TherapistClient for FakeBackend {
    async fn get_therapist(&self, therapist_id: &str) -> Result<Option<Therapist>> {
        self.call("get_therapist")?;
        Ok(Some(Therapist {
            id: therapist_id.to_string(),
            email: "therapist@school.org".to_string(),
            first_name: "Terry".to_string(),
            last_name: "Therapist".to_string(),
            school_id: None,
            district_id: None,
        }))
    }

    async fn update_therapist(
        &self,
        therapist_id: &str,
        update: &TherapistUpdate,
    ) -> Result<Therapist> {
        self.call("update_therapist")?;
        Ok(Therapist {
            id: therapist_id.to_string(),
            email: "therapist@school.org".to_string(),
            first_name: update.first_name.clone().unwrap_or_default(),
            last_name: update.last_name.clone().unwrap_or_default(),
            school_id: update.school_id.clone(),
            district_id: update.district_id.clone(),
        })
    }
}

#[async_trait]
impl ThemeClient for FakeBackend {
    async fn list_themes(&self) -> Result<Vec<Theme>> {
        self.call("list_themes")?;
        Ok(self.state().themes.clone())
    }

    async fn get_theme(&self, theme_id: &str) -> Result<Option<Theme>> {
        self.call("get_theme")?;
        Ok(self.state().themes.iter().find(|t| t.id == theme_id).cloned())
    }

    async fn create_theme(&self, theme: &NewTheme) -> Result<Theme> {
        self.call("create_theme")?;
        let mut state = self.state();
        let created = Theme {
            id: format!("th-{}", state.themes.len() + 1),
            name: theme.name.clone(),
            description: theme.description.clone(),
            start_date: theme.start_date,
            end_date: theme.end_date,
        };
        state.themes.push(created.clone());
        Ok(created)
    }

    async fn update_theme(&self, theme_id: &str, update: &ThemeUpdate) -> Result<Theme> {
        self.call("update_theme")?;
        let mut state = self.state();
        let theme = state
            .themes
            .iter_mut()
            .find(|t| t.id == theme_id)
            .ok_or_else(|| CaseloadError::not_found("theme", theme_id))?;
        if let Some(name) = &update.name {
            theme.name = name.clone();
        }
        Ok(theme.clone())
    }

    async fn delete_theme(&self, theme_id: &str) -> Result<()> {
        self.call("delete_theme")?;
        self.state().themes.retain(|t| t.id != theme_id);
        Ok(())
    }
}

#[async_trait]
impl SchoolClient for FakeBackend {
    async fn list_schools(&self, district_id: Option<&str>) -> Result<Vec<School>> {
        self.call("list_schools")?;
        let all = vec![
            School {
                id: "sch-1".to_string(),
                name: "North Elementary".to_string(),
                district_id: Some("d-1".to_string()),
            },
            School {
                id: "sch-2".to_string(),
                name: "South Middle".to_string(),
                district_id: Some("d-2".to_string()),
            },
        ];
        Ok(all
            .into_iter()
            .filter(|s| district_id.is_none() || s.district_id.as_deref() == district_id)
            .collect())
    }
}

#[async_trait]
impl DistrictClient for FakeBackend {
    async fn list_districts(&self) -> Result<Vec<District>> {
        self.call("list_districts")?;
        Ok(vec![District {
            id: "d-1".to_string(),
            name: "Lakeside".to_string(),
            state: Some("WA".to_string()),
        }])
    }
}

#[async_trait]
impl GameContentClient for FakeBackend {
    async fn list_game_content(&self, _filter: &GameContentFilter) -> Result<Vec<GameContent>> {
        self.call("list_game_content")?;
        Ok(Vec::new())
    }
}

#[async_trait]
impl GameResultClient for FakeBackend {
    async fn list_game_results(&self, _filter: &GameResultFilter) -> Result<Vec<GameResult>> {
        self.call("list_game_results")?;
        Ok(Vec::new())
    }

    async fn create_game_result(&self, result: &NewGameResult) -> Result<GameResult> {
        self.call("create_game_result")?;
        Ok(GameResult {
            id: "gr-1".to_string(),
            session_id: result.session_id.clone(),
            student_id: result.student_id.clone(),
            game: result.game,
            score: result.score,
            attempts: result.attempts,
            duration_secs: result.duration_secs,
            completed_at: Utc::now(),
        })
    }
}

#[async_trait]
impl NewsletterClient for FakeBackend {
    async fn subscribe(&self, _subscription: &NewsletterSubscription) -> Result<()> {
        self.call("subscribe")
    }
}

#[async_trait]
impl HealthClient for FakeBackend {
    async fn check(&self) -> Result<HealthStatus> {
        self.call("health")?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            version: Some("1.0.0".to_string()),
        })
    }
}

#[async_trait]
impl IdentityProvider for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        self.call("login")?;
        let therapist_id = if credentials.email.starts_with("other") {
            "t-2"
        } else {
            THERAPIST
        };
        Ok(AuthSession {
            therapist_id: therapist_id.to_string(),
            access_token: "token".to_string(),
            expires_at: None,
        })
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<AuthSession> {
        self.call("signup")?;
        Ok(AuthSession {
            therapist_id: THERAPIST.to_string(),
            access_token: "token".to_string(),
            expires_at: None,
        })
    }

    async fn logout(&self) -> Result<()> {
        self.call("logout")
    }

    async fn restore(&self) -> Result<Option<AuthSession>> {
        self.call("restore")?;
        Ok(None)
    }
}

pub fn adapters(backend: &Arc<FakeBackend>) -> ResourceAdapters {
    ResourceAdapters {
        identity: backend.clone(),
        students: backend.clone(),
        sessions: backend.clone(),
        therapists: backend.clone(),
        themes: backend.clone(),
        schools: backend.clone(),
        districts: backend.clone(),
        game_content: backend.clone(),
        game_results: backend.clone(),
        newsletter: backend.clone(),
        health: backend.clone(),
    }
}

pub fn context(backend: &Arc<FakeBackend>) -> AppContext {
    AppContext::new(
        adapters(backend),
        Arc::new(InMemoryLocalStore::new()),
        &ClientConfig::default(),
    )
}

pub async fn signed_in(backend: &Arc<FakeBackend>) -> AppContext {
    let ctx = context(backend);
    ctx.auth
        .login(&Credentials {
            email: "therapist@school.org".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    ctx
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}
