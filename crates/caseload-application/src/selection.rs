//! Session selection: which session the therapist is working in.
//!
//! The selection survives navigation between session sub-pages and is only
//! cleared by the explicit back-to-dashboard action. It lives for the
//! lifetime of the context and is never persisted.

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use caseload_core::cache_key::keys;
use caseload_core::session::SessionStudent;

use crate::query::CacheEvent;
use crate::resources::SessionQueries;

/// Pages the selection reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Calendar,
    Students,
    StudentProfile { student_id: String },
    Session { session_id: String },
    SessionRating { session_id: String },
    Game { session_id: String },
}

impl Route {
    /// The session a session-scoped route points at.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Route::Session { session_id }
            | Route::SessionRating { session_id }
            | Route::Game { session_id } => Some(session_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    Enter(Route),
    BackToDashboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session_id: String,
    /// Empty while loading or after a failure; check `status`.
    pub roster: Vec<SessionStudent>,
    pub status: RosterStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionSelection {
    #[default]
    Empty,
    Active(ActiveSession),
}

impl SessionSelection {
    pub fn session_id(&self) -> Option<&str> {
        match self {
            SessionSelection::Active(active) => Some(active.session_id.as_str()),
            SessionSelection::Empty => None,
        }
    }

    pub fn roster(&self) -> &[SessionStudent] {
        match self {
            SessionSelection::Active(active) => &active.roster,
            SessionSelection::Empty => &[],
        }
    }

    /// Active with the roster still loading.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, SessionSelection::Active(a) if a.status == RosterStatus::Loading)
    }

    pub fn roster_error(&self) -> Option<&str> {
        match self {
            SessionSelection::Active(ActiveSession {
                status: RosterStatus::Failed(message),
                ..
            }) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SessionSelectionContext {
    state: Arc<watch::Sender<SessionSelection>>,
    sessions: SessionQueries,
}

impl SessionSelectionContext {
    pub fn new(sessions: SessionQueries) -> Self {
        let (state, _) = watch::channel(SessionSelection::Empty);
        Self {
            state: Arc::new(state),
            sessions,
        }
    }

    pub fn current(&self) -> SessionSelection {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSelection> {
        self.state.subscribe()
    }

    /// Applies a navigation and returns the resulting selection.
    pub async fn navigate(&self, action: NavigationAction) -> SessionSelection {
        match action {
            NavigationAction::BackToDashboard => self.clear(),
            NavigationAction::Enter(route) => {
                if let Some(session_id) = route.session_id() {
                    self.select(session_id).await;
                }
            }
        }
        self.current()
    }

    /// Makes `session_id` active and loads its roster.
    ///
    /// Re-selecting the active session keeps the loaded roster. Blank ids
    /// are ignored.
    pub async fn select(&self, session_id: &str) {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return;
        }

        let switched = self.state.send_if_modified(|state| {
            if state.session_id() == Some(session_id) {
                return false;
            }
            *state = SessionSelection::Active(ActiveSession {
                session_id: session_id.to_string(),
                roster: Vec::new(),
                status: RosterStatus::Loading,
            });
            true
        });

        if switched {
            tracing::info!("[Selection] Active session is now {}", session_id);
            self.load_roster(session_id).await;
        }
    }

    /// Refetches the roster of the active session, if any.
    pub async fn reload_roster(&self) {
        let Some(session_id) = self.current().session_id().map(str::to_string) else {
            return;
        };
        self.load_roster(&session_id).await;
    }

    /// Back to the dashboard: forget the selection.
    pub fn clear(&self) {
        let cleared = self.state.send_if_modified(|state| {
            let was_active = *state != SessionSelection::Empty;
            *state = SessionSelection::Empty;
            was_active
        });
        if cleared {
            tracing::info!("[Selection] Cleared");
        }
    }

    /// Reloads the active roster whenever a cache event covers it. The task
    /// runs until aborted.
    pub fn spawn_roster_sync(&self, mut events: broadcast::Receiver<CacheEvent>) -> JoinHandle<()> {
        let context = self.clone();
        tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("[Selection] Skipped {} cache events", skipped);
                        CacheEvent::Cleared
                    }
                    Err(RecvError::Closed) => break,
                };
                let affected = context
                    .current()
                    .session_id()
                    .is_some_and(|id| event.affects(&keys::session_students(id)));
                if affected {
                    context.reload_roster().await;
                }
            }
        })
    }

    async fn load_roster(&self, session_id: &str) {
        let result = self.sessions.roster(session_id).fetch().await;
        let (roster, status) = match result.error {
            Some(message) => {
                tracing::warn!("[Selection] Roster for {} failed: {}", session_id, message);
                (Vec::new(), RosterStatus::Failed(message))
            }
            None => (result.data, RosterStatus::Loaded),
        };

        // A newer selection wins over this load.
        self.state.send_if_modified(|state| match state {
            SessionSelection::Active(active) if active.session_id == session_id => {
                active.roster = roster;
                active.status = status;
                true
            }
            _ => false,
        });
    }
}
