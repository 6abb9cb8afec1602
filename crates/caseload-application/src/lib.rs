//! Application layer for Caseload.
//!
//! The query cache and the services built on it: per-resource reads and
//! writes, the auth and session-selection contexts, client-local state and
//! the calendar query.

pub mod auth;
pub mod calendar;
pub mod context;
pub mod onboarding;
pub mod query;
pub mod recently_viewed;
pub mod resources;
pub mod selection;

pub use auth::AuthContext;
pub use calendar::CalendarQuery;
pub use context::{AppContext, ResourceAdapters};
pub use query::{CacheEvent, Query, QueryClient, QueryResult};
pub use selection::{NavigationAction, Route, SessionSelection, SessionSelectionContext};
