//! Per-resource services composing adapters with the query cache.
//!
//! Reads return [`Query`](crate::query::Query) handles; writes run through
//! [`QueryClient::mutate`](crate::query::QueryClient::mutate) with the
//! prefixes listed in [`invalidation`].

mod games;
pub mod invalidation;
mod misc;
mod schools;
mod sessions;
mod students;
mod themes;
mod therapists;

pub use games::GameQueries;
pub use misc::{HealthQueries, NewsletterService};
pub use schools::SchoolQueries;
pub use sessions::SessionQueries;
pub use students::StudentQueries;
pub use themes::ThemeQueries;
pub use therapists::TherapistQueries;

/// Owned id, or `None` for a blank one (which disables detail reads).
fn non_blank(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}
