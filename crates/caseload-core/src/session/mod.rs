//! Therapy session domain module.
//!
//! Sessions are the scheduled meetings between a therapist and a group of
//! students. A session embeds short roster summaries, which is why roster
//! changes also make session lists stale.
//!
//! # Module Structure
//!
//! - `model`: session records, list parameters and roster payloads
//! - `client`: the adapter trait for the sessions resource

mod model;
pub mod client;

// Re-export public API
pub use client::SessionClient;
pub use model::{
    AddStudentToSessions, NewSession, SessionListParams, SessionStatus, SessionStudent,
    SessionStudentUpdate, SessionUpdate, TherapySession,
};
