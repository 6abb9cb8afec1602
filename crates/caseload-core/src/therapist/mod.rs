//! Therapist domain module.
//!
//! The therapist is the signed-in user; their id is the identity that gates
//! every caseload-scoped read.

mod model;
pub mod client;

pub use client::TherapistClient;
pub use model::{Therapist, TherapistUpdate};
