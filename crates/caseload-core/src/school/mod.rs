//! School and district directory module.
//!
//! Read-only reference data used by signup/onboarding and student profiles.

mod model;
pub mod client;

pub use client::{DistrictClient, SchoolClient};
pub use model::{District, School};
