//! Client-local state that survives reloads.
//!
//! # Module Structure
//!
//! - `model`: recently viewed students and onboarding answers
//! - `repository`: the durable key-value store contract

pub mod model;
pub mod repository;

pub use model::{
    MAX_RECENTLY_VIEWED, ONBOARDING_KEY, OnboardingData, RECENTLY_VIEWED_KEY, RecentlyViewedStudent,
};
pub use repository::LocalStore;
