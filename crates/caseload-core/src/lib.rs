//! Domain layer for Caseload.
//!
//! Holds the closed record shapes of every backend resource, the adapter
//! traits the rest of the workspace programs against, cache keys, and the pure
//! helpers presentation code derives state with.

pub mod auth;
pub mod cache_key;
pub mod config;
pub mod error;
pub mod game;
pub mod health;
pub mod newsletter;
pub mod school;
pub mod session;
pub mod state;
pub mod student;
pub mod therapist;
pub mod theme;
pub mod util;
pub mod validate;

// Re-export common types
pub use cache_key::{CacheKey, KeyParams, KeyPart};
pub use error::{CaseloadError, Result};
pub use validate::Validate;
