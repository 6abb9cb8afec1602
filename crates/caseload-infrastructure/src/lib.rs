//! Infrastructure layer for Caseload.
//!
//! HTTP adapters for every backend resource, the identity provider, the
//! durable local store, path resolution and configuration loading.

pub mod api;
pub mod config_service;
pub mod local_store;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use local_store::{FileLocalStore, InMemoryLocalStore};
pub use paths::{CaseloadPaths, PathError, ServiceType};
