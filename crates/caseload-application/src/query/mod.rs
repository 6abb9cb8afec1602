//! Query cache and read handles.

mod client;
mod handle;

pub use client::{CacheEvent, CacheSnapshot, QueryClient};
pub use handle::{Query, QueryResult};
