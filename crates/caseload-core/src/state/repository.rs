//! Durable local key-value store trait.

use async_trait::async_trait;

use crate::error::Result;

/// A small durable string store, the client-side equivalent of browser local
/// storage.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
