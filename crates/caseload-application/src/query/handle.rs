//! Per-read handles over the shared cache.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

use caseload_core::{CacheKey, Result};

use super::client::QueryClient;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// What a read hands to presentation code.
///
/// `data` is never absent: a read with nothing cached yet (or a disabled
/// read) carries `T::default()`. `error` is the user-facing message of the
/// last failure.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub data: T,
    pub is_loading: bool,
    pub is_stale: bool,
    pub error: Option<String>,
}

impl<T: Default> QueryResult<T> {
    /// The result of a read whose inputs are not ready.
    pub fn disabled() -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            is_stale: false,
            error: None,
        }
    }
}

/// A read bound to one cache key, or a disabled read.
///
/// Handles are cheap to clone; two handles with the same key share one cache
/// entry and one in-flight request.
pub struct Query<T> {
    client: QueryClient,
    target: Option<(CacheKey, Fetcher<T>)>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            target: self.target.clone(),
        }
    }
}

impl<T> Query<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new<F, Fut>(client: &QueryClient, key: CacheKey, fetcher: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetcher: Fetcher<T> = Arc::new(move || fetcher().boxed());
        Self {
            client: client.clone(),
            target: Some((key, fetcher)),
        }
    }

    /// A read that never touches the network and always yields the default.
    pub fn disabled(client: &QueryClient) -> Self {
        Self {
            client: client.clone(),
            target: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }

    pub fn key(&self) -> Option<&CacheKey> {
        self.target.as_ref().map(|(key, _)| key)
    }

    /// Current cache state, without any network call.
    pub fn snapshot(&self) -> QueryResult<T> {
        let Some((key, _)) = &self.target else {
            return QueryResult::disabled();
        };

        let snap = self.client.snapshot::<T>(key);
        QueryResult {
            data: snap.data.unwrap_or_default(),
            is_loading: snap.is_fetching,
            is_stale: snap.is_stale,
            error: snap.error.map(|e| e.user_message()),
        }
    }

    /// Serves fresh cached data or fetches.
    pub async fn fetch(&self) -> QueryResult<T> {
        self.resolve(false).await
    }

    /// Always fetches.
    pub async fn refetch(&self) -> QueryResult<T> {
        self.resolve(true).await
    }

    /// Like [`fetch`](Self::fetch) but keeps the error value. A disabled read
    /// yields `T::default()`.
    pub async fn try_fetch(&self) -> Result<T> {
        match &self.target {
            Some((key, fetcher)) => {
                let fetcher = fetcher.clone();
                self.client.fetch(key.clone(), move || fetcher()).await
            }
            None => Ok(T::default()),
        }
    }

    async fn resolve(&self, force: bool) -> QueryResult<T> {
        let Some((key, fetcher)) = &self.target else {
            return QueryResult::disabled();
        };

        let fetcher = fetcher.clone();
        let outcome = if force {
            self.client.refetch(key.clone(), move || fetcher()).await
        } else {
            self.client.fetch(key.clone(), move || fetcher()).await
        };

        match outcome {
            Ok(data) => QueryResult {
                data,
                is_loading: false,
                is_stale: false,
                error: None,
            },
            Err(e) => {
                let snap = self.snapshot();
                QueryResult {
                    error: Some(e.user_message()),
                    ..snap
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseload_core::CaseloadError;
    use caseload_core::cache_key::keys;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_disabled_query_is_inert() {
        let client = QueryClient::new();
        let query: Query<Vec<u32>> = Query::disabled(&client);

        let result = query.fetch().await;
        assert_eq!(result, QueryResult::disabled());
        assert!(result.data.is_empty());
        assert!(!result.is_loading);
        assert!(client.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_before_and_after_fetch() {
        let client = QueryClient::new();
        let query = Query::new(&client, keys::districts(), || async { Ok(vec![1u32, 2]) });

        assert!(query.snapshot().data.is_empty());
        assert_eq!(query.fetch().await.data, vec![1, 2]);
        assert_eq!(query.snapshot().data, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_refetch_always_calls_adapter() {
        let client = QueryClient::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let query = Query::new(&client, keys::health(), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) as u32;
            async move { Ok(n) }
        });

        assert_eq!(query.fetch().await.data, 0);
        assert_eq!(query.fetch().await.data, 0);
        assert_eq!(query.refetch().await.data, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_is_a_message() {
        let client = QueryClient::new();
        let query: Query<Vec<u32>> = Query::new(&client, keys::themes(), || async {
            Err(CaseloadError::api(503, "Backend is down for maintenance"))
        });

        let result = query.fetch().await;
        assert_eq!(result.error.as_deref(), Some("Backend is down for maintenance"));
        assert!(result.data.is_empty());
        assert!(!result.is_loading);
    }
}
