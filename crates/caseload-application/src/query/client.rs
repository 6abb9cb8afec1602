//! Shared query cache.
//!
//! One [`QueryClient`] is created per application and handed to every
//! resource service. Entries are keyed by [`CacheKey`] and store type-erased
//! values. For each key at most one fetch is authoritative: concurrent reads
//! join it, and a forced refetch or an invalidation supersedes it. A
//! superseded fetch still resolves for the callers awaiting it, but its
//! result is not written to the cache.
//!
//! Fetches run on spawned tasks, so dropping the caller does not cancel the
//! request; its result lands in the cache when it arrives.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

use caseload_core::{CacheKey, CaseloadError, Result};

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue>>>;

const EVENT_CAPACITY: usize = 64;

/// Broadcast after the cache changed outside of a fetch completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// Entries under these prefixes were marked stale.
    Invalidated(Vec<CacheKey>),
    /// Every entry was dropped.
    Cleared,
}

impl CacheEvent {
    /// Whether a consumer reading `key` should refetch.
    pub fn affects(&self, key: &CacheKey) -> bool {
        match self {
            CacheEvent::Invalidated(prefixes) => prefixes.iter().any(|p| key.starts_with(p)),
            CacheEvent::Cleared => true,
        }
    }
}

struct InFlight {
    generation: u64,
    future: SharedFetch,
}

#[derive(Default)]
struct Entry {
    data: Option<AnyValue>,
    error: Option<CaseloadError>,
    stale: bool,
    fetched_at: Option<Instant>,
    in_flight: Option<InFlight>,
}

impl Entry {
    fn is_fresh(&self, stale_after: Option<Duration>) -> bool {
        if self.data.is_none() || self.stale {
            return false;
        }
        match (stale_after, self.fetched_at) {
            (Some(max_age), Some(at)) => at.elapsed() < max_age,
            _ => true,
        }
    }
}

/// What a cache entry holds right now.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot<T> {
    pub data: Option<T>,
    pub is_fetching: bool,
    /// Data is present but must be refetched before it is trusted.
    pub is_stale: bool,
    pub error: Option<CaseloadError>,
}

impl<T> Default for CacheSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_fetching: false,
            is_stale: false,
            error: None,
        }
    }
}

struct Inner {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    events: broadcast::Sender<CacheEvent>,
    stale_after: Option<Duration>,
    generation: AtomicU64,
}

impl Inner {
    fn entries(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Writes a finished fetch into its entry unless it was superseded.
    fn complete(&self, key: &CacheKey, generation: u64, result: &Result<AnyValue>) {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            tracing::debug!("Dropping result for cleared key {}", key);
            return;
        };
        if entry.in_flight.as_ref().map(|f| f.generation) != Some(generation) {
            tracing::debug!("Dropping superseded result for {}", key);
            return;
        }

        entry.in_flight = None;
        match result {
            Ok(value) => {
                entry.data = Some(value.clone());
                entry.error = None;
                entry.stale = false;
                entry.fetched_at = Some(Instant::now());
            }
            Err(e) => {
                tracing::warn!("Fetch for {} failed: {}", key, e);
                entry.error = Some(e.clone());
                entry.stale = true;
            }
        }
    }
}

/// Cheap-to-clone handle to the shared cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_stale_after(None)
    }

    /// `stale_after` bounds how long a fetched value is served without a
    /// refetch. `None` keeps values fresh until invalidated.
    pub fn with_stale_after(stale_after: Option<Duration>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                events,
                stale_after,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.inner.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_fresh(&self, key: &CacheKey) -> bool {
        self.inner
            .entries()
            .get(key)
            .is_some_and(|e| e.is_fresh(self.inner.stale_after))
    }

    /// Reads the entry without touching the network.
    pub fn snapshot<T: Clone + 'static>(&self, key: &CacheKey) -> CacheSnapshot<T> {
        let entries = self.inner.entries();
        let Some(entry) = entries.get(key) else {
            return CacheSnapshot::default();
        };

        CacheSnapshot {
            data: entry
                .data
                .as_ref()
                .and_then(|v| (**v).downcast_ref::<T>().cloned()),
            is_fetching: entry.in_flight.is_some(),
            is_stale: entry.data.is_some() && !entry.is_fresh(self.inner.stale_after),
            error: entry.error.clone(),
        }
    }

    /// Serves fresh cached data, joins an in-flight fetch, or starts one.
    pub async fn fetch<T, F, Fut>(&self, key: CacheKey, fetcher: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.run(key, fetcher, false).await
    }

    /// Always starts a new fetch, superseding any in flight for `key`.
    pub async fn refetch<T, F, Fut>(&self, key: CacheKey, fetcher: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.run(key, fetcher, true).await
    }

    async fn run<T, F, Fut>(&self, key: CacheKey, fetcher: F, force: bool) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let shared = {
            let mut entries = self.inner.entries();
            let entry = entries.entry(key.clone()).or_default();

            if !force
                && entry.is_fresh(self.inner.stale_after)
                && let Some(data) = &entry.data
            {
                tracing::debug!("Cache hit {}", key);
                return downcast(data.clone(), &key);
            }

            match &entry.in_flight {
                Some(in_flight) if !force => {
                    tracing::debug!("Joining in-flight fetch for {}", key);
                    in_flight.future.clone()
                }
                _ => {
                    tracing::debug!("Fetching {}", key);
                    let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed) + 1;
                    let future = self.spawn_fetch(key.clone(), generation, fetcher());
                    entry.in_flight = Some(InFlight {
                        generation,
                        future: future.clone(),
                    });
                    future
                }
            }
        };

        let value = shared.await?;
        downcast(value, &key)
    }

    fn spawn_fetch<T, Fut>(&self, key: CacheKey, generation: u64, fut: Fut) -> SharedFetch
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            let result = fut.await.map(|value| Arc::new(value) as AnyValue);
            inner.complete(&key, generation, &result);
            result
        });

        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(CaseloadError::internal(format!("fetch task failed: {}", e))),
            }
        }
        .boxed()
        .shared()
    }

    /// Marks every entry under any of `prefixes` stale as one batch.
    ///
    /// In-flight fetches for those entries are superseded. Returns the number
    /// of entries touched.
    pub fn invalidate(&self, prefixes: &[CacheKey]) -> usize {
        if prefixes.is_empty() {
            return 0;
        }

        let mut touched = 0;
        {
            let mut entries = self.inner.entries();
            for (key, entry) in entries.iter_mut() {
                if prefixes.iter().any(|p| key.starts_with(p)) {
                    entry.stale = true;
                    entry.in_flight = None;
                    touched += 1;
                }
            }
        }

        tracing::debug!(
            "Invalidated {} entries under {} prefixes",
            touched,
            prefixes.len()
        );
        // No receivers is fine.
        let _ = self
            .inner
            .events
            .send(CacheEvent::Invalidated(prefixes.to_vec()));
        touched
    }

    /// Drops every entry. In-flight results are discarded when they arrive.
    pub fn clear(&self) {
        self.inner.entries().clear();
        tracing::debug!("Query cache cleared");
        let _ = self.inner.events.send(CacheEvent::Cleared);
    }

    /// Runs a write; on success invalidates what `invalidations` names
    /// before returning. A failed write invalidates nothing.
    pub async fn mutate<T, Fut, K>(&self, name: &str, write: Fut, invalidations: K) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
        K: FnOnce(&T) -> Vec<CacheKey>,
    {
        match write.await {
            Ok(value) => {
                let keys = invalidations(&value);
                let touched = self.invalidate(&keys);
                tracing::debug!("{} succeeded, {} cached reads now stale", name, touched);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("{} failed: {}", name, e);
                Err(e)
            }
        }
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: Clone + 'static>(value: AnyValue, key: &CacheKey) -> Result<T> {
    (*value).downcast_ref::<T>().cloned().ok_or_else(|| {
        CaseloadError::internal(format!("cached value for {} has an unexpected type", key))
    })
}
