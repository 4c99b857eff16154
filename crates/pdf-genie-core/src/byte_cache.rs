//! Bounded byte cache for source documents.
//!
//! One entry per source-document identifier, holding the raw PDF bytes
//! shared read-only with every viewer consumer. A miss triggers exactly one
//! fetch; concurrent callers for the same id wait on the in-flight fetch
//! instead of firing duplicates. A failed fetch leaves the entry
//! uninitialized, so the next call retries. Capacity is LRU-bounded;
//! eviction only drops the cached bytes, never a waiter (waiters hold their
//! own handle to the entry).

use std::future::Future;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;

use lru::LruCache;
use tokio::sync::OnceCell;

use crate::QueryError;
use crate::api::ApiClient;

/// Default number of documents retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Shared, immutable document bytes.
pub type DocumentBytes = Arc<[u8]>;

type Entry = Arc<OnceCell<DocumentBytes>>;

/// Source of raw document bytes. The production impl is [`ApiClient`]
/// hitting the backend's `pdf` endpoint; tests inject counting mocks.
pub trait DocumentFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, QueryError>> + Send + 'a>>;
}

impl DocumentFetcher for ApiClient {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, QueryError>> + Send + 'a>> {
        Box::pin(self.fetch_pdf(source))
    }
}

pub struct DocumentByteCache {
    fetcher: Arc<dyn DocumentFetcher>,
    entries: Mutex<LruCache<String, Entry>>,
}

impl DocumentByteCache {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            fetcher,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get the bytes for `source`, fetching on first reference.
    ///
    /// The entry lock is held only to look up or create the entry, never
    /// across the fetch — distinct ids fetch in parallel.
    pub async fn get(&self, source: &str) -> Result<DocumentBytes, QueryError> {
        let entry = self.entry(source);
        let bytes = entry
            .get_or_try_init(|| async {
                tracing::debug!(source, "fetching document bytes");
                self.fetcher.fetch(source).await.map(DocumentBytes::from)
            })
            .await?;
        Ok(bytes.clone())
    }

    /// True when the bytes for `source` are already resident.
    pub fn contains(&self, source: &str) -> bool {
        if let Ok(entries) = self.entries.lock() {
            entries
                .peek(source)
                .is_some_and(|entry| entry.initialized())
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, source: &str) -> Entry {
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(entry) = entries.get(source) {
                return entry.clone();
            }
            let entry = Entry::default();
            entries.push(source.to_string(), entry.clone());
            entry
        } else {
            // Poisoned lock: serve an untracked entry rather than panic.
            Entry::default()
        }
    }
}
