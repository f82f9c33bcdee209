// File: crates/rank-core/src/query.rs
// Summary: Explicit LRU query cache with predicate/prefix invalidation.
// Notes:
// - The cache is a plain object owned by the caller and passed by
//   reference; there is no global singleton. Wrap in a Mutex for sharing.
// - A failed fetch leaves any stale entry untouched so callers can keep
//   rendering the last good data.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::QueryError;
use crate::record::Record;

/// Cache key: ordered path segments, e.g. `["projects", "7", "keywords"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    segments: Vec<String>,
}

impl QueryKey {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Prefix match on whole segments: `["projects", "7"]` matches
    /// `projects/7/keywords` but not `projects/71`.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.segments.len() >= prefix.len()
            && self.segments.iter().zip(prefix).all(|(seg, p)| seg == p)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

type FetchFn = Box<dyn Fn(&QueryKey) -> anyhow::Result<Vec<Record>> + Send + Sync>;

/// Declarative query: key, fetcher, enablement, optional refresh interval.
pub struct QuerySpec {
    pub key: QueryKey,
    fetch: FetchFn,
    pub enabled: bool,
    /// Entries older than this are refetched on next access (the polling
    /// interval); `None` means cached entries never go stale.
    pub refresh_after: Option<Duration>,
}

impl QuerySpec {
    pub fn new(
        key: QueryKey,
        fetch: impl Fn(&QueryKey) -> anyhow::Result<Vec<Record>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            fetch: Box::new(fetch),
            enabled: true,
            refresh_after: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn refresh_after(mut self, interval: Duration) -> Self {
        self.refresh_after = Some(interval);
        self
    }
}

/// Outcome of running a query through the cache.
#[derive(Clone, Debug)]
pub enum QueryResult {
    /// The spec was disabled; nothing was fetched or served.
    Disabled,
    /// Served from cache.
    Hit(Arc<Vec<Record>>),
    /// Fetched (first access, staleness, or after invalidation).
    Fetched(Arc<Vec<Record>>),
}

impl QueryResult {
    pub fn records(&self) -> Option<&Arc<Vec<Record>>> {
        match self {
            QueryResult::Disabled => None,
            QueryResult::Hit(records) | QueryResult::Fetched(records) => Some(records),
        }
    }
}

struct CacheEntry {
    records: Arc<Vec<Record>>,
    fetched_at: Instant,
}

/// LRU-bounded query cache with hit/miss/eviction counters.
pub struct QueryCache {
    capacity: usize,
    map: HashMap<QueryKey, CacheEntry>,
    /// Key access order (front = least recently used).
    order: VecDeque<QueryKey>,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Run a query: serve a fresh cached entry, or fetch and cache.
    pub fn run(&mut self, spec: &QuerySpec) -> Result<QueryResult, QueryError> {
        if !spec.enabled {
            return Ok(QueryResult::Disabled);
        }

        let cached = self.map.get(&spec.key).and_then(|entry| {
            let fresh = spec
                .refresh_after
                .map_or(true, |interval| entry.fetched_at.elapsed() < interval);
            fresh.then(|| Arc::clone(&entry.records))
        });
        if let Some(records) = cached {
            self.hits += 1;
            self.touch(&spec.key);
            debug!(key = %spec.key, "query cache hit");
            return Ok(QueryResult::Hit(records));
        }

        self.misses += 1;
        debug!(key = %spec.key, "query cache miss");
        let records = (spec.fetch)(&spec.key).map_err(|source| QueryError::Fetch {
            key: spec.key.clone(),
            source,
        })?;
        let records = Arc::new(records);
        self.insert(spec.key.clone(), Arc::clone(&records));
        Ok(QueryResult::Fetched(records))
    }

    fn touch(&mut self, key: &QueryKey) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.clone());
    }

    fn insert(&mut self, key: QueryKey, records: Arc<Vec<Record>>) {
        if self.map.contains_key(&key) {
            self.order.retain(|k| k != &key);
        } else if self.map.len() >= self.capacity {
            if let Some(evict) = self.order.pop_front() {
                self.map.remove(&evict);
                self.evictions += 1;
                debug!(key = %evict, "query cache eviction");
            }
        }
        self.order.push_back(key.clone());
        self.map.insert(
            key,
            CacheEntry { records, fetched_at: Instant::now() },
        );
    }

    /// Remove entries whose key matches; returns how many were removed.
    pub fn invalidate(&mut self, predicate: impl Fn(&QueryKey) -> bool) -> usize {
        let before = self.map.len();
        self.map.retain(|key, _| !predicate(key));
        self.order.retain(|key| !predicate(key));
        let removed = before - self.map.len();
        if removed > 0 {
            debug!(removed, "query cache invalidation");
        }
        removed
    }

    /// The standard after-mutation helper: drop everything under a key
    /// prefix (e.g. all of `projects/7/...` after editing project 7).
    pub fn invalidate_prefix(&mut self, prefix: &[&str]) -> usize {
        self.invalidate(|key| key.starts_with(prefix))
    }

    /// Hit rate 0.0-1.0; 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
