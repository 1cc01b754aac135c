//! Read-through cache using moka

use std::borrow::Borrow;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;
use serde::Deserialize;
use tracing::debug;

use crate::domain::DomainError;
use crate::infrastructure::observability::record_cache_lookup;

/// Configuration for a read-through cache
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of distinct keys
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Entries not accessed for this many seconds are dropped
    #[serde(default = "default_time_to_idle_secs")]
    pub time_to_idle_secs: u64,
    /// Coalesce concurrent fetches of the same cold key into one
    #[serde(default)]
    pub single_flight: bool,
    /// Run the fetch as a spawned task that fills the cache even when the
    /// caller goes away. Ignored when `single_flight` is set.
    #[serde(default)]
    pub detached_fetch: bool,
}

fn default_max_capacity() -> u64 {
    100
}

fn default_time_to_idle_secs() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_idle_secs: default_time_to_idle_secs(),
            single_flight: false,
            detached_fetch: false,
        }
    }
}

impl CacheConfig {
    pub fn time_to_idle(&self) -> Duration {
        Duration::from_secs(self.time_to_idle_secs)
    }
}

/// Why a coalesced fetch produced nothing to cache
#[derive(Debug)]
enum FetchMiss {
    Absent,
    Failed(DomainError),
}

/// Bounded read-through cache.
///
/// Evicts the least recently accessed key once `max_capacity` is reached and
/// drops entries idle for longer than the configured time-to-idle. Only
/// present values are stored; an absent fetch result or an error leaves the
/// key uncached.
pub struct ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    name: &'static str,
    cache: MokaCache<K, V>,
    config: CacheConfig,
}

impl<K, V> Debug for ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl<K, V> ReadThroughCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache; `name` labels its log lines and metrics
    pub fn new(name: &'static str, config: CacheConfig) -> Self {
        let time_to_idle = config.time_to_idle();
        Self::with_time_to_idle(name, config, time_to_idle)
    }

    /// Creates a cache with an idle expiry finer than whole seconds
    pub fn with_time_to_idle(
        name: &'static str,
        config: CacheConfig,
        time_to_idle: Duration,
    ) -> Self {
        let cache = MokaCache::builder()
            .name(name)
            .max_capacity(config.max_capacity)
            .time_to_idle(time_to_idle)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            name,
            cache,
            config,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached value without fetching, refreshing its idle timer
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.get(key).await
    }

    /// Whether a live entry exists for the key; does not count as an access
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.contains_key(key)
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches a
    /// present result.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> Result<Option<V>, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<V>, DomainError>> + Send + 'static,
    {
        if let Some(value) = self.cache.get(&key).await {
            record_cache_lookup(self.name, true);
            debug!(cache = self.name, "Cache hit");
            return Ok(Some(value));
        }

        record_cache_lookup(self.name, false);
        debug!(cache = self.name, "Cache miss, fetching");

        if self.config.single_flight {
            return self.fetch_coalesced(key, fetch()).await;
        }

        if self.config.detached_fetch {
            return self.fetch_detached(key, fetch()).await;
        }

        let fetched = fetch().await?;

        if let Some(value) = &fetched {
            self.cache.insert(key, value.clone()).await;
        }

        Ok(fetched)
    }

    /// One fetch per cold key; concurrent callers wait for the same result
    async fn fetch_coalesced<Fut>(&self, key: K, fetch: Fut) -> Result<Option<V>, DomainError>
    where
        Fut: Future<Output = Result<Option<V>, DomainError>> + Send + 'static,
    {
        let init = async move {
            match fetch.await {
                Ok(Some(value)) => Ok(value),
                Ok(None) => Err(FetchMiss::Absent),
                Err(e) => Err(FetchMiss::Failed(e)),
            }
        };

        match self.cache.try_get_with(key, init).await {
            Ok(value) => Ok(Some(value)),
            Err(miss) => match miss.as_ref() {
                FetchMiss::Absent => Ok(None),
                FetchMiss::Failed(e) => Err(e.clone()),
            },
        }
    }

    /// Runs the fetch on its own task; the task fills the cache itself so a
    /// cancelled caller still leaves the entry behind.
    async fn fetch_detached<Fut>(&self, key: K, fetch: Fut) -> Result<Option<V>, DomainError>
    where
        Fut: Future<Output = Result<Option<V>, DomainError>> + Send + 'static,
    {
        let cache = self.cache.clone();

        let handle = tokio::spawn(async move {
            let fetched = fetch.await?;

            if let Some(value) = &fetched {
                cache.insert(key, value.clone()).await;
            }

            Ok::<_, DomainError>(fetched)
        });

        handle
            .await
            .map_err(|e| DomainError::cache(format!("Detached fetch task failed: {}", e)))?
    }

    /// Drops a single entry
    pub async fn invalidate<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.invalidate(key).await;
    }

    /// Approximate number of entries; exact after `run_pending_tasks`
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Applies pending evictions and expirations
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}
