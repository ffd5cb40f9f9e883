use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::store::CacheStore;
use crate::models::ProgramCollection;

/// Cache entries go stale after 2 minutes.
/// A short window keeps a frequently edited sheet visibly fresh while
/// still absorbing bursts of repeated loads.
const CACHE_FRESH_MINUTES: i64 = 2;

/// Single fixed key under which the processed collection is stored.
pub(crate) const PROGRAMS_KEY: &str = "programs";

/// JSON envelope persisted to the store: the data plus its write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() - self.cached_at >= Duration::minutes(CACHE_FRESH_MINUTES)
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Cache of the processed program collection over an injectable store.
pub struct CacheManager {
    store: Box<dyn CacheStore>,
}

impl CacheManager {
    pub fn new(store: Box<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read the cached collection, honoring the freshness window.
    /// Expired entries are removed on sight (lazy eviction).
    pub fn load_fresh(&self) -> Option<ProgramCollection> {
        let cached = self.read_envelope()?;
        if cached.is_expired() {
            debug!(age_minutes = cached.age_minutes(), "cache expired, evicting");
            self.evict();
            return None;
        }
        debug!(age_minutes = cached.age_minutes(), "cache hit");
        Some(cached.data)
    }

    /// Read whatever entry exists, expired or not. This is the stale
    /// fallback used when a fetch fails.
    pub fn load_any(&self) -> Option<CachedData<ProgramCollection>> {
        self.read_envelope()
    }

    /// Overwrite the cache with a freshly processed collection.
    /// Caching is advisory; failures are logged, never fatal.
    pub fn save(&self, data: &ProgramCollection) {
        let cached = CachedData::new(data);
        match serde_json::to_string(&cached) {
            Ok(json) => {
                if let Err(e) = self.store.put(PROGRAMS_KEY, &json) {
                    warn!(error = %e, "failed to write program cache");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize program cache"),
        }
    }

    /// Drop any cache entry. Force refresh calls this before fetching so
    /// a stale entry cannot leak through a later failure path.
    pub fn evict(&self) {
        if let Err(e) = self.store.remove(PROGRAMS_KEY) {
            warn!(error = %e, "failed to remove program cache entry");
        }
    }

    /// Human-readable age of the current entry, if any.
    pub fn age_display(&self) -> Option<String> {
        self.read_envelope().map(|cached| cached.age_display())
    }

    /// A corrupt entry is treated as absent and removed.
    fn read_envelope(&self) -> Option<CachedData<ProgramCollection>> {
        let raw = match self.store.get(PROGRAMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(error = %e, "failed to read program cache");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!(error = %e, "corrupt program cache entry, removing");
                self.evict();
                None
            }
        }
    }
}
