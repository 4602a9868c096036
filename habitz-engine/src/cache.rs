//! Per-user cache of computed level views.
//!
//! Awards mutate the ledger behind the cache's back, so the award pipeline
//! invalidates the affected user after every successful write. The cache is
//! a coherence convenience for the read path, never a source of truth.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use habitz_core::level::LevelProgress;
use habitz_core::types::UserId;

/// LRU of the most recently computed level view per user.
#[derive(Debug)]
pub struct LevelCache {
    entries: Mutex<LruCache<UserId, LevelProgress>>,
}

impl LevelCache {
    /// Create a cache holding at most `capacity` users (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached view for `user`, refreshing its recency.
    #[must_use]
    pub fn get(&self, user: &UserId) -> Option<LevelProgress> {
        self.entries.lock().get(user).copied()
    }

    /// Store the freshly computed view for `user`.
    pub fn insert(&self, user: UserId, progress: LevelProgress) {
        self.entries.lock().put(user, progress);
    }

    /// Drop the cached view for `user`, if any.
    pub fn invalidate(&self, user: &UserId) {
        self.entries.lock().pop(user);
    }

    /// Number of users currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
