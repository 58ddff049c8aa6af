//! Keyed resolution cache.
//!
//! An explicit store mapping (resolver kind, input text, table snapshot)
//! to a resolution outcome. Owned by the resolver so tests can reset it
//! between cases. Unbounded for the duration of a batch run; never
//! persisted across runs.
//!
//! Concurrency contract: reads take a shared lock, the expensive compute
//! runs outside any lock, and the write takes the exclusive lock only to
//! insert. Two workers racing on the same uncached key may both compute;
//! the overwrite is idempotent, so that is accepted rather than serialized.

use std::collections::HashMap;
use std::sync::RwLock;

/// Which resolver produced a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverKind {
    /// Country resolution; reference data is static, so no table identity.
    Country,
    /// Institute resolution against a table snapshot.
    Institute,
    /// Identifier join against a table snapshot.
    Identifier,
}

/// Composite cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ResolverKind,
    text: String,
    table: Option<u64>,
}

impl CacheKey {
    /// Key for a resolver that depends only on its input text.
    #[must_use]
    pub fn of(kind: ResolverKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            table: None,
        }
    }

    /// Key for a resolver whose output depends on a table snapshot.
    #[must_use]
    pub fn with_table(kind: ResolverKind, text: &str, fingerprint: u64) -> Self {
        Self {
            kind,
            text: text.to_string(),
            table: Some(fingerprint),
        }
    }
}

/// Shared, process-lifetime cache of resolution outcomes.
///
/// `None` values are cached too: "no match" is a valid terminal outcome
/// and repeating the inference for it would defeat the point.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    inner: RwLock<HashMap<CacheKey, Option<String>>>,
}

impl ResolutionCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key, computing and storing the value on a miss.
    ///
    /// The closure runs outside any lock.
    pub fn fetch_or_compute<F>(&self, key: CacheKey, compute: F) -> Option<String>
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let value = compute();
        self.write().insert(key, value.clone());
        value
    }

    /// Look up a key without computing. Outer `None` = miss; inner
    /// `Option` is the cached outcome.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Option<String>> {
        self.read().get(key).cloned()
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop all cached entries.
    pub fn clear(&self) {
        self.write().clear();
    }

    // Lock poisoning is recovered, not propagated: a panicking worker
    // leaves the map in a usable state because values are inserted whole.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CacheKey, Option<String>>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CacheKey, Option<String>>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
