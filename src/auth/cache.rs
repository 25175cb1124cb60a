//! In-memory token-to-profile cache with LRU eviction.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::profile::TokenProfile;

/// Token-to-profile cache for a single profile type.
///
/// Safe to share between concurrent requests. A `max_entries` of `0` means
/// unbounded; otherwise the least recently used entry is evicted to make room.
/// Racing `put`s for the same token are last-writer-wins.
///
/// `get` records the access time for LRU ordering, so it takes the write lock:
/// concurrent lookups are serialized, not run in parallel.
pub struct TokenCache<P> {
    inner: RwLock<CacheInner<P>>,
}

struct CacheInner<P> {
    entries: HashMap<String, CacheEntry<P>>,
    max_entries: usize,
    clock: u64,
}

struct CacheEntry<P> {
    profile: P,
    last_accessed: u64,
}

impl<P> CacheInner<P> {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl<P> TokenCache<P> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                entries: HashMap::new(),
                max_entries,
                clock: 0,
            }),
        }
    }

    /// A cache with no size limit.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Configured bound, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        let max = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .max_entries;
        (max > 0).then_some(max)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: Clone> TokenCache<P> {
    /// Look up the profile cached for `token`.
    pub fn get(&self, token: &str) -> Option<P> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let now = inner.tick();
        let entry = inner.entries.get_mut(token)?;
        entry.last_accessed = now;
        Some(entry.profile.clone())
    }

    /// Insert or overwrite the profile for `token`, evicting LRU if at capacity.
    pub fn put(&self, token: impl Into<String>, profile: P) {
        let token = token.into();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let now = inner.tick();

        if inner.max_entries > 0
            && inner.entries.len() >= inner.max_entries
            && !inner.entries.contains_key(&token)
        {
            if let Some(lru_token) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(k, _)| k.clone())
            {
                inner.entries.remove(&lru_token);
            }
        }

        inner.entries.insert(
            token,
            CacheEntry {
                profile,
                last_accessed: now,
            },
        );
    }
}

impl<P> Default for TokenCache<P> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<P> fmt::Debug for TokenCache<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Owner of one [`TokenCache`] per profile type.
///
/// Caches are created on first request for a type and sized by
/// [`TokenProfile::CACHE_SIZE`]. Two profile types never share a cache, so the
/// same token string cached under both types resolves independently.
#[derive(Default)]
pub struct TokenCacheRegistry {
    caches: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl TokenCacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache for profile type `P`, created on first use.
    pub fn cache_for<P: TokenProfile>(&self) -> Arc<TokenCache<P>> {
        let key = TypeId::of::<P>();
        if let Some(cache) = self.lookup::<P>(key) {
            return cache;
        }

        let mut caches = self.caches.write().unwrap_or_else(PoisonError::into_inner);
        let entry = caches.entry(key).or_insert_with(|| {
            tracing::debug!(
                profile_type = std::any::type_name::<P>(),
                size = %describe_size(P::CACHE_SIZE),
                "Creating token cache"
            );
            Arc::new(TokenCache::<P>::new(P::CACHE_SIZE))
        });
        downcast::<P>(entry.clone())
    }

    /// Number of profile types with a cache.
    pub fn len(&self) -> usize {
        self.caches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<P: TokenProfile>(&self, key: TypeId) -> Option<Arc<TokenCache<P>>> {
        let caches = self.caches.read().unwrap_or_else(PoisonError::into_inner);
        caches.get(&key).cloned().map(downcast::<P>)
    }
}

impl fmt::Debug for TokenCacheRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCacheRegistry")
            .field("types", &self.len())
            .finish()
    }
}

// Entries are only ever inserted under `TypeId::of::<P>()` with a
// `TokenCache<P>` value, so the downcast cannot fail.
fn downcast<P: TokenProfile>(cache: Arc<dyn Any + Send + Sync>) -> Arc<TokenCache<P>> {
    match cache.downcast::<TokenCache<P>>() {
        Ok(cache) => cache,
        Err(_) => unreachable!("token cache registered under a foreign TypeId"),
    }
}

pub(crate) fn describe_size(max_entries: usize) -> String {
    if max_entries == 0 {
        "unlimited".to_string()
    } else {
        max_entries.to_string()
    }
}
