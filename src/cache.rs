use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Derive the cache key under which the user session for the given session id
/// is stored.
///
/// The derivation is deterministic, so every operation on the same id reaches
/// the same entry. The id is hashed with blake3 before it becomes part of the
/// key, which keeps the raw token out of cache keys and whatever the cache
/// backend logs about them.
///
/// # Example
///
/// ```
/// # use session_identity::session_cache_key;
/// let key = session_cache_key("pMrwtFD8rPA90AvONYs");
/// assert!(key.starts_with("urn:user-session:"));
/// assert_eq!(key, session_cache_key("pMrwtFD8rPA90AvONYs"));
/// ```
pub fn session_cache_key(session_id: &str) -> String {
    format!(
        "urn:user-session:{}",
        blake3::hash(session_id.as_bytes()).to_hex()
    )
}

/// The cache store collaborator: typed get/set/remove by string key.
///
/// `Data` is the application's user session type. Cache clients are type safe,
/// i.e. one client stores values of one type; use e.g. an enum to distinguish
/// session states like "anonymous" or "logged-in as user X".
///
/// Timeouts, retries and connection handling are the implementation's
/// responsibility; this layer performs no retries.
#[async_trait]
pub trait CacheClient<Data> {
    /// Read the value stored under `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<Data>>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&mut self, key: &str, value: Data) -> Result<()>;

    /// Remove the value stored under `key`. Removing a missing key is not an
    /// error.
    async fn remove(&mut self, key: &str) -> Result<()>;
}

/// An in-memory cache client.
///
/// Because there is no external persistence, this cache is ephemeral and will
/// be cleared on restart. It is intended for tests and single-process hosts;
/// production deployments should implement [`CacheClient`] against a real
/// cache store.
#[derive(Debug, Clone)]
pub struct MemoryCache<Data> {
    entries: HashMap<String, Data>,
}

#[async_trait]
impl<Data: Send + Sync + Clone> CacheClient<Data> for MemoryCache<Data> {
    async fn get(&self, key: &str) -> Result<Option<Data>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: Data) -> Result<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<Data> MemoryCache<Data> {
    /// Create a new empty memory cache.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the number of entries in the memory cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the memory cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<Data> Default for MemoryCache<Data> {
    fn default() -> Self {
        Self {
            entries: Default::default(),
        }
    }
}
