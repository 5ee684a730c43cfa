use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Cache, CacheEntry, fold_name};

#[derive(Debug)]
struct Stored {
    entry: CacheEntry,
    expires_at: Option<Instant>,
}

impl Stored {
    fn fresh(&self) -> Option<&CacheEntry> {
        match self.expires_at {
            Some(t) if Instant::now() > t => None,
            _ => Some(&self.entry),
        }
    }
}

#[derive(Debug, Default)]
struct Maps {
    by_id: HashMap<String, Stored>,
    ids_by_name: HashMap<String, String>,
    ids_by_name_at: HashMap<(String, DateTime<Utc>), String>,
}

/// An in-process [`Cache`].
///
/// Profile snapshots may be given a time to live, after which they count as
/// misses. Expired snapshots are evicted on the next write. Name-at-time
/// mappings are kept forever since they cannot go stale.
#[derive(Debug, Default)]
pub struct MemoryCache {
    maps: RwLock<Maps>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// A cache whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose profile snapshots expire `ttl` after being cached.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            maps: RwLock::default(),
            ttl: Some(ttl),
        }
    }

    /// Number of cached profile snapshots that have not expired.
    pub async fn len(&self) -> usize {
        let guard = self.maps.read().await;
        guard
            .by_id
            .values()
            .filter(|s| s.fresh().is_some())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every entry and mapping.
    pub async fn clear(&self) {
        *self.maps.write().await = Maps::default();
    }
}

impl Maps {
    fn entry(&self, id: &str) -> Option<CacheEntry> {
        self.by_id.get(id).and_then(Stored::fresh).cloned()
    }

    /// Evicts expired snapshots and the name index entries leading to them.
    fn prune(&mut self) {
        let before = self.by_id.len();
        self.by_id.retain(|_, s| s.fresh().is_some());
        if self.by_id.len() != before {
            let by_id = &self.by_id;
            self.ids_by_name.retain(|_, id| by_id.contains_key(id));
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn cache_name_at_time(&self, name: &str, at: DateTime<Utc>, id: &str) {
        let mut guard = self.maps.write().await;
        guard
            .ids_by_name_at
            .insert((fold_name(name), at), id.to_string());
    }

    async fn cache(&self, entry: CacheEntry) {
        let expires_at = self.ttl.map(|ttl| Instant::now() + ttl);
        let key = fold_name(&entry.name);

        let mut guard = self.maps.write().await;
        let maps = &mut *guard;
        maps.prune();

        // The profile was renamed: its old name no longer leads to it.
        if let Some(old) = maps.by_id.get(&entry.id) {
            let old_key = fold_name(&old.entry.name);
            if old_key != key && maps.ids_by_name.get(&old_key) == Some(&entry.id) {
                maps.ids_by_name.remove(&old_key);
            }
        }

        maps.ids_by_name.insert(key, entry.id.clone());
        maps.by_id
            .insert(entry.id.clone(), Stored { entry, expires_at });
    }

    async fn get_name(&self, name: &str) -> Option<CacheEntry> {
        let guard = self.maps.read().await;
        let id = guard.ids_by_name.get(&fold_name(name))?;
        guard.entry(id)
    }

    async fn get_name_at_time(&self, name: &str, at: DateTime<Utc>) -> Option<CacheEntry> {
        let guard = self.maps.read().await;
        let id = guard.ids_by_name_at.get(&(fold_name(name), at))?;
        guard.entry(id)
    }

    async fn get_id(&self, id: &str) -> Option<CacheEntry> {
        self.maps.read().await.entry(id)
    }
}
