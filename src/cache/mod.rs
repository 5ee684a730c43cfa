//! Pluggable profile caching.
//!
//! A [`Store`] consults a [`Cache`] before asking the Mojang servers. An entry
//! only counts as a hit if it holds enough for the calling method:
//! ID and name for [`Store::load`], [`Store::load_at_time`] and
//! [`Store::load_by_id`]; additionally the name history for
//! [`Store::load_with_name_history`], and the properties for
//! [`Store::load_with_properties`]. Everything loaded from the servers is
//! written back through [`Cache::cache`], replacing the previous entry whole.

mod memory;
mod store;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{PastName, Profile, Properties};

pub use memory::MemoryCache;
pub use store::Store;

/// A caching mechanism usable through a [`Store`].
///
/// Implementations are responsible for their own thread safety. Usernames are
/// case-insensitive but case-preserving, so all name keyed methods must treat
/// "USER", "user" and "uSeR" as the same name; [`fold_name`] does that.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Records that `name` denoted the profile `id` at instant `at`.
    /// Such a mapping never becomes invalid.
    async fn cache_name_at_time(&self, name: &str, at: DateTime<Utc>, id: &str);

    /// Stores a profile snapshot for lookup by name and ID.
    async fn cache(&self, entry: CacheEntry);

    /// The cached profile currently using `name`.
    async fn get_name(&self, name: &str) -> Option<CacheEntry>;

    /// The cached profile that used `name` at instant `at`.
    async fn get_name_at_time(&self, name: &str, at: DateTime<Utc>) -> Option<CacheEntry>;

    /// The cached profile identified by `id`.
    async fn get_id(&self, id: &str) -> Option<CacheEntry>;
}

#[async_trait]
impl<C: Cache + ?Sized> Cache for Arc<C> {
    async fn cache_name_at_time(&self, name: &str, at: DateTime<Utc>, id: &str) {
        (**self).cache_name_at_time(name, at, id).await;
    }

    async fn cache(&self, entry: CacheEntry) {
        (**self).cache(entry).await;
    }

    async fn get_name(&self, name: &str) -> Option<CacheEntry> {
        (**self).get_name(name).await
    }

    async fn get_name_at_time(&self, name: &str, at: DateTime<Utc>) -> Option<CacheEntry> {
        (**self).get_name_at_time(name, at).await
    }

    async fn get_id(&self, id: &str) -> Option<CacheEntry> {
        (**self).get_id(id).await
    }
}

/// The cached projection of a [`Profile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The ID of the cached profile.
    pub id: String,
    /// The cached username of the profile.
    pub name: String,
    /// The cached name history, `None` if not cached.
    pub name_history: Option<Vec<PastName>>,
    /// The cached properties, `None` if not cached.
    pub properties: Option<Properties>,
}

impl From<&Profile> for CacheEntry {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id().to_string(),
            name: p.name().to_string(),
            name_history: p.name_history().map(<[_]>::to_vec),
            properties: p.properties().cloned(),
        }
    }
}

impl From<CacheEntry> for Profile {
    fn from(e: CacheEntry) -> Self {
        let mut p = Profile::new(e.id, e.name);
        p.set_name_history(e.name_history);
        p.set_properties(e.properties);
        p
    }
}

/// Normalizes a username for case-insensitive matching.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
