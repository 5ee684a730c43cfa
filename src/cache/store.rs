use chrono::{DateTime, Utc};
use futures::future::BoxFuture;

use super::{Cache, CacheEntry};
use crate::core::{MojangClient, MojangError, ProfileService};
use crate::profile::{self, Profile};

/// Profile loading with a cache in front of the Mojang servers.
///
/// Each method mirrors the identically named function in [`crate::profile`].
/// Profiles are only requested from the servers if the cache lacks the
/// information asked for; whatever the servers return is cached. Failed loads
/// cache nothing.
#[derive(Debug, Clone)]
pub struct Store<C> {
    client: MojangClient,
    cache: C,
}

impl<C: Cache> Store<C> {
    pub fn new(client: MojangClient, cache: C) -> Self {
        Self { client, cache }
    }

    /// The cache used by the store.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The client used on cache misses.
    pub fn client(&self) -> &MojangClient {
        &self.client
    }

    /// Like [`profile::load`], served from the cache when possible.
    ///
    /// # Errors
    ///
    /// See [`profile::load`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn load(&self, name: &str) -> Result<Profile, MojangError> {
        if name.is_empty() {
            return Err(MojangError::NoSuchProfile);
        }
        if let Some(e) = self.cache.get_name(name).await {
            return Ok(hit(e));
        }

        let p = profile::load(&self.client, name).await?;
        self.write_through(&p).await;
        Ok(p)
    }

    /// Like [`profile::load_at_time`], served from the cache when possible.
    ///
    /// # Errors
    ///
    /// See [`profile::load_at_time`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn load_at_time(&self, name: &str, at: DateTime<Utc>) -> Result<Profile, MojangError> {
        if name.is_empty() {
            return Err(MojangError::NoSuchProfile);
        }
        if let Some(e) = self.cache.get_name_at_time(name, at).await {
            return Ok(hit(e));
        }

        let p = profile::load_at_time(&self.client, name, at).await?;
        self.write_through(&p).await;
        self.cache.cache_name_at_time(name, at, p.id()).await;
        Ok(p)
    }

    /// Like [`profile::load_by_id`], served from any cached entry for `id`.
    ///
    /// # Errors
    ///
    /// See [`profile::load_by_id`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn load_by_id(&self, id: &str) -> Result<Profile, MojangError> {
        self.load_id_where(id, |_| true, profile::load_by_id).await
    }

    /// Like [`profile::load_with_name_history`], served from the cache if the
    /// cached entry includes a name history.
    ///
    /// # Errors
    ///
    /// See [`profile::load_with_name_history`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn load_with_name_history(&self, id: &str) -> Result<Profile, MojangError> {
        self.load_id_where(
            id,
            |e| e.name_history.is_some(),
            profile::load_with_name_history,
        )
        .await
    }

    /// Like [`profile::load_with_properties`], served from the cache if the
    /// cached entry includes properties.
    ///
    /// # Errors
    ///
    /// See [`profile::load_with_properties`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn load_with_properties(&self, id: &str) -> Result<Profile, MojangError> {
        self.load_id_where(id, |e| e.properties.is_some(), profile::load_with_properties)
            .await
    }

    /// Like [`profile::load_many`]; only names missing from the cache are
    /// requested, all in one batch.
    ///
    /// # Errors
    ///
    /// See [`profile::load_many`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    pub async fn load_many<I, S>(&self, names: I) -> Result<Vec<Profile>, MojangError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = profile::bulk_names(names)?;

        let mut found = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.cache.get_name(&name).await {
                Some(e) => found.push(hit(e)),
                None => missing.push(name),
            }
        }

        for p in profile::fetch_many(&self.client, &missing).await? {
            self.write_through(&p).await;
            if !found.iter().any(|f: &Profile| f.id() == p.id()) {
                found.push(p);
            }
        }
        Ok(found)
    }

    async fn load_id_where<'a, F, L, Fut>(
        &'a self,
        id: &'a str,
        sufficient: F,
        load: L,
    ) -> Result<Profile, MojangError>
    where
        F: FnOnce(&CacheEntry) -> bool,
        L: FnOnce(&'a MojangClient, &'a str) -> Fut,
        Fut: Future<Output = Result<Profile, MojangError>>,
    {
        if id.is_empty() {
            return Err(MojangError::NoSuchProfile);
        }
        if let Some(e) = self.cache.get_id(id).await
            && sufficient(&e)
        {
            return Ok(hit(e));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(id, "cache miss");

        self.fetch_id(id, load).await
    }

    /// Loads `id` from the servers without reading the cache, then caches it.
    async fn fetch_id<'a, L, Fut>(&'a self, id: &'a str, load: L) -> Result<Profile, MojangError>
    where
        L: FnOnce(&'a MojangClient, &'a str) -> Fut,
        Fut: Future<Output = Result<Profile, MojangError>>,
    {
        let p = load(&self.client, id).await?;
        self.write_through(&p).await;
        Ok(p)
    }

    async fn write_through(&self, p: &Profile) {
        #[cfg(feature = "tracing")]
        tracing::debug!(id = p.id(), name = p.name(), "caching profile");

        self.cache.cache(CacheEntry::from(p)).await;
    }
}

fn hit(e: CacheEntry) -> Profile {
    #[cfg(feature = "tracing")]
    tracing::debug!(id = %e.id, name = %e.name, "cache hit");

    Profile::from(e)
}

impl<C: Cache> ProfileService for Store<C> {
    fn load_with_name_history<'a>(
        &'a self,
        id: &'a str,
        force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>> {
        Box::pin(async move {
            if force {
                self.fetch_id(id, profile::load_with_name_history).await
            } else {
                Store::load_with_name_history(self, id).await
            }
        })
    }

    fn load_with_properties<'a>(
        &'a self,
        id: &'a str,
        force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>> {
        Box::pin(async move {
            if force {
                self.fetch_id(id, profile::load_with_properties).await
            } else {
                Store::load_with_properties(self, id).await
            }
        })
    }
}
