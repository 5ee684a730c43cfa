use std::sync::Arc;

use tokio::sync::Mutex;

use super::{PastName, Profile, Properties};
use crate::core::{MojangError, ProfileService};

/// A [`Profile`] shared between tasks.
///
/// Lazy loads on the same shared profile are serialized: each holds the
/// profile's lock until its result has been published, so no caller ever sees
/// a half-updated profile. Callers only ever receive copies.
#[derive(Debug, Clone, Default)]
pub struct SharedProfile {
    inner: Arc<Mutex<Profile>>,
}

impl SharedProfile {
    pub fn new(profile: Profile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(profile)),
        }
    }

    /// A copy of the profile as currently known.
    pub async fn snapshot(&self) -> Profile {
        self.inner.lock().await.clone()
    }

    /// See [`Profile::load_name_history`].
    pub async fn load_name_history<S>(
        &self,
        service: &S,
        force: bool,
    ) -> Result<Vec<PastName>, MojangError>
    where
        S: ProfileService + ?Sized,
    {
        let mut guard = self.inner.lock().await;
        guard.load_name_history(service, force).await
    }

    /// See [`Profile::load_properties`].
    pub async fn load_properties<S>(
        &self,
        service: &S,
        force: bool,
    ) -> Result<Properties, MojangError>
    where
        S: ProfileService + ?Sized,
    {
        let mut guard = self.inner.lock().await;
        guard.load_properties(service, force).await
    }
}

impl From<Profile> for SharedProfile {
    fn from(profile: Profile) -> Self {
        Self::new(profile)
    }
}
