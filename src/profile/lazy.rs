use super::{PastName, Profile, Properties};
use crate::core::{MojangError, ProfileService};

impl Profile {
    /// Loads and returns the profile's past usernames.
    ///
    /// The history is only requested if it is not loaded yet, or if `force`
    /// is set. A successful load also refreshes the current name. On failure
    /// the profile is left exactly as it was, so [`Profile::name_history`]
    /// still reports whatever was known before.
    ///
    /// Pass a [`crate::cache::Store`] as `service` to refresh through its cache.
    /// A forced load bypasses the store's cache but still updates it.
    ///
    /// # Errors
    ///
    /// Returns [`MojangError::IdNotSet`] if the profile has no ID, otherwise
    /// whatever the load reports.
    pub async fn load_name_history<S>(
        &mut self,
        service: &S,
        force: bool,
    ) -> Result<Vec<PastName>, MojangError>
    where
        S: ProfileService + ?Sized,
    {
        if let (Some(hist), false) = (self.name_history(), force) {
            return Ok(hist.to_vec());
        }
        if self.id().is_empty() {
            return Err(MojangError::IdNotSet);
        }

        let (_, name, hist, _) = service
            .load_with_name_history(self.id(), force)
            .await?
            .into_parts();
        self.set_name(name);
        self.set_name_history(hist);
        Ok(self.name_history().map(<[_]>::to_vec).unwrap_or_default())
    }

    /// Loads and returns the profile's skin, cape and model.
    ///
    /// Follows the same rules as [`Profile::load_name_history`].
    ///
    /// NB! The session server only answers a given profile once per minute.
    ///
    /// # Errors
    ///
    /// Returns [`MojangError::IdNotSet`] if the profile has no ID, otherwise
    /// whatever the load reports.
    pub async fn load_properties<S>(
        &mut self,
        service: &S,
        force: bool,
    ) -> Result<Properties, MojangError>
    where
        S: ProfileService + ?Sized,
    {
        if let (Some(props), false) = (self.properties(), force) {
            return Ok(props.clone());
        }
        if self.id().is_empty() {
            return Err(MojangError::IdNotSet);
        }

        let (_, name, _, props) = service
            .load_with_properties(self.id(), force)
            .await?
            .into_parts();
        self.set_name(name);
        self.set_properties(props);
        Ok(self.properties().cloned().unwrap_or_default())
    }
}
