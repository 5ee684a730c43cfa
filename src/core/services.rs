use futures::future::BoxFuture;

use crate::core::{MojangClient, MojangError};
use crate::profile::{self, Profile};

/// A source of by-ID profile loads.
///
/// This is what [`Profile::load_name_history`] and [`Profile::load_properties`]
/// refresh through. It is implemented by [`MojangClient`], which always goes to
/// the network, and by [`crate::cache::Store`], which consults and populates its
/// cache first.
///
/// With `force` set, an implementation must not answer from anything it
/// remembers; the profile is requested from the servers.
pub trait ProfileService: Send + Sync {
    /// Loads the profile identified by `id` including its name history.
    fn load_with_name_history<'a>(
        &'a self,
        id: &'a str,
        force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>>;

    /// Loads the profile identified by `id` including its properties.
    fn load_with_properties<'a>(
        &'a self,
        id: &'a str,
        force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>>;
}

impl ProfileService for MojangClient {
    fn load_with_name_history<'a>(
        &'a self,
        id: &'a str,
        _force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>> {
        Box::pin(profile::load_with_name_history(self, id))
    }

    fn load_with_properties<'a>(
        &'a self,
        id: &'a str,
        _force: bool,
    ) -> BoxFuture<'a, Result<Profile, MojangError>> {
        Box::pin(profile::load_with_properties(self, id))
    }
}
