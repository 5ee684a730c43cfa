use super::Properties;
use crate::core::{MojangClient, MojangError, net};

impl Properties {
    /// Downloads the skin texture (PNG bytes).
    ///
    /// Without a custom skin, the default skin of `self.model` is fetched instead.
    ///
    /// # Errors
    ///
    /// Returns [`MojangError::FailedRequest`] if the texture server does not
    /// answer with 200 OK.
    pub async fn skin_bytes(&self, client: &MojangClient) -> Result<Vec<u8>, MojangError> {
        let url = match &self.skin_url {
            Some(u) => url::Url::parse(u)?,
            None => client.textures_base().join(self.model.default_skin_file())?,
        };
        net::fetch_bytes(client, url).await
    }

    /// Downloads the cape texture (PNG bytes).
    ///
    /// # Errors
    ///
    /// Returns [`MojangError::NoCape`] if the profile has no cape.
    pub async fn cape_bytes(&self, client: &MojangClient) -> Result<Vec<u8>, MojangError> {
        let url = self.cape_url.as_deref().ok_or(MojangError::NoCape)?;
        net::fetch_bytes(client, url::Url::parse(url)?).await
    }
}
