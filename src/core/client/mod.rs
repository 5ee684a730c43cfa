//! Public client surface + builder.
//! Default endpoints live in `constants`.

mod constants;

use crate::core::MojangError;
use constants::{
    DEFAULT_API_BASE, DEFAULT_SESSION_BASE, DEFAULT_TEXTURES_BASE, DEFAULT_VERSIONS_URL,
    USER_AGENT,
};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Handle to the Mojang web services.
///
/// The client is cheap to clone; clones share the underlying connection pool.
/// Every load operation takes a client explicitly, so several differently
/// configured clients can coexist in one process.
#[derive(Debug, Clone)]
pub struct MojangClient {
    http: Client,
    api_base: Url,
    session_base: Url,
    versions_url: Url,
    textures_base: Url,
}

impl Default for MojangClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl MojangClient {
    /// Create a new builder.
    pub fn builder() -> MojangClientBuilder {
        MojangClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn api_base(&self) -> &Url {
        &self.api_base
    }
    pub(crate) fn session_base(&self) -> &Url {
        &self.session_base
    }
    pub(crate) fn versions_url(&self) -> &Url {
        &self.versions_url
    }
    pub(crate) fn textures_base(&self) -> &Url {
        &self.textures_base
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct MojangClientBuilder {
    user_agent: Option<String>,
    api_base: Option<Url>,
    session_base: Option<Url>,
    versions_url: Option<Url>,
    textures_base: Option<Url>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl MojangClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the account API base (e.g., `https://api.mojang.com/`).
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the session server base (e.g., `https://sessionserver.mojang.com/`).
    pub fn session_base(mut self, url: Url) -> Self {
        self.session_base = Some(url);
        self
    }

    /// Override the full URL of the version manifest.
    pub fn versions_url(mut self, url: Url) -> Self {
        self.versions_url = Some(url);
        self
    }

    /// Override the base the default skin textures are fetched from.
    pub fn textures_base(mut self, url: Url) -> Self {
        self.textures_base = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    ///
    /// An expired deadline surfaces as [`MojangError::Http`]; see
    /// [`MojangError::is_timeout`].
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<MojangClient, MojangError> {
        let api_base = match self.api_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_API_BASE)?,
        };
        let session_base = match self.session_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_SESSION_BASE)?,
        };
        let versions_url = match self.versions_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_VERSIONS_URL)?,
        };
        let textures_base = match self.textures_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_TEXTURES_BASE)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(MojangClient {
            http,
            api_base,
            session_base,
            versions_url,
            textures_base,
        })
    }
}
