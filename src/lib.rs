//! mojang-rs: async client for the public Mojang profile API.
//!
//! Look up Minecraft profiles by username or ID, load their name history and
//! skin/cape textures, and put a [`Cache`] in front of the rate limited API.
//!
//! ```no_run
//! # async fn run() -> Result<(), mojang_rs::MojangError> {
//! use mojang_rs::{MemoryCache, MojangClient, Store};
//!
//! let store = Store::new(MojangClient::default(), MemoryCache::new());
//! let mut p = store.load("Nergalic").await?;
//! let props = p.load_properties(&store, false).await?;
//! println!("{} uses the {} model", p, props.model);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod core;
pub mod profile;
pub mod versions;

pub use cache::{Cache, CacheEntry, MemoryCache, Store};
pub use crate::core::{MojangClient, MojangClientBuilder, MojangError, ParseError, ProfileService};
pub use profile::{LOAD_MANY_MAX_SIZE, Model, PastName, Profile, Properties, SharedProfile};
pub use versions::Listing;
