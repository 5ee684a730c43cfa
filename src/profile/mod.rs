//! Minecraft profiles: identity, name history and textures.
//!
//! Profiles are looked up by username, by username at a past instant, by ID or
//! in bulk. Demo accounts are never returned; the Mojang API has historically
//! been inconsistent about including them, so they are filtered everywhere.
//!
//! The API is rate limited. Wrap the client in a [`crate::cache::Store`] to
//! avoid repeating requests.
//!
//! Internals are split into:
//! - `api`:     the load operations (request construction + error mapping)
//! - `builder`: JSON → profile values, no I/O
//! - `lazy`:    on-demand loading of name history and properties
//! - `wire`:    serde mapping of the response bodies

mod api;
mod builder;
mod lazy;
mod model;
mod shared;
mod texture;
mod wire;

pub use api::{
    LOAD_MANY_MAX_SIZE, load, load_at_time, load_by_id, load_many, load_with_name_history,
    load_with_properties,
};
pub use model::{Model, PastName, Profile, Properties};
pub use shared::SharedProfile;

pub(crate) use api::{bulk_names, fetch_many};
