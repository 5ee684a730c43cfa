//! Centralized constants for default endpoints and UA.

pub(crate) const USER_AGENT: &str = concat!("mojang-rs/", env!("CARGO_PKG_VERSION"));

/// Mojang account API base (name lookups, name history, bulk lookups).
pub(crate) const DEFAULT_API_BASE: &str = "https://api.mojang.com/";

/// Session server base (profile + textures properties).
pub(crate) const DEFAULT_SESSION_BASE: &str = "https://sessionserver.mojang.com/";

/// Launcher version manifest.
pub(crate) const DEFAULT_VERSIONS_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Base for the default skin textures (`steve.png`, `alex.png` are appended).
pub(crate) const DEFAULT_TEXTURES_BASE: &str = "http://assets.mojang.com/SkinTemplates/";
