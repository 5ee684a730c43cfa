//! The launcher's listing of Minecraft versions.
//!
//! Useful to tell whether the newest version of the game is installed.

mod model;
mod wire;

pub use model::{Latest, Listing, Version, VersionType};

use chrono::{DateTime, Utc};

use crate::core::{MojangClient, MojangError, ParseError, net};

/// Fetches the current version listing.
///
/// # Errors
///
/// Returns [`MojangError::Parse`] if the manifest does not have the expected
/// shape, or the transport error if it cannot be fetched.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn load(client: &MojangClient) -> Result<Listing, MojangError> {
    let url = client.versions_url().clone();
    let raw = net::fetch_json(client, url.clone()).await?;
    build_listing(raw).map_err(|e| MojangError::parse(url.as_str(), e))
}

fn build_listing(raw: serde_json::Value) -> Result<Listing, ParseError> {
    let manifest: wire::Manifest = serde_json::from_value(raw).map_err(ParseError::unknown)?;

    let versions = manifest
        .versions
        .into_iter()
        .map(|v| {
            let released = DateTime::parse_from_rfc3339(&v.release_time)
                .map_err(ParseError::unknown)?
                .with_timezone(&Utc);
            let version = Version {
                id: v.id,
                released,
                kind: VersionType::from_wire(&v.kind),
            };
            Ok((version.id.clone(), version))
        })
        .collect::<Result<_, ParseError>>()?;

    Ok(Listing {
        versions,
        latest: Latest {
            release: manifest.latest.release,
            snapshot: manifest.latest.snapshot,
        },
    })
}
