//! Turns decoded response JSON into profile values. No I/O happens here.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::wire::{NameNode, PropertiesEnvelope, PropertyNode, ProfileNode, TexturesPayload};
use super::{Model, PastName, Profile, Properties};
use crate::core::ParseError;

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T, ParseError> {
    serde_json::from_value(raw).map_err(ParseError::unknown)
}

/// Fills out `p` with the basics found in `raw`, an object with string `id`
/// and `name` and optional boolean `demo` and `legacy` fields.
///
/// Returns `Ok(false)` without touching `p` if `raw` describes a demo account.
pub(crate) fn fill_profile(p: &mut Profile, raw: Value) -> Result<bool, ParseError> {
    let node: ProfileNode = decode(raw)?;
    Ok(fill_from_node(p, node))
}

fn fill_from_node(p: &mut Profile, node: ProfileNode) -> bool {
    if node.demo {
        return false;
    }

    // Legacy accounts never migrated to Mojang accounts, and only those can
    // change their username.
    if node.legacy && p.name_history().is_none() {
        p.set_name_history(Some(Vec::new()));
    }

    p.set_identity(node.id, node.name);
    true
}

/// Builds the profiles of a bulk lookup response, skipping demo accounts.
pub(crate) fn build_profiles(raw: Value) -> Result<Vec<Profile>, ParseError> {
    let nodes: Vec<ProfileNode> = decode(raw)?;
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let mut p = Profile::default();
        if fill_from_node(&mut p, node) {
            out.push(p);
        }
    }
    Ok(out)
}

/// Splits a name change log into the current name and the past names.
///
/// The log lists the current name first, followed by the names it replaced,
/// most recent first. Each past entry's `changedToAt` (ms since the epoch) is
/// the instant its successor was taken into use. The returned history is
/// ascending: earliest superseded name first.
///
/// An empty log yields `("", None)`; a log holding only the current name yields
/// an empty history.
pub(crate) fn build_history(raw: Value) -> Result<(String, Option<Vec<PastName>>), ParseError> {
    let nodes: Vec<NameNode> = decode(raw)?;
    let mut nodes = nodes.into_iter();

    let Some(current) = nodes.next() else {
        return Ok((String::new(), None));
    };

    let mut hist = nodes
        .map(|n| {
            let until = n.changed_to_at.map(ms_to_time).transpose()?;
            Ok(PastName::new(n.name, until))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    hist.reverse();

    Ok((current.name, Some(hist)))
}

fn ms_to_time(ms: i64) -> Result<DateTime<Utc>, ParseError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| ParseError::UnknownFormat(format!("changedToAt out of range: {ms}")))
}

/// Builds the properties of a profile from the `properties` array of a session
/// server response. Unknown property names are ignored.
pub(crate) fn build_properties(raw: Value) -> Result<Properties, ParseError> {
    let PropertiesEnvelope { properties } = decode(raw)?;
    aggregate_properties(properties)
}

fn aggregate_properties(props: Vec<PropertyNode>) -> Result<Properties, ParseError> {
    let mut out = Properties::default();
    for prop in props {
        if prop.name == "textures" {
            populate_textures(&prop.value, &mut out)?;
        }
    }
    Ok(out)
}

/// Decodes the base64 `textures` property and copies skin, cape and model into `props`.
pub(crate) fn populate_textures(encoded: &str, props: &mut Properties) -> Result<(), ParseError> {
    let bytes = STANDARD.decode(encoded)?;
    let payload: TexturesPayload = serde_json::from_slice(&bytes)?;

    match payload.textures.skin {
        Some(skin) => {
            let slim = skin
                .metadata
                .and_then(|m| m.model)
                .is_some_and(|m| m == "slim");
            props.model = if slim { Model::Alex } else { Model::Steve };
            props.skin_url = Some(skin.url);
        }
        None => {
            let id = payload.profile_id.ok_or_else(|| {
                ParseError::UnknownFormat("textures without SKIN lack profileId".into())
            })?;
            props.model = Model::for_id(&id)?;
            props.skin_url = None;
        }
    }

    if let Some(cape) = payload.textures.cape {
        props.cape_url = Some(cape.url);
    }

    Ok(())
}
