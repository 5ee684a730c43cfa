use std::collections::HashSet;

use chrono::{DateTime, Utc};
use url::Url;

use super::{Profile, builder};
use crate::cache::fold_name;
use crate::core::{MojangClient, MojangError, net};

/// The maximum number of profiles [`load_many`] accepts at once.
pub const LOAD_MANY_MAX_SIZE: usize = 100;

/// Fetches the profile currently associated with `name`.
///
/// # Errors
///
/// Returns [`MojangError::NoSuchProfile`] if no profile uses `name`, or if it
/// belongs to a demo account. An empty `name` fails without a request.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn load(client: &MojangClient, name: &str) -> Result<Profile, MojangError> {
    if name.is_empty() {
        return Err(MojangError::NoSuchProfile);
    }
    let url = name_url(client, name)?;
    load_by_name(client, url).await
}

/// Fetches the profile that was associated with `name` at instant `at`.
///
/// The name is resolved to whichever account owned it at `at`; the returned
/// profile carries that account's current name, not the one it had back then.
///
/// # Errors
///
/// Returns [`MojangError::NoSuchProfile`] if no profile used `name` at `at`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn load_at_time(
    client: &MojangClient,
    name: &str,
    at: DateTime<Utc>,
) -> Result<Profile, MojangError> {
    if name.is_empty() {
        return Err(MojangError::NoSuchProfile);
    }
    let mut url = name_url(client, name)?;
    url.query_pairs_mut()
        .append_pair("at", &at.timestamp().to_string());
    load_by_name(client, url).await
}

async fn load_by_name(client: &MojangClient, url: Url) -> Result<Profile, MojangError> {
    let raw = net::fetch_json(client, url.clone())
        .await
        .map_err(transform_error)?;

    let mut p = Profile::default();
    let registered =
        builder::fill_profile(&mut p, raw).map_err(|e| MojangError::parse(url.as_str(), e))?;
    if !registered {
        return Err(MojangError::NoSuchProfile);
    }
    Ok(p)
}

/// Fetches the profile identified by `id`. Same as [`load_with_name_history`].
///
/// # Errors
///
/// Returns [`MojangError::NoSuchProfile`] if no profile is identified by `id`.
pub async fn load_by_id(client: &MojangClient, id: &str) -> Result<Profile, MojangError> {
    load_with_name_history(client, id).await
}

/// Fetches the profile identified by `id` including its name history.
///
/// # Errors
///
/// Returns [`MojangError::NoSuchProfile`] if no profile is identified by `id`.
/// An empty `id` fails without a request. An empty name change log is also
/// reported as [`MojangError::NoSuchProfile`] rather than as a profile without
/// a name.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn load_with_name_history(
    client: &MojangClient,
    id: &str,
) -> Result<Profile, MojangError> {
    if id.is_empty() {
        return Err(MojangError::NoSuchProfile);
    }
    let url = endpoint(client.api_base(), &["user", "profiles", id, "names"])?;
    let raw = net::fetch_json(client, url.clone())
        .await
        .map_err(transform_error)?;

    let (name, hist) =
        builder::build_history(raw).map_err(|e| MojangError::parse(url.as_str(), e))?;
    if hist.is_none() {
        // An empty change log names nobody.
        return Err(MojangError::NoSuchProfile);
    }
    let mut p = Profile::new(id, name);
    p.set_name_history(hist);
    Ok(p)
}

/// Fetches the profile identified by `id` including its skin, cape and model.
///
/// NB! The session server only answers a given profile once per minute.
///
/// # Errors
///
/// Returns [`MojangError::NoSuchProfile`] if no profile is identified by `id`.
/// If the textures cannot be decoded the whole load fails with
/// [`MojangError::Parse`] carrying the decode error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client), err))]
pub async fn load_with_properties(client: &MojangClient, id: &str) -> Result<Profile, MojangError> {
    if id.is_empty() {
        return Err(MojangError::NoSuchProfile);
    }
    let url = endpoint(client.session_base(), &["session", "minecraft", "profile", id])?;
    let raw = net::fetch_json(client, url.clone())
        .await
        .map_err(transform_error)?;

    let parse_err = |e| MojangError::parse(url.as_str(), e);
    let mut p = Profile::default();
    if !builder::fill_profile(&mut p, raw.clone()).map_err(parse_err)? {
        return Err(MojangError::NoSuchProfile);
    }
    let props = builder::build_properties(raw).map_err(parse_err)?;
    p.set_properties(Some(props));
    Ok(p)
}

/// Fetches several profiles by their current usernames in one request.
///
/// Empty names are dropped. Names not associated with a profile, and demo
/// accounts, are absent from the result. Each profile appears at most once
/// regardless of how many times its name was given.
///
/// # Errors
///
/// Returns [`MojangError::MaxSizeExceeded`] without a request if more than
/// [`LOAD_MANY_MAX_SIZE`] names are given.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub async fn load_many<I, S>(client: &MojangClient, names: I) -> Result<Vec<Profile>, MojangError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names = bulk_names(names)?;
    fetch_many(client, &names).await
}

/// Validates and normalizes the input of a bulk load: checks the size limit,
/// drops empty names and collapses case-insensitive duplicates.
pub(crate) fn bulk_names<I, S>(names: I) -> Result<Vec<String>, MojangError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: Vec<S> = names.into_iter().collect();
    if names.len() > LOAD_MANY_MAX_SIZE {
        return Err(MojangError::MaxSizeExceeded { size: names.len() });
    }

    let mut seen = HashSet::new();
    Ok(names
        .iter()
        .map(AsRef::as_ref)
        .filter(|n| !n.is_empty() && seen.insert(fold_name(n)))
        .map(str::to_string)
        .collect())
}

pub(crate) async fn fetch_many(
    client: &MojangClient,
    names: &[String],
) -> Result<Vec<Profile>, MojangError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let url = endpoint(client.api_base(), &["profiles", "minecraft"])?;
    let raw = net::exchange_json(client, url.clone(), names)
        .await
        .map_err(transform_error)?;

    let mut profiles =
        builder::build_profiles(raw).map_err(|e| MojangError::parse(url.as_str(), e))?;
    let mut ids = HashSet::new();
    profiles.retain(|p| ids.insert(p.id().to_string()));
    Ok(profiles)
}

fn name_url(client: &MojangClient, name: &str) -> Result<Url, MojangError> {
    endpoint(client.api_base(), &["users", "profiles", "minecraft", name])
}

/// Appends percent-encoded path segments to `base`.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, MojangError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps transport failures with a profile-specific meaning onto their own kinds.
fn transform_error(err: MojangError) -> MojangError {
    match err {
        MojangError::FailedRequest { status: 204 | 404, .. } => MojangError::NoSuchProfile,
        MojangError::FailedRequest { status: 429, .. } => MojangError::TooManyRequests,
        MojangError::FailedRequest {
            error_code: Some(ref code),
            ..
        } if code == "TooManyRequestsException" => MojangError::TooManyRequests,
        other => other,
    }
}
