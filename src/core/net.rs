//! JSON transport shared by every endpoint family.
//!
//! Requests never retry. Non-200 answers become [`MojangError::FailedRequest`]
//! carrying whatever the service put in its `{"error", "errorMessage"}` envelope;
//! callers decide what a given status means for their endpoint.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::core::{MojangClient, MojangError, ParseError};

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// GET `url` and decode the body as untyped JSON.
pub(crate) async fn fetch_json(client: &MojangClient, url: Url) -> Result<Value, MojangError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(%url, "GET");

    let resp = client.http().get(url.clone()).send().await?;
    read_json(resp, &url).await
}

/// POST `body` as JSON to `url` and decode the response as untyped JSON.
pub(crate) async fn exchange_json<B>(
    client: &MojangClient,
    url: Url,
    body: &B,
) -> Result<Value, MojangError>
where
    B: Serialize + ?Sized,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(%url, "POST");

    let resp = client.http().post(url.clone()).json(body).send().await?;
    read_json(resp, &url).await
}

/// GET `url` and return the raw body, e.g. a texture image.
pub(crate) async fn fetch_bytes(client: &MojangClient, url: Url) -> Result<Vec<u8>, MojangError> {
    let resp = client.http().get(url.clone()).send().await?;
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(failed_request(&url, status, None));
    }
    Ok(resp.bytes().await?.to_vec())
}

async fn read_json(resp: Response, url: &Url) -> Result<Value, MojangError> {
    let status = resp.status();
    let text = resp.text().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(%url, status = status.as_u16(), bytes = text.len(), "response");

    if status != StatusCode::OK {
        let envelope = serde_json::from_str::<ErrorEnvelope>(&text).ok();
        return Err(failed_request(url, status, envelope));
    }

    serde_json::from_str(&text).map_err(|e| MojangError::parse(url.as_str(), ParseError::Json(e)))
}

fn failed_request(url: &Url, status: StatusCode, envelope: Option<ErrorEnvelope>) -> MojangError {
    let (error_code, error_message) = envelope
        .map(|e| (e.error, e.error_message))
        .unwrap_or_default();
    MojangError::FailedRequest {
        url: url.to_string(),
        status: status.as_u16(),
        error_code,
        error_message,
    }
}
