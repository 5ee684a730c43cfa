use reqwest::StatusCode;
use thiserror::Error;

use crate::profile::LOAD_MANY_MAX_SIZE;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum MojangError {
    /// No profile is associated with the requested name, ID or instant.
    ///
    /// Demo accounts are reported this way too, as are empty names and IDs.
    #[error("no such profile")]
    NoSuchProfile,

    /// The client exceeded the request rate limit of the Mojang API.
    ///
    /// At the time of writing, the profile endpoints share a limit of 600
    /// requests per 10 minutes. Back off before trying again.
    #[error("request rate limit exceeded")]
    TooManyRequests,

    /// More profiles than [`LOAD_MANY_MAX_SIZE`] were requested in one bulk load.
    #[error("aggregate request size of {size} exceeded maximum of {max}", max = LOAD_MANY_MAX_SIZE)]
    MaxSizeExceeded {
        /// The number of profiles which were requested.
        size: usize,
    },

    /// The response did not have the expected shape.
    #[error("unexpected response format from {url}: {source}")]
    Parse {
        /// The endpoint that produced the response.
        url: String,
        /// What could not be decoded.
        #[source]
        source: ParseError,
    },

    /// The server answered with a non-success status code.
    ///
    /// `error_code` and `error_message` are taken from the JSON error envelope
    /// (`{"error": ..., "errorMessage": ...}`) when the body carries one.
    #[error("{} at {url}", failed_request_text(.status, .error_code, .error_message))]
    FailedRequest {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Service-specific error type, e.g. `IllegalArgumentException`.
        error_code: Option<String>,
        /// Human readable error message supplied by the service.
        error_message: Option<String>,
    },

    /// An error occurred during an HTTP request, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A lazy-load accessor was called on a profile without an ID.
    #[error("profile ID was not set")]
    IdNotSet,

    /// A cape texture was requested for a profile without a cape.
    #[error("profile has no cape")]
    NoCape,
}

impl MojangError {
    /// Returns true if this error was caused by a client deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    pub(crate) fn parse(url: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}

/// Why a response body could not be turned into domain values.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required field was missing or had the wrong JSON type.
    #[error("unknown JSON data format: {0}")]
    UnknownFormat(String),

    /// A body or an embedded payload was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// An embedded base64 payload could not be decoded.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// A profile ID contained something other than lowercase hex digits.
    #[error("invalid digit {digit:?} in profile ID {id:?}")]
    InvalidIdDigit {
        /// The offending ID.
        id: String,
        /// The first invalid character found.
        digit: char,
    },
}

impl ParseError {
    pub(crate) fn unknown(e: impl std::fmt::Display) -> Self {
        Self::UnknownFormat(e.to_string())
    }
}

fn failed_request_text(status: &u16, code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => match StatusCode::from_u16(*status) {
            Ok(s) => format!("{} {}", status, s.canonical_reason().unwrap_or_default()),
            Err(_) => status.to_string(),
        },
    }
}
