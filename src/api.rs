//! Synchronous client for the **BLS Public Data API (v2)** timeseries endpoint.
//!
//! Two request styles are supported, both answered with the same [`Response`] shape:
//! - `GET {base}{seriesID}?registrationkey={key}` for a single series ([`Client::fetch_series`])
//! - `POST {base}` with a JSON [`TimeseriesQuery`] body ([`Client::fetch_query`])
//!
//! ### Notes
//! - The API reports rejected requests (bad key, exhausted quota, too many years) in-band
//!   through `status` and `message`, often with HTTP 200. A non-2xx status is therefore not
//!   an error here; the body is decoded either way.
//! - There is no retry. Each call performs exactly one request with an explicit timeout.
//!
//! Typical usage:
//! ```no_run
//! # use bls_rs::{Client, TimeseriesQuery};
//! let client = Client::default();
//! let single = client.fetch_series("CUUR0000SA0", "my-key")?;
//! let query = client.fetch_query(&TimeseriesQuery::with_defaults("my-key"))?;
//! # Ok::<(), bls_rs::FetchError>(())
//! ```
use crate::models::{Response, TimeseriesQuery};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::{Client as HttpClient, Response as HttpResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter carrying the access key on GET requests.
const REGISTRATION_KEY_PARAM: &str = "registrationkey";

/// Failure of a single executor call, one variant per failure category.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("error building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("error encoding request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("error making {method} request: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("error parsing JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    /// Endpoint root, always ending in `/`.
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in series ids
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

impl Client {
    /// Build a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .redirect(Policy::limited(5))
            .user_agent(concat!("bls_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url, http })
    }

    /// URL used by [`Client::fetch_series`]. The key is appended verbatim.
    pub fn series_url(&self, series_id: &str, registration_key: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url,
            percent_encoding::utf8_percent_encode(series_id.trim(), SAFE),
            REGISTRATION_KEY_PARAM,
            registration_key
        )
    }

    /// Fetch one series with a GET request.
    ///
    /// ### Errors
    /// - [`FetchError::Transport`] when the request cannot be sent or times out
    /// - [`FetchError::Body`] when the response body cannot be read in full
    /// - [`FetchError::Decode`] when the body is not a response document
    pub fn fetch_series(
        &self,
        series_id: &str,
        registration_key: &str,
    ) -> Result<Response, FetchError> {
        log::debug!("GET {}{}", self.base_url, series_id);
        let resp = self
            .http
            .get(self.series_url(series_id, registration_key))
            .send()
            .map_err(|source| FetchError::Transport {
                method: "GET",
                source,
            })?;
        read_response(resp)
    }

    /// Run a multi-series query with a POST request; the key travels in the body.
    ///
    /// Fails like [`Client::fetch_series`], plus [`FetchError::Encode`] if the payload
    /// cannot be serialized.
    pub fn fetch_query(&self, query: &TimeseriesQuery) -> Result<Response, FetchError> {
        let body = query_body(query)?;
        log::debug!(
            "POST {} (series {}, {}..{})",
            self.base_url,
            query.seriesid.join(","),
            query.startyear,
            query.endyear
        );
        let resp = self
            .http
            .post(self.base_url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|source| FetchError::Transport {
                method: "POST",
                source,
            })?;
        read_response(resp)
    }
}

/// Serialize a query to the JSON body sent by [`Client::fetch_query`].
pub fn query_body(query: &TimeseriesQuery) -> Result<Vec<u8>, FetchError> {
    serde_json::to_vec(query).map_err(FetchError::Encode)
}

/// Decode a raw response body.
pub fn decode_response(body: &[u8]) -> Result<Response, FetchError> {
    serde_json::from_slice(body).map_err(FetchError::Decode)
}

// Consumes the response so the connection is released on every path.
fn read_response(resp: HttpResponse) -> Result<Response, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        log::warn!("BLS API answered with HTTP {}", status);
    }
    let body = resp.bytes().map_err(FetchError::Body)?;
    log::debug!("HTTP {} with {} byte body", status, body.len());

    let decoded = decode_response(&body)?;
    if !decoded.is_success() {
        log::warn!(
            "BLS API status {:?}: {}",
            decoded.status,
            decoded.message.join("; ")
        );
    }
    Ok(decoded)
}
