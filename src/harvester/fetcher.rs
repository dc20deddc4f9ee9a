//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the shared HTTP client with the client identifier and timeout
//! - Building page URLs for the listing, profile, and activity pages
//! - Attaching `origin`/`referer` headers to every request
//! - Classifying failures into [`FetchError`]
//!
//! There is no retry: the caller decides what a failure means.

use crate::config::SourceConfig;
use reqwest::header::{ORIGIN, REFERER};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("{0}")]
    Network(String),
}

/// A failed page fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: FetchCause,
}

impl FetchError {
    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let cause = if error.is_timeout() {
            FetchCause::Timeout
        } else if error.is_connect() {
            FetchCause::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchCause::Body(error.to_string())
        } else {
            FetchCause::Network(error.to_string())
        };

        Self {
            url: url.to_string(),
            cause,
        }
    }
}

/// Page URLs of the judge
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    origin: String,
}

impl Endpoints {
    /// Creates endpoints rooted at `base_url`
    ///
    /// A path on the base URL is kept as a prefix for every page.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }
        let origin = base.origin().ascii_serialization();
        Ok(Self { base, origin })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The `origin` header value sent with every request
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{base}/users?page={page}`
    pub fn listing(&self, page: u32) -> Url {
        let mut url = self.page(&["users"]);
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }

    /// `{base}/users/{handle}`, with the handle percent-encoded
    pub fn profile(&self, handle: &str) -> Url {
        self.page(&["users", handle])
    }

    /// `{base}/submissions?filter_user_id={user_id}`
    pub fn activity(&self, user_id: &str) -> Url {
        let mut url = self.page(&["submissions"]);
        url.query_pairs_mut().append_pair("filter_user_id", user_id);
        url
    }

    fn page(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Builds the shared HTTP client
///
/// The client identifier becomes the `user-agent` header. A timeout of 0
/// disables the per-request timeout.
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.client_identifier.clone())
        .gzip(true)
        .brotli(true);

    if config.request_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
    }

    builder.build()
}

/// Fetches judge pages with the identifying header set
///
/// Cloning is cheap: the client and endpoints are shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    endpoints: Arc<Endpoints>,
}

impl Fetcher {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints: Arc::new(endpoints),
        }
    }

    /// Builds a fetcher from the `[source]` section of the config
    pub fn from_config(config: &SourceConfig) -> crate::Result<Self> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let client = build_http_client(config)?;
        Ok(Self::new(client, endpoints))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GETs `url` and returns the body text
    ///
    /// Any non-2xx status or transport failure is a [`FetchError`].
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(ORIGIN, self.endpoints.origin())
            .header(REFERER, url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} returned {}", url, status);
            return Err(FetchError {
                url: url.to_string(),
                cause: FetchCause::Status(status.as_u16()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}
