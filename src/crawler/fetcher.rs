//! HTTP transport for search result pages
//!
//! The crawler only needs "URL in, body text out". [`HttpTransport`] is that
//! seam; [`HttpFetcher`] is the reqwest-backed implementation used in
//! production. Every request is attempted exactly once.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    Client,
};

use crate::config::CrawlerConfig;
use crate::utils::error::FetchError;

/// Fetch a URL and return its body as text
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url`
    ///
    /// # Errors
    ///
    /// Any network failure, timeout or non-2xx status is an error.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed page fetcher
pub struct HttpFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher from crawler settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(Self::build_headers(&config.user_agent))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Build default request headers
    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        }

        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        headers
    }
}

#[async_trait]
impl HttpTransport for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest)
    }
}

fn map_reqwest(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err)
    }
}
