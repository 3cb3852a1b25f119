use anyhow::Context;
use log::{debug, error};
use reqwest::{Client, ClientBuilder, Response};

use crate::{config::ScrapingConfig, errors::ScrapeError, ratelimit::RateLimiter};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RequestClient {
    pub fn new(config: &ScrapingConfig) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        let rate_limiter = RateLimiter::new(config.requests_per_sec);
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Timeouts, connection failures and non-2xx statuses all come back as
    /// [`ScrapeError::Network`].
    pub async fn fetch_url_response(&self, url: &str) -> Result<Response, ScrapeError> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        debug!("GET {url}");
        self.client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|source| network_error(url, source))
    }

    pub async fn fetch_url_body(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.fetch_url_response(url).await?;
        response
            .text()
            .await
            .map_err(|source| network_error(url, source))
    }
}

fn network_error(url: &str, source: reqwest::Error) -> ScrapeError {
    error!("Network error for {url}: {source}");
    ScrapeError::Network {
        url: url.to_string(),
        source,
    }
}
