use crate::{config::ScrapingConfig, requests::RequestClient};

/// Holds the one HTTP client used for the whole run; dropping the context
/// releases its connection pool.
pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        Self::with_config(scraping_config)
    }

    pub fn with_config(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let request_client = RequestClient::new(&scraping_config)?;
        Ok(ScrapingContext {
            scraping_config,
            request_client,
        })
    }
}
