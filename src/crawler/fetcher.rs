//! HTTP page fetching
//!
//! - Relative locators resolved against the site base URL
//! - Retries with exponential backoff on transient failures
//! - A politeness pause after every successful fetch

use crate::config::{ScrapingConfig, SiteConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid base URL {url}: {source}")]
    InvalidBase { url: String, source: url::ParseError },

    #[error("Cannot resolve locator {locator}: {source}")]
    InvalidLocator {
        locator: String,
        source: url::ParseError,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request failed for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Anything that can turn a page locator into page HTML
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client from the scraping configuration
pub fn build_http_client(config: &ScrapingConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout())
        .connect_timeout(config.timeout().min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages of one documentation site over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    max_retries: u32,
    retry_delay: Duration,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(site: &SiteConfig, scraping: &ScrapingConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&site.base_url).map_err(|source| FetchError::InvalidBase {
            url: site.base_url.clone(),
            source,
        })?;

        Ok(Self {
            client: build_http_client(scraping)?,
            base_url,
            max_retries: scraping.max_retries,
            retry_delay: Duration::from_millis(scraping.retry_delay_ms),
            delay: scraping.delay(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a page locator against the base URL
    pub fn resolve(&self, locator: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(locator)
            .map_err(|source| FetchError::InvalidLocator {
                locator: locator.to_string(),
                source,
            })
    }

    async fn fetch_url(&self, url: &Url) -> Result<String, FetchError> {
        let mut attempt: u32 = 0;

        loop {
            let retrying = attempt < self.max_retries;

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.text().await.map_err(|source| FetchError::Request {
                            url: url.to_string(),
                            source,
                        });
                    }

                    if !(retrying && is_retryable_status(status)) {
                        return Err(FetchError::Status {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    }

                    tracing::warn!(
                        "HTTP {} for {} (attempt {}/{}), retrying",
                        status.as_u16(),
                        url,
                        attempt + 1,
                        self.max_retries + 1
                    );
                }
                Err(source) => {
                    if !(retrying && is_retryable_error(&source)) {
                        return Err(FetchError::Request {
                            url: url.to_string(),
                            source,
                        });
                    }

                    tracing::warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        url,
                        attempt + 1,
                        self.max_retries + 1,
                        source
                    );
                }
            }

            tokio::time::sleep(backoff_delay(self.retry_delay, attempt)).await;
            attempt += 1;
        }
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<String, FetchError> {
        let url = self.resolve(locator)?;
        tracing::debug!("Fetching {}", url);

        let body = self.fetch_url(&url).await?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(body)
    }
}

/// Delay before retry number `attempt + 1`: base * 2^attempt plus a small jitter
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponent = attempt.min(8);
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let scaled = base_ms.saturating_mul(1u64 << exponent);
    let jitter = (u64::from(attempt) * 17 + 31) % 97;
    Duration::from_millis(scaled.saturating_add(jitter))
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(base_url: &str) -> SiteConfig {
        SiteConfig {
            base_url: base_url.to_string(),
            listing_page: "annotated.html".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&ScrapingConfig::default()).is_ok());
    }

    #[test]
    fn test_resolve_locator() {
        let fetcher =
            HttpFetcher::new(&site("https://docs.example.com/api/ja/"), &ScrapingConfig::default())
                .unwrap();

        let url = fetcher.resolve("class_sharp_kmy_audio_1_1_sound.html").unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.example.com/api/ja/class_sharp_kmy_audio_1_1_sound.html"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpFetcher::new(&site("not a url"), &ScrapingConfig::default());
        assert!(matches!(result, Err(FetchError::InvalidBase { .. })));
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let base = Duration::from_millis(100);
        let first = backoff_delay(base, 0);
        let second = backoff_delay(base, 1);
        let third = backoff_delay(base, 2);

        assert!(first >= Duration::from_millis(100) && first < Duration::from_millis(200));
        assert!(second >= Duration::from_millis(200) && second < Duration::from_millis(300));
        assert!(third >= Duration::from_millis(400) && third < Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_is_capped() {
        let base = Duration::from_millis(1);
        let capped = backoff_delay(base, 20);
        assert!(capped >= Duration::from_millis(256));
        assert!(capped < Duration::from_millis(256 + 97));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
