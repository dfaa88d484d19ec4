use crate::config::ScannerConfig;
use crate::error::{FetchError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::Html;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// Retrieves a URL and parses it as an HTML document, following redirects.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = std::result::Result<Html, FetchError>>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScannerConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(concat!("siteindex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Html, FetchError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        if let Some(content_type) = content_type
            && !is_supported_content_type(&content_type)
        {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body = response.text().await?;
        Ok(Html::parse_document(&body))
    }
}

/// Text and XML documents can be parsed for references. A response without a content type is
/// given the benefit of the doubt.
pub fn is_supported_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/") || mime == "application/xml" || mime.ends_with("+xml")
}
