use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid tag template: {0}")]
    ConfigError(String),
}

/// Outcome of a single failed page fetch.
///
/// `Status` and `UnsupportedContentType` mean the URI is reachable but is not an HTML page;
/// the crawler drops such links and carries on. `Transport` aborts the scan.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
