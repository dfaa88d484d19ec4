pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod resolver;

pub use config::{ScannerConfig, TagTemplate};
pub use crawler::{ProgressCallback, SiteScanner};
pub use error::{FetchError, ScanError};
pub use fetch::{Fetcher, HttpFetcher};
pub use graph::{PageEntity, ResourceEntity, SiteGraph};
pub use resolver::AbsoluteRef;
