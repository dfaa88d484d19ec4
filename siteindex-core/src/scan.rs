use indicatif::{ProgressBar, ProgressStyle};
use siteindex_scanner::config::{
    DEFAULT_LINK_TEMPLATES, DEFAULT_RESOURCE_TEMPLATES, DEFAULT_TIMEOUT_SECS,
};
use siteindex_scanner::{ScanError, ScannerConfig, SiteGraph, SiteScanner};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Options for configuring a scan
pub struct ScanOptions {
    pub homepage_url: String,
    /// Comma separated `tag.attribute` pairs naming page links.
    pub link_templates: String,
    /// Comma separated `tag.attribute` pairs naming embedded resources.
    pub resource_templates: String,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl ScanOptions {
    pub fn new(homepage_url: impl Into<String>) -> Self {
        Self {
            homepage_url: homepage_url.into(),
            link_templates: DEFAULT_LINK_TEMPLATES.to_string(),
            resource_templates: DEFAULT_RESOURCE_TEMPLATES.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting scan progress
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a scan with the given options
/// Returns the finished site graph
pub async fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<SiteGraph, ScanError> {
    let ScanOptions {
        homepage_url,
        link_templates,
        resource_templates,
        timeout_secs,
        show_progress_bars,
    } = options;

    let config = ScannerConfig::from_templates(&link_templates, &resource_templates)?
        .with_timeout(timeout_secs);

    // Spinner for overall scan progress (only if enabled)
    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map_err(|e| ScanError::ConfigError(e.to_string()))?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting scan...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut scanner = SiteScanner::new(config)?;
    if progress_bar.is_some() || progress_callback.is_some() {
        let pb_clone = progress_bar.clone();
        let callback_clone = progress_callback.clone();
        scanner = scanner.with_progress_callback(Arc::new(move |count: usize, uri: &str| {
            let message = format!("Scanning... {} pages: {}", count, extract_url_path(uri));
            if let Some(ref pb) = pb_clone {
                pb.set_message(message.clone());
            }
            if let Some(ref callback) = callback_clone {
                callback(message);
            }
        }));
    }

    let outcome = scanner.scan(&homepage_url).await;

    if let Some(ref pb) = progress_bar {
        match &outcome {
            Ok(graph) => pb.finish_with_message(format!(
                "Scan complete! {} pages, {} resources",
                graph.page_count(),
                graph.resource_count()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    if let Ok(ref graph) = outcome {
        info!(
            "Scanned {}: {} pages, {} resources",
            homepage_url,
            graph.page_count(),
            graph.resource_count()
        );
    }

    outcome
}
