use crate::config::ScannerConfig;
use crate::error::{FetchError, Result, ScanError};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::graph::{PageEntity, SiteGraph};
use crate::resolver::{AbsoluteRef, domain_of, reference_base};
use std::collections::{BTreeSet, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Called once per page fetched, with the running page count and the page URI.
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

type ScanFuture<'s> = Pin<Box<dyn Future<Output = Result<Option<String>>> + 's>>;

/// Launches site scans. Every call to [`SiteScanner::scan`] runs with fresh state, so one
/// scanner can be reused for many sites.
pub struct SiteScanner<F = HttpFetcher> {
    fetcher: F,
    config: ScannerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl SiteScanner<HttpFetcher> {
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetcher> SiteScanner<F> {
    pub fn with_fetcher(config: ScannerConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            config,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Scan the site containing `homepage_url`, starting from that page.
    ///
    /// A transport failure anywhere in the traversal discards the partially built graph and
    /// is returned as the error.
    pub async fn scan(&self, homepage_url: &str) -> Result<SiteGraph> {
        let domain = domain_of(Some(homepage_url));
        if domain.is_empty() {
            return Err(ScanError::InvalidUrl(format!(
                "'{}' is not an absolute http(s) URL with a path",
                homepage_url
            )));
        }

        let mut task = ScanTask {
            fetcher: &self.fetcher,
            config: &self.config,
            progress_callback: self.progress_callback.as_ref(),
            graph: SiteGraph::new(domain),
            known_non_page_uris: HashSet::new(),
            pages_scanned: 0,
        };

        let outcome = task.run(homepage_url).await;
        match outcome {
            Ok(()) => Ok(task.graph),
            Err(e) => {
                warn!("Scan of {} aborted: {}", homepage_url, e);
                Err(e)
            }
        }
    }
}

/// State of one scan. Owned by a single traversal, so the check-then-register steps below
/// never interleave with another fetch.
struct ScanTask<'a, F> {
    fetcher: &'a F,
    config: &'a ScannerConfig,
    progress_callback: Option<&'a ProgressCallback>,
    graph: SiteGraph,
    /// URIs already fetched and found not to be HTML pages.
    known_non_page_uris: HashSet<String>,
    pages_scanned: usize,
}

impl<'a, F: Fetcher> ScanTask<'a, F> {
    async fn run(&mut self, homepage_url: &str) -> Result<()> {
        self.graph.clear();
        self.known_non_page_uris.clear();

        info!("Scan commenced: {}", homepage_url);
        let homepage = self.scan_page(homepage_url.to_string()).await?;
        self.graph.set_homepage(homepage);
        info!(
            "Scan completed: {} ({} pages, {} resources)",
            homepage_url,
            self.graph.page_count(),
            self.graph.resource_count()
        );
        Ok(())
    }

    /// Scan one page and, recursively, every new in-site page it links to.
    ///
    /// Returns the page's URI key, or `None` when the URI is not a readable page.
    fn scan_page<'s>(&'s mut self, uri: String) -> ScanFuture<'s>
    where
        'a: 's,
        F: 's,
    {
        Box::pin(async move {
            if self.known_non_page_uris.contains(&uri) {
                debug!("Cannot retrieve page '{}'. Uri known not to contain HTML page.", uri);
                return Ok(None);
            }

            if let Some(existing) = self.graph.get_page_mut(&uri) {
                existing.inc_references();
                return Ok(Some(uri));
            }

            let fetched = self.fetcher.fetch(&uri).await;
            let doc = match fetched {
                Ok(doc) => doc,
                Err(FetchError::Status(code)) => {
                    debug!("Could not retrieve page '{}'. Status Code: {}", uri, code);
                    self.known_non_page_uris.insert(uri);
                    return Ok(None);
                }
                Err(FetchError::UnsupportedContentType(mime)) => {
                    debug!("Could not retrieve page '{}'. with mimetype: {}", uri, mime);
                    self.known_non_page_uris.insert(uri);
                    return Ok(None);
                }
                Err(FetchError::Transport(e)) => return Err(ScanError::HttpError(e)),
            };

            info!("Scanning page: {}", uri);
            self.pages_scanned += 1;
            if let Some(callback) = self.progress_callback {
                callback(self.pages_scanned, &uri);
            }

            // Registered before following links so that cycles back to this page stop at the
            // lookup above instead of fetching it again.
            self.graph.register_page(PageEntity::new(uri.clone()));

            let base = reference_base(&uri).to_string();
            let domain = self.graph.domain.clone();
            let own_ref = AbsoluteRef::resolve(&uri, "", &domain);

            let mut external_links = BTreeSet::new();
            let mut resources = BTreeSet::new();
            let mut links_to_scan = Vec::new();

            for template in &self.config.link_templates {
                for value in template.values(&doc) {
                    let link = AbsoluteRef::resolve(&base, value, &domain);
                    debug!(
                        "{}.{}: {} {}",
                        template.tag,
                        template.attr,
                        link.site_reference_description(),
                        link.resolved_uri
                    );
                    if !link.is_site_reference {
                        external_links.insert(link.resolved_uri);
                    } else if !link.same_target(&own_ref) {
                        links_to_scan.push(link.resolved_uri);
                    }
                }
            }

            for template in &self.config.resource_templates {
                for value in template.values(&doc) {
                    let resource = AbsoluteRef::resolve(&base, value, &domain);
                    debug!(
                        "{}.{}: {} {}",
                        template.tag,
                        template.attr,
                        resource.site_reference_description(),
                        resource.resolved_uri
                    );
                    self.graph
                        .get_or_create_resource(&resource.resolved_uri)
                        .inc_references();
                    resources.insert(resource.resolved_uri);
                }
            }
            drop(doc);

            if let Some(registered) = self.graph.get_page_mut(&uri) {
                registered.external_links = external_links;
                registered.resources = resources;
            }

            for link in links_to_scan {
                if link.trim().is_empty() {
                    continue;
                }
                // Pages already in the graph are counted and returned without another fetch.
                let linked = self.scan_page(link).await?;
                if let Some(linked) = linked
                    && let Some(registered) = self.graph.get_page_mut(&uri)
                {
                    registered.links.insert(linked);
                }
            }

            Ok(Some(uri))
        })
    }
}
