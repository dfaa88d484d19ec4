//! In-memory model of a scanned site.
//!
//! Pages and resources are each stored once, in URI-ordered indexes owned by [`SiteGraph`].
//! Relationships between them (a page's links and resources) are held as URI keys into those
//! indexes, so cyclic link structures never require cyclic ownership.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntity {
    pub uri: String,
    pub reference_count: u32,
    /// In-site pages linked from this page.
    pub links: BTreeSet<String>,
    pub external_links: BTreeSet<String>,
    pub resources: BTreeSet<String>,
}

impl PageEntity {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reference_count: 0,
            links: BTreeSet::new(),
            external_links: BTreeSet::new(),
            resources: BTreeSet::new(),
        }
    }

    pub fn inc_references(&mut self) {
        self.reference_count += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntity {
    pub uri: String,
    pub reference_count: u32,
}

impl ResourceEntity {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reference_count: 0,
        }
    }

    pub fn inc_references(&mut self) {
        self.reference_count += 1;
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteGraph {
    pub domain: String,
    homepage: Option<String>,
    page_index: BTreeMap<String, PageEntity>,
    resource_index: BTreeMap<String, ResourceEntity>,
}

impl SiteGraph {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Forget every page, resource and the homepage. The domain is kept.
    pub fn clear(&mut self) {
        self.homepage = None;
        self.page_index.clear();
        self.resource_index.clear();
    }

    pub fn get_page(&self, uri: &str) -> Option<&PageEntity> {
        self.page_index.get(uri)
    }

    pub fn get_page_mut(&mut self, uri: &str) -> Option<&mut PageEntity> {
        self.page_index.get_mut(uri)
    }

    /// Insert `page` under its URI. The first page registered for a URI wins; later attempts
    /// return `false` and leave the index untouched.
    pub fn register_page(&mut self, page: PageEntity) -> bool {
        if self.page_index.contains_key(&page.uri) {
            return false;
        }
        self.page_index.insert(page.uri.clone(), page);
        true
    }

    pub fn get_resource(&self, uri: &str) -> Option<&ResourceEntity> {
        self.resource_index.get(uri)
    }

    /// Existing resource for `uri`, or a fresh one with no references.
    pub fn get_or_create_resource(&mut self, uri: &str) -> &mut ResourceEntity {
        self.resource_index
            .entry(uri.to_string())
            .or_insert_with(|| ResourceEntity::new(uri))
    }

    pub fn set_homepage(&mut self, uri: Option<String>) {
        self.homepage = uri;
    }

    pub fn homepage(&self) -> Option<&PageEntity> {
        self.homepage.as_deref().and_then(|uri| self.get_page(uri))
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageEntity> {
        self.page_index.values()
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceEntity> {
        self.resource_index.values()
    }

    pub fn page_count(&self) -> usize {
        self.page_index.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resource_index.len()
    }

    /// Pages linked from `page`, in URI order.
    pub fn links_of<'a>(&'a self, page: &'a PageEntity) -> impl Iterator<Item = &'a PageEntity> {
        page.links.iter().filter_map(|uri| self.get_page(uri))
    }

    /// Resources referenced by `page`, in URI order.
    pub fn resources_of<'a>(
        &'a self,
        page: &'a PageEntity,
    ) -> impl Iterator<Item = &'a ResourceEntity> {
        page.resources
            .iter()
            .filter_map(|uri| self.resource_index.get(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_page_first_writer_wins() {
        let mut graph = SiteGraph::new("http://x.com/");
        let mut first = PageEntity::new("http://x.com/a.html");
        first.external_links.insert("http://other.com/".to_string());

        assert!(graph.register_page(first));
        assert!(!graph.register_page(PageEntity::new("http://x.com/a.html")));

        let stored = graph.get_page("http://x.com/a.html").unwrap();
        assert_eq!(stored.external_links.len(), 1);
        assert_eq!(graph.page_count(), 1);
    }

    #[test]
    fn test_get_page_does_not_create() {
        let graph = SiteGraph::new("http://x.com/");
        assert!(graph.get_page("http://x.com/missing.html").is_none());
        assert_eq!(graph.page_count(), 0);
    }

    #[test]
    fn test_get_or_create_resource_shares_entity() {
        let mut graph = SiteGraph::new("http://x.com/");
        graph.get_or_create_resource("http://x.com/logo.png").inc_references();
        graph.get_or_create_resource("http://x.com/logo.png").inc_references();

        assert_eq!(graph.resource_count(), 1);
        let logo = graph.get_resource("http://x.com/logo.png").unwrap();
        assert_eq!(logo.reference_count, 2);
    }

    #[test]
    fn test_new_resource_starts_unreferenced() {
        let mut graph = SiteGraph::new("http://x.com/");
        assert_eq!(graph.get_or_create_resource("http://x.com/a.css").reference_count, 0);
    }

    #[test]
    fn test_clear_resets_everything_but_domain() {
        let mut graph = SiteGraph::new("http://x.com/");
        graph.register_page(PageEntity::new("http://x.com/index.html"));
        graph.get_or_create_resource("http://x.com/a.css");
        graph.set_homepage(Some("http://x.com/index.html".to_string()));
        assert!(graph.homepage().is_some());

        graph.clear();

        assert!(graph.homepage().is_none());
        assert_eq!(graph.page_count(), 0);
        assert_eq!(graph.resource_count(), 0);
        assert_eq!(graph.domain, "http://x.com/");
    }

    #[test]
    fn test_links_of_follows_index_in_uri_order() {
        let mut graph = SiteGraph::new("http://x.com/");
        let mut home = PageEntity::new("http://x.com/index.html");
        home.links.insert("http://x.com/z.html".to_string());
        home.links.insert("http://x.com/b.html".to_string());
        graph.register_page(PageEntity::new("http://x.com/z.html"));
        graph.register_page(PageEntity::new("http://x.com/b.html"));
        graph.register_page(home);

        let home = graph.get_page("http://x.com/index.html").unwrap();
        let linked: Vec<&str> = graph.links_of(home).map(|p| p.uri.as_str()).collect();
        assert_eq!(linked, vec!["http://x.com/b.html", "http://x.com/z.html"]);
    }
}
