use crate::error::{Result, ScanError};
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_LINK_TEMPLATES: &str = "a.href";
pub const DEFAULT_RESOURCE_TEMPLATES: &str = "img.src,script.src,link.href";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One `tag.attribute` pair naming where references live in a document.
#[derive(Debug, Clone)]
pub struct TagTemplate {
    pub tag: String,
    pub attr: String,
    selector: Selector,
}

impl TagTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let (tag, attr) = template
            .trim()
            .split_once('.')
            .map(|(tag, attr)| (tag.trim(), attr.trim()))
            .filter(|(tag, attr)| !tag.is_empty() && !attr.is_empty())
            .ok_or_else(|| {
                ScanError::ConfigError(format!("expected 'tag.attribute', got '{}'", template))
            })?;

        // Elements lacking the attribute carry no reference and are not selected.
        let selector = Selector::parse(&format!("{}[{}]", tag, attr))
            .map_err(|e| ScanError::ConfigError(format!("'{}': {}", template, e)))?;

        Ok(Self {
            tag: tag.to_string(),
            attr: attr.to_string(),
            selector,
        })
    }

    /// Parse a comma separated list of templates. Empty entries are ignored.
    pub fn parse_list(templates: &str) -> Result<Vec<Self>> {
        templates
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Attribute values of every matching element, in document order.
    pub fn values<'a>(&'a self, doc: &'a Html) -> impl Iterator<Item = &'a str> {
        doc.select(&self.selector)
            .filter_map(|element: ElementRef<'a>| element.value().attr(&self.attr))
    }
}

/// Explicit configuration handed to the scanner at construction.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub link_templates: Vec<TagTemplate>,
    pub resource_templates: Vec<TagTemplate>,
    pub timeout_secs: u64,
}

impl ScannerConfig {
    pub fn from_templates(links: &str, resources: &str) -> Result<Self> {
        Ok(Self {
            link_templates: TagTemplate::parse_list(links)?,
            resource_templates: TagTemplate::parse_list(resources)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_templates(DEFAULT_LINK_TEMPLATES, DEFAULT_RESOURCE_TEMPLATES)
            .expect("default templates are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template() {
        let template = TagTemplate::parse("img.src").unwrap();
        assert_eq!(template.tag, "img");
        assert_eq!(template.attr, "src");
    }

    #[test]
    fn test_parse_list_trims_and_skips_empty() {
        let templates = TagTemplate::parse_list(" img.src , script.src,,link.href ").unwrap();
        let pairs: Vec<(&str, &str)> = templates
            .iter()
            .map(|t| (t.tag.as_str(), t.attr.as_str()))
            .collect();
        assert_eq!(pairs, vec![("img", "src"), ("script", "src"), ("link", "href")]);
    }

    #[test]
    fn test_parse_rejects_malformed_template() {
        assert!(matches!(
            TagTemplate::parse("img"),
            Err(ScanError::ConfigError(_))
        ));
        assert!(matches!(
            TagTemplate::parse(".src"),
            Err(ScanError::ConfigError(_))
        ));
        assert!(matches!(
            TagTemplate::parse("img."),
            Err(ScanError::ConfigError(_))
        ));
    }

    #[test]
    fn test_values_in_document_order_skipping_missing_attribute() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a href="one.html">1</a>
                <a name="anchor">no href</a>
                <a href="two.html">2</a>
                <a href="">empty</a>
            </body></html>"#,
        );
        let template = TagTemplate::parse("a.href").unwrap();
        let values: Vec<&str> = template.values(&doc).collect();
        assert_eq!(values, vec!["one.html", "two.html", ""]);
    }

    #[test]
    fn test_default_config() {
        let config = ScannerConfig::default();
        assert_eq!(config.link_templates.len(), 1);
        assert_eq!(config.resource_templates.len(), 3);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
