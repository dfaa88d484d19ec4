// Report generation from a finished site scan

use serde::{Deserialize, Serialize};
use siteindex_scanner::{PageEntity, ResourceEntity, SiteGraph};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEAVY_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Render `graph` in the requested format.
pub fn generate_report(graph: &SiteGraph, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(graph)),
        ReportFormat::Markdown => Ok(generate_markdown_report(graph)),
        ReportFormat::Html => Ok(generate_html_report(graph)),
        ReportFormat::Json => generate_json_report(graph),
    }
}

pub fn generate_text_report(graph: &SiteGraph) -> String {
    let mut report = String::new();

    // Header
    report.push_str(HEAVY_RULE);
    report.push_str("                              SITE INDEX REPORT\n");
    report.push_str(HEAVY_RULE);
    report.push('\n');

    report.push_str(&format!("Domain:       {}\n", graph.domain));
    report.push_str(&format!("Homepage:     {}\n", homepage_uri(graph)));
    report.push_str(&format!("Pages:        {}\n", graph.page_count()));
    report.push_str(&format!("Resources:    {}\n", graph.resource_count()));
    report.push_str(&format!("Generated:    {}\n", generated_at()));
    report.push('\n');

    if graph.page_count() > 0 {
        report.push_str(HEAVY_RULE);
        report.push_str("PAGES\n");
        report.push_str(HEAVY_RULE);
        report.push('\n');

        for (idx, page) in graph.pages().enumerate() {
            report.push_str(&format!("[{}] {}\n", idx + 1, page.uri));
            report.push_str(&format!("References:   {}\n", page.reference_count));

            push_text_list(
                &mut report,
                "Links",
                graph.links_of(page).map(|p| p.uri.as_str()),
            );
            push_text_list(
                &mut report,
                "External links",
                page.external_links.iter().map(String::as_str),
            );
            push_text_list(
                &mut report,
                "Resources",
                graph.resources_of(page).map(|r| r.uri.as_str()),
            );

            report.push('\n');
            report.push_str(LIGHT_RULE);
            report.push('\n');
        }
    }

    if graph.resource_count() > 0 {
        report.push_str(HEAVY_RULE);
        report.push_str("RESOURCES\n");
        report.push_str(HEAVY_RULE);
        report.push('\n');

        for resource in graph.resources() {
            report.push_str(&format!("  {:>5}  {}\n", resource.reference_count, resource.uri));
        }
        report.push('\n');
    }

    // Footer
    report.push_str(HEAVY_RULE);
    report.push_str("                                End of Report\n");
    report.push_str(HEAVY_RULE);

    report
}

fn push_text_list<'a>(report: &mut String, title: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return;
    }
    report.push_str(&format!("{} ({}):\n", title, items.len()));
    for item in items {
        report.push_str(&format!("  - {}\n", item));
    }
}

pub fn generate_markdown_report(graph: &SiteGraph) -> String {
    let mut report = String::new();

    report.push_str(&format!("# Site index: {}\n\n", graph.domain));
    report.push_str(&format!("- **Homepage:** {}\n", homepage_uri(graph)));
    report.push_str(&format!("- **Pages:** {}\n", graph.page_count()));
    report.push_str(&format!("- **Resources:** {}\n", graph.resource_count()));
    report.push_str(&format!("- **Generated:** {}\n\n", generated_at()));

    report.push_str("## Pages\n\n");
    for page in graph.pages() {
        report.push_str(&format!("### {}\n\n", page.uri));
        report.push_str(&format!("Referenced {} time(s).\n\n", page.reference_count));

        push_markdown_list(&mut report, "Links", graph.links_of(page).map(|p| p.uri.as_str()));
        push_markdown_list(
            &mut report,
            "External links",
            page.external_links.iter().map(String::as_str),
        );
        push_markdown_list(
            &mut report,
            "Resources",
            graph.resources_of(page).map(|r| r.uri.as_str()),
        );
    }

    report.push_str("## Resources\n\n");
    report.push_str("| References | URI |\n");
    report.push_str("|-----------:|-----|\n");
    for resource in graph.resources() {
        report.push_str(&format!("| {} | {} |\n", resource.reference_count, resource.uri));
    }

    report
}

fn push_markdown_list<'a>(report: &mut String, title: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return;
    }
    report.push_str(&format!("**{}**\n\n", title));
    for item in items {
        report.push_str(&format!("- <{}>\n", item));
    }
    report.push('\n');
}

pub fn generate_html_report(graph: &SiteGraph) -> String {
    let mut report = String::new();
    let domain = escape_html(&graph.domain);

    report.push_str("<!DOCTYPE html>\n");
    report.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\">\n");
    report.push_str("<head>\n");
    report.push_str("  <meta charset=\"utf-8\"/>\n");
    report.push_str(&format!("  <title>Site index: {}</title>\n", domain));
    report.push_str("</head>\n");
    report.push_str("<body>\n");
    report.push_str(&format!("  <h1>Site index: {}</h1>\n", domain));

    report.push_str("  <dl>\n");
    report.push_str(&format!(
        "    <dt>Homepage</dt><dd>{}</dd>\n",
        escape_html(homepage_uri(graph))
    ));
    report.push_str(&format!("    <dt>Pages</dt><dd>{}</dd>\n", graph.page_count()));
    report.push_str(&format!(
        "    <dt>Resources</dt><dd>{}</dd>\n",
        graph.resource_count()
    ));
    report.push_str(&format!("    <dt>Generated</dt><dd>{}</dd>\n", generated_at()));
    report.push_str("  </dl>\n");

    report.push_str("  <h2>Pages</h2>\n");
    for page in graph.pages() {
        push_html_page(&mut report, graph, page);
    }

    report.push_str("  <h2>Resources</h2>\n");
    report.push_str("  <table>\n");
    report.push_str("    <tr><th>References</th><th>URI</th></tr>\n");
    for resource in graph.resources() {
        report.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            resource.reference_count,
            escape_html(&resource.uri)
        ));
    }
    report.push_str("  </table>\n");

    report.push_str("</body>\n");
    report.push_str("</html>\n");

    report
}

fn push_html_page(report: &mut String, graph: &SiteGraph, page: &PageEntity) {
    let uri = escape_html(&page.uri);
    report.push_str(&format!("  <div class=\"page\" id=\"{}\">\n", uri));
    report.push_str(&format!("    <h3><a href=\"{0}\">{0}</a></h3>\n", uri));
    report.push_str(&format!(
        "    <p>Referenced {} time(s).</p>\n",
        page.reference_count
    ));

    let links: Vec<&str> = graph.links_of(page).map(|p| p.uri.as_str()).collect();
    if !links.is_empty() {
        report.push_str("    <h4>Links</h4>\n    <ul>\n");
        for link in links {
            // Linked pages are anchors within this report.
            report.push_str(&format!(
                "      <li><a href=\"#{0}\">{0}</a></li>\n",
                escape_html(link)
            ));
        }
        report.push_str("    </ul>\n");
    }

    if !page.external_links.is_empty() {
        report.push_str("    <h4>External links</h4>\n    <ul>\n");
        for link in &page.external_links {
            report.push_str(&format!(
                "      <li><a href=\"{0}\">{0}</a></li>\n",
                escape_html(link)
            ));
        }
        report.push_str("    </ul>\n");
    }

    let resources: Vec<&str> = graph.resources_of(page).map(|r| r.uri.as_str()).collect();
    if !resources.is_empty() {
        report.push_str("    <h4>Resources</h4>\n    <ul>\n");
        for resource in resources {
            report.push_str(&format!("      <li>{}</li>\n", escape_html(resource)));
        }
        report.push_str("    </ul>\n");
    }

    report.push_str("  </div>\n");
}

pub fn generate_json_report(graph: &SiteGraph) -> Result<String, serde_json::Error> {
    let pages: Vec<&PageEntity> = graph.pages().collect();
    let resources: Vec<&ResourceEntity> = graph.resources().collect();

    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "siteindex",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "domain": graph.domain,
                "homepage": graph.homepage().map(|p| p.uri.as_str()),
                "total_pages": graph.page_count(),
                "total_resources": graph.resource_count()
            },
            "pages": pages,
            "resources": resources
        }
    });

    serde_json::to_string_pretty(&json_report)
}

/// Remove blank and whitespace-only lines. The result uses `\n` line endings.
pub fn remove_blank_lines(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

// Helper functions
fn homepage_uri(graph: &SiteGraph) -> &str {
    graph
        .homepage()
        .map(|p| p.uri.as_str())
        .unwrap_or("(not retrieved)")
}

fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
