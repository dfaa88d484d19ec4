use colored::Colorize;

pub mod report;
pub mod scan;

pub use report::{ReportFormat, generate_report, remove_blank_lines, save_report};
pub use scan::{ScanOptions, ScanProgressCallback, execute_scan, extract_url_path};

const BANNER: &str = r#"
     _ _       _           _
 ___(_) |_ ___(_)_ __   __| | _____  __
/ __| | __/ _ \ | '_ \ / _` |/ _ \ \/ /
\__ \ | ||  __/ | | | | (_| |  __/>  <
|___/_|\__\___|_|_| |_|\__,_|\___/_/\_\
"#;

/// Writes to stderr; stdout carries the report.
pub fn print_banner() {
    eprintln!("{}", BANNER.bright_cyan().bold());
    eprintln!(
        "  {} {}\n",
        "crawl a site, index its pages and resources".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
