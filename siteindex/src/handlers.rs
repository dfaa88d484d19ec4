use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use siteindex_core::report::{ReportFormat, generate_report, remove_blank_lines, save_report};
use siteindex_core::scan::{ScanOptions, execute_scan};
use siteindex_scanner::config::DEFAULT_TIMEOUT_SECS;
use siteindex_scanner::resolver::domain_of;
use std::path::PathBuf;
use tracing::Level;
use url::Url;

/// Everything `siteindex scan` needs, pulled out of the command line.
#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub homepage_url: String,
    pub output: Option<String>,
    pub format: ReportFormat,
    pub link_templates: String,
    pub resource_templates: String,
    pub timeout_secs: u64,
    pub verbose: bool,
}

impl ScanArgs {
    pub fn from_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        let homepage_url = args
            .get_one::<String>("URL")
            .context("a homepage URL is required")?
            .trim()
            .to_string();
        let format = args
            .get_one::<String>("format")
            .and_then(|f| ReportFormat::from_str(f))
            .unwrap_or(ReportFormat::Text);

        Ok(Self {
            homepage_url,
            output: args.get_one::<String>("output").cloned(),
            format,
            link_templates: args.get_one::<String>("links").cloned().unwrap_or_default(),
            resource_templates: args
                .get_one::<String>("resources")
                .cloned()
                .unwrap_or_default(),
            timeout_secs: args
                .get_one::<u64>("timeout")
                .copied()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            verbose: args.get_flag("verbose"),
        })
    }
}

/// Install the fmt subscriber on stderr so it never mixes with a report on stdout.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Expand a leading `~` in the output path.
pub fn expand_output_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// The page key to start scanning from. A URL without a path (`http://host`) takes the root
/// path the parser gives it; any other input is kept exactly as typed.
pub fn homepage_key(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw).with_context(|| format!("'{}' is not a valid URL", raw))?;
    if domain_of(Some(raw)).is_empty() {
        Ok(url.as_str().to_string())
    } else {
        Ok(raw.to_string())
    }
}

/// Scan the site and render the report with blank lines removed.
pub async fn run_scanner(args: &ScanArgs, show_progress: bool) -> anyhow::Result<String> {
    let options = ScanOptions {
        homepage_url: homepage_key(&args.homepage_url)?,
        link_templates: args.link_templates.clone(),
        resource_templates: args.resource_templates.clone(),
        timeout_secs: args.timeout_secs,
        show_progress_bars: show_progress,
    };

    let graph = execute_scan(options, None).await?;
    let report = generate_report(&graph, args.format).context("Failed to render report")?;

    Ok(remove_blank_lines(&report))
}

/// Save the report when an output path is given, otherwise print it.
/// Returns the path written to, if any.
pub fn write_output(report: &str, output: Option<&str>) -> anyhow::Result<Option<PathBuf>> {
    match output {
        Some(path) => {
            let path = expand_output_path(path);
            save_report(report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            Ok(Some(path))
        }
        None => {
            println!("{}", report);
            Ok(None)
        }
    }
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn print_usage_hint() {
    eprintln!(
        "{} {}",
        "Usage:".bright_white().bold(),
        "siteindex scan <URL> [-o PATH] [-f text|markdown|html|json]".bright_cyan()
    );
    eprintln!(
        "{} Run {} for every option",
        "→".blue(),
        "siteindex scan --help".bright_white()
    );
}

pub async fn handle_scan(args: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let scan_args = ScanArgs::from_matches(args)?;
    init_tracing(scan_args.verbose);

    // Only decorate the terminal when the report is not headed there.
    let chatty = !quiet && scan_args.output.is_some();
    if chatty {
        print_divider();
        println!("{}", "  SITE SCAN".bright_white().bold());
        print_divider();
        println!(
            "{} Homepage: {}",
            "→".blue(),
            scan_args.homepage_url.bright_white()
        );
        println!(
            "{} Links: {}  Resources: {}",
            "→".blue(),
            scan_args.link_templates,
            scan_args.resource_templates
        );
        println!();
    }

    let report = run_scanner(&scan_args, !quiet).await?;

    if let Some(path) = write_output(&report, scan_args.output.as_deref())?
        && chatty
    {
        println!(
            "\n{} Report saved to {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        );
    }

    Ok(())
}
