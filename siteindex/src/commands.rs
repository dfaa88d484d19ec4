use crate::CLAP_STYLING;
use clap::{arg, command};
use siteindex_scanner::config::{
    DEFAULT_LINK_TEMPLATES, DEFAULT_RESOURCE_TEMPLATES, DEFAULT_TIMEOUT_SECS,
};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("siteindex")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("siteindex")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scan")
                .about(
                    "Crawl a website from its homepage and report every page, link and \
                resource it references.",
                )
                .arg(
                    arg!([URL])
                        .required(true)
                        .help("The homepage to start from, e.g. http://example.com/index.html")
                        .env("HOMEPAGE_URL"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the report to this file instead of stdout")
                        .env("OUTPUT_FILE"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format")
                        .value_parser(["text", "markdown", "md", "html", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"links" <TEMPLATES>)
                        .required(false)
                        .help("Comma separated tag.attribute pairs that link to pages")
                        .env("SITEINDEX_LINKS")
                        .default_value(DEFAULT_LINK_TEMPLATES),
                )
                .arg(
                    arg!(--"resources" <TEMPLATES>)
                        .required(false)
                        .help("Comma separated tag.attribute pairs that embed resources")
                        .env("SITEINDEX_RESOURCES")
                        .default_value(DEFAULT_RESOURCE_TEMPLATES),
                )
                .arg(
                    arg!(-t --"timeout" <SECS>)
                        .required(false)
                        .help(format!(
                            "Per-request timeout in seconds [default: {}]",
                            DEFAULT_TIMEOUT_SECS
                        ))
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(arg!(-v --"verbose" "Log every page and reference as it is scanned").required(false)),
        )
}
