use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("tandem")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("tandem")
        .about("Tree walkers, a safe counter and a small concurrent crawler")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress headings and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Show debug logging on stderr").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("walk")
                .about("Walk a randomly shaped tree holding k, 2k, ..., 10k and print it in order")
                .arg(
                    arg!(-k --"k" <K>)
                        .required(false)
                        .help("Multiplier for the tree values")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("1"),
                ),
        )
        .subcommand(
            command!("same")
                .about("Walk two trees concurrently and report whether they hold the same values")
                .arg(
                    arg!(-a --"a" <K>)
                        .required(false)
                        .help("Multiplier for the first tree")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("1"),
                )
                .arg(
                    arg!(-b --"b" <K>)
                        .required(false)
                        .help("Multiplier for the second tree")
                        .value_parser(clap::value_parser!(i64))
                        .default_value("1"),
                )
                .arg(
                    arg!(--"best-effort")
                        .required(false)
                        .help(
                            "Peek at the second walker without waiting. Fast, but may report \
                        different trees as the same",
                        )
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("crawl")
                .about("Crawl a page graph through the in-memory fetcher")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("The URL to start from")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(tandem_crawler::SAMPLE_ROOT),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("How many link levels to follow. 0 fetches nothing")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of async worker 'threads' in the worker pool.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("4"),
                )
                .arg(
                    arg!(-g --"graph" <PATH>)
                        .required(false)
                        .help("JSON page graph to crawl instead of the bundled sample")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Hide the progress spinner")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
