use colored::Colorize;
use tandem::commands::command_argument_builder;
use tandem::handlers::{handle_crawl, handle_demo, handle_same, handle_walk};
use tracing::Level;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let outcome = match chosen_command.subcommand() {
        None => handle_demo(quiet).await,
        Some(("walk", primary_command)) => {
            handle_walk(primary_command, quiet).await;
            Ok(())
        }
        Some(("same", primary_command)) => {
            handle_same(primary_command, quiet).await;
            Ok(())
        }
        Some(("crawl", primary_command)) => handle_crawl(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
