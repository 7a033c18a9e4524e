use crate::crawl::{
    CrawlOptions, execute_crawl, generate_crawl_report, generate_visit_report, load_fetcher,
};
use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tandem_core::{Tree, same, same_best_effort, walk_stream};
use tandem_crawler::SAMPLE_ROOT;
use url::Url;

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_heading(title: &str) {
    print_divider();
    println!("{}", format!("  {}", title).bright_white().bold());
    print_divider();
}

/// Walks `tree` and returns its in-order values.
pub async fn walk_values(tree: Arc<Tree>) -> Vec<i64> {
    walk_stream(tree).collect().await
}

pub fn describe_tree(tree: &Tree) -> String {
    format!("{} nodes, depth {}", tree.len(), tree.depth())
}

/// Compares two freshly shuffled trees holding multiples of `a` and `b`.
pub async fn compare_trees(a: i64, b: i64, best_effort: bool) -> bool {
    let left = Arc::new(Tree::shuffled(a));
    let right = Arc::new(Tree::shuffled(b));
    if best_effort {
        same_best_effort(left, right).await
    } else {
        same(left, right).await
    }
}

pub async fn handle_walk(args: &ArgMatches, quiet: bool) {
    let k = *args.get_one::<i64>("k").unwrap_or(&1);
    let tree = Arc::new(Tree::shuffled(k));
    if !quiet {
        print_heading("TREE WALK");
        println!("{} {}", "→".blue(), describe_tree(&tree));
    }

    let values = walk_values(tree).await;
    let line = values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
}

pub async fn handle_same(args: &ArgMatches, quiet: bool) {
    let a = *args.get_one::<i64>("a").unwrap_or(&1);
    let b = *args.get_one::<i64>("b").unwrap_or(&1);
    let best_effort = args.get_flag("best-effort");

    if !quiet {
        print_heading("TREE COMPARISON");
        if best_effort {
            println!(
                "{} best-effort mode can report different trees as the same",
                "⚠".yellow().bold()
            );
        }
    }

    let result = compare_trees(a, b, best_effort).await;
    print_same_line(a, b, result);
}

fn print_same_line(a: i64, b: i64, result: bool) {
    let verdict = if result {
        "true".green().bold()
    } else {
        "false".red().bold()
    };
    println!("same(tree({}), tree({})) = {}", a, b, verdict);
}

pub async fn handle_crawl(args: &ArgMatches, quiet: bool) -> Result<()> {
    let url = args
        .get_one::<Url>("url")
        .map(|u| u.as_str().to_string())
        .unwrap_or_else(|| SAMPLE_ROOT.to_string());
    let max_depth = *args.get_one::<usize>("depth").unwrap_or(&4);
    let threads = *args.get_one::<usize>("threads").unwrap_or(&4);
    let graph = args.get_one::<PathBuf>("graph");
    let json = args.get_one::<String>("format").map(String::as_str) == Some("json");
    let show_progress_bars = !quiet && !json && !args.get_flag("no-progress");

    let fetcher = Arc::new(load_fetcher(graph.map(PathBuf::as_path))?);

    if !quiet && !json {
        print_heading("CRAWL");
        println!("{} Start: {}", "→".blue(), url.bright_white());
        println!("{} Workers: {}", "→".blue(), threads);
        println!("{} Max depth: {}", "→".blue(), max_depth);
        println!("{} Pages in graph: {}\n", "→".blue(), fetcher.len());
    }

    let options = CrawlOptions {
        url,
        threads,
        max_depth,
        show_progress_bars,
    };
    let outcome = execute_crawl(options, fetcher, None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.results)?);
    } else {
        print!("{}", generate_crawl_report(&outcome.results));
        print!("{}", generate_visit_report(&outcome.visits));
    }
    Ok(())
}

/// Runs every demonstration in turn: two tree comparisons, then a crawl of
/// the sample graph.
pub async fn handle_demo(quiet: bool) -> Result<()> {
    if !quiet {
        print_heading("TREE COMPARISON");
    }
    for (a, b) in [(1, 1), (1, 3)] {
        let result = compare_trees(a, b, false).await;
        print_same_line(a, b, result);
    }
    println!();

    if !quiet {
        print_heading("CRAWL");
    }
    let options = CrawlOptions {
        url: SAMPLE_ROOT.to_string(),
        threads: tandem_crawler::crawler::DEFAULT_WORKERS,
        max_depth: tandem_crawler::crawler::DEFAULT_MAX_DEPTH,
        show_progress_bars: !quiet,
    };
    let outcome = execute_crawl(options, Arc::new(load_fetcher(None)?), None).await?;
    print!("{}", generate_crawl_report(&outcome.results));
    print!("{}", generate_visit_report(&outcome.visits));
    Ok(())
}
