use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tandem_core::SafeCounter;
use tandem_crawler::{CrawlResult, Crawler, Fetcher, FixtureFetcher};
use url::Url;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub url: String,
    pub threads: usize,
    pub max_depth: usize,
    pub show_progress_bars: bool,
}

/// Callback for reporting individual crawl results as they come in
pub type CrawlResultCallback = Arc<dyn Fn(CrawlResult) + Send + Sync>;

/// What a finished crawl produced: the recorded results and the final
/// visit counts.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub results: Vec<CrawlResult>,
    pub visits: BTreeMap<String, usize>,
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Loads the page graph to crawl: the JSON file at `graph` (with `~`
/// expanded) or the bundled sample.
pub fn load_fetcher(graph: Option<&Path>) -> Result<FixtureFetcher> {
    let Some(graph) = graph else {
        return Ok(FixtureFetcher::sample());
    };

    let expanded = shellexpand::tilde(&graph.to_string_lossy()).into_owned();
    let fetcher = FixtureFetcher::from_path(Path::new(&expanded))
        .with_context(|| format!("Failed to load page graph {}", expanded))?;

    if fetcher.is_empty() {
        anyhow::bail!("No pages found in {}", expanded);
    }
    Ok(fetcher)
}

/// Execute a crawl with the given options
pub async fn execute_crawl<F: Fetcher>(
    options: CrawlOptions,
    fetcher: Arc<F>,
    result_callback: Option<CrawlResultCallback>,
) -> Result<CrawlOutcome> {
    let CrawlOptions {
        url,
        threads,
        max_depth,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));
    let count_clone = processed_count.clone();
    let pb_clone = progress_bar.clone();
    let progress_callback: tandem_crawler::ProgressCallback =
        Arc::new(move |_worker_id: usize, _url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("Crawling... {} URLs processed", count));
            }
        });

    let counter = Arc::new(SafeCounter::new());
    let mut crawler = Crawler::new(fetcher)
        .with_max_depth(max_depth)
        .with_counter(counter.clone())
        .with_progress_callback(progress_callback);

    if let Some(cb) = result_callback {
        crawler = crawler.with_result_callback(cb);
    }

    let results = crawler
        .crawl(&url, threads)
        .await
        .with_context(|| format!("Failed to crawl {}", url))?;

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} URLs processed", total));
    }

    let visits = counter.snapshot().await.into_iter().collect();
    Ok(CrawlOutcome { results, visits })
}

/// Generate a crawl report from results
pub fn generate_crawl_report(results: &[CrawlResult]) -> String {
    let (pages, failures): (Vec<&CrawlResult>, Vec<&CrawlResult>) =
        results.iter().partition(|r| !r.is_error());

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages reported: {}\n", pages.len()));
    report.push_str(&format!("  Failed fetches: {}\n", failures.len()));

    let total_links: usize = pages.iter().map(|r| r.links_found.len()).sum();
    report.push_str(&format!("  Total links found: {}\n", total_links));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    // Group results by host, sorted so reports are stable between runs
    let mut by_host: BTreeMap<String, Vec<&CrawlResult>> = BTreeMap::new();
    for result in results {
        let host = Url::parse(&result.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        by_host.entry(host).or_default().push(result);
    }

    for (host, mut host_results) in by_host {
        host_results.sort_by(|a, b| a.url.cmp(&b.url));

        report.push_str(&format!("## {}\n", host));
        report.push_str(&format!("  {} results\n\n", host_results.len()));

        for result in host_results {
            let path = extract_url_path(&result.url);
            let line = match (&result.body, &result.error) {
                (_, Some(error)) => format!("  {} {} {}", "✗".red(), path, error.dimmed()),
                (Some(body), None) => format!("  {} {} {:?}", "✓".green(), path, body),
                (None, None) => format!("  {} {}", "?".yellow(), path),
            };
            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    report
}

/// Lists how many times each URL was marked visited, one line per URL.
pub fn generate_visit_report(visits: &BTreeMap<String, usize>) -> String {
    let mut report = String::new();
    report.push_str("# Visit counts:\n");
    for (url, count) in visits {
        let marker = if *count == 1 {
            count.to_string().green()
        } else {
            count.to_string().red()
        };
        report.push_str(&format!("  {} {}\n", marker, url));
    }
    report.push('\n');
    report
}
