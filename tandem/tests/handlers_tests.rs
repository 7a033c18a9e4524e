use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tandem::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tandem_core::Tree;
use tandem_crawler::CrawlResult;
use tempfile::NamedTempFile;

#[test]
fn test_extract_url_path() {
    assert_eq!(extract_url_path("https://example.org/docs/fmt/"), "/docs/fmt/");
    assert_eq!(extract_url_path("https://example.org/"), "/");
    assert_eq!(extract_url_path("https://example.org"), "/");
    assert_eq!(extract_url_path("not a url"), "not a url");
}

#[test]
fn test_load_fetcher_defaults_to_sample() {
    let fetcher = load_fetcher(None).unwrap();
    assert_eq!(fetcher.len(), 4);
    assert!(fetcher.contains(tandem_crawler::SAMPLE_ROOT));
}

#[test]
fn test_load_fetcher_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(
        temp_file,
        r#"{{
            "https://a.test/": {{ "body": "A", "links": ["https://a.test/b"] }},
            "https://a.test/b": {{ "body": "B", "links": [] }}
        }}"#
    )?;

    let path = PathBuf::from(temp_file.path());
    let fetcher = load_fetcher(Some(path.as_path()))?;

    assert_eq!(fetcher.len(), 2);
    assert!(fetcher.contains("https://a.test/b"));
    Ok(())
}

#[test]
fn test_load_fetcher_empty_graph() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{{}}").unwrap();

    let path = PathBuf::from(temp_file.path());
    let err = load_fetcher(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("No pages found"));
}

#[test]
fn test_load_fetcher_missing_file() {
    let path = PathBuf::from("/no/such/graph.json");
    let err = load_fetcher(Some(path.as_path())).unwrap_err();

    assert!(err.to_string().contains("Failed to load page graph /no/such/graph.json"));
}

#[tokio::test]
async fn test_walk_values() {
    let tree = Arc::new(Tree::shuffled(2));
    assert_eq!(walk_values(tree).await, (1..=10).map(|i| i * 2).collect::<Vec<_>>());
}

#[test]
fn test_describe_tree() {
    let chain = Tree::from_values([1, 2, 3, 4]).unwrap();
    assert_eq!(describe_tree(&chain), "4 nodes, depth 4");

    let balanced = Tree::from_values([2, 1, 3]).unwrap();
    assert_eq!(describe_tree(&balanced), "3 nodes, depth 2");
}

#[test]
fn test_generate_visit_report() {
    let mut visits = BTreeMap::new();
    visits.insert("https://example.org/".to_string(), 1);
    visits.insert("https://example.org/docs/".to_string(), 1);

    let report = generate_visit_report(&visits);

    assert!(report.starts_with("# Visit counts:"));
    assert!(report.contains("https://example.org/docs/"));
    assert_eq!(report.lines().filter(|l| l.contains("https://")).count(), 2);
}

#[tokio::test]
async fn test_compare_trees() {
    assert!(compare_trees(1, 1, false).await);
    assert!(!compare_trees(1, 3, false).await);
    assert!(compare_trees(4, 4, false).await);
}

#[test]
fn test_generate_crawl_report() {
    let results = vec![
        CrawlResult {
            url: "https://example.org/".to_string(),
            depth: 4,
            worker: 0,
            body: Some("Example Home".to_string()),
            links_found: vec![
                "https://example.org/docs/".to_string(),
                "https://example.org/cmd/".to_string(),
            ],
            elapsed: Duration::from_millis(3),
            error: None,
        },
        CrawlResult::with_error(
            "https://example.org/cmd/".to_string(),
            3,
            "not found: https://example.org/cmd/".to_string(),
        ),
    ];

    let report = generate_crawl_report(&results);

    assert!(report.contains("Pages reported: 1"));
    assert!(report.contains("Failed fetches: 1"));
    assert!(report.contains("Total links found: 2"));
    assert!(report.contains("## example.org"));
    assert!(report.contains("\"Example Home\""));
    assert!(report.contains("/cmd/"));
    assert!(report.contains("not found: https://example.org/cmd/"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_execute_crawl_with_result_callback() {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let callback: CrawlResultCallback = std::sync::Arc::new(move |result: CrawlResult| {
        seen_clone.lock().unwrap().push(result.url);
    });

    let options = CrawlOptions {
        url: tandem_crawler::SAMPLE_ROOT.to_string(),
        threads: 2,
        max_depth: 2,
        show_progress_bars: false,
    };
    let outcome = execute_crawl(
        options,
        std::sync::Arc::new(load_fetcher(None).unwrap()),
        Some(callback),
    )
    .await
    .unwrap();

    // Root and docs are reported, cmd fails
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(seen.lock().unwrap().len(), 3);
    assert_eq!(outcome.visits.len(), 2);
}
